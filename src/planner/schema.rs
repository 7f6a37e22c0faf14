use crate::api_connection::ResponseSchema;
use crate::diet::WeeklyDiet;

pub const MEAL_REQUIRED: &[&str] = &[
    "name",
    "description",
    "instructions",
    "prepTime",
    "difficulty",
    "calories",
    "protein",
    "carbs",
    "fats",
];

pub const DAY_REQUIRED: &[&str] = &["day", "breakfast", "lunch", "snack", "dinner", "totalCalories"];

pub const PLAN_REQUIRED: &[&str] = &[
    "plan",
    "recommendations",
    "exercisePlan",
    "basalRecommendations",
    "supplementAdvise",
];

pub const ALTERNATIVES_COUNT: usize = 2;

pub fn meal_schema() -> ResponseSchema {
    ResponseSchema::object(
        [
            ("name", ResponseSchema::string()),
            ("description", ResponseSchema::string()),
            (
                "instructions",
                ResponseSchema::string()
                    .with_description("Detailed step-by-step professional cooking instructions."),
            ),
            ("prepTime", ResponseSchema::string().with_description("e.g. 15 min, 45 min")),
            ("difficulty", ResponseSchema::string().with_description("Easy, Medium or Hard")),
            ("calories", ResponseSchema::number()),
            ("protein", ResponseSchema::number()),
            ("carbs", ResponseSchema::number()),
            ("fats", ResponseSchema::number()),
        ],
        MEAL_REQUIRED,
    )
}

fn day_schema() -> ResponseSchema {
    ResponseSchema::object(
        [
            ("day", ResponseSchema::string()),
            ("breakfast", meal_schema()),
            ("lunch", meal_schema()),
            ("snack", meal_schema()),
            ("dinner", meal_schema()),
            ("totalCalories", ResponseSchema::number()),
            ("exerciseNote", ResponseSchema::string()),
        ],
        DAY_REQUIRED,
    )
}

/// Seven days of four meals plus the four advisory texts.
pub fn weekly_diet_schema() -> ResponseSchema {
    ResponseSchema::object(
        [
            (
                "plan",
                ResponseSchema::array(day_schema()).with_exact_len(WeeklyDiet::DAYS),
            ),
            ("recommendations", ResponseSchema::string()),
            ("exercisePlan", ResponseSchema::string()),
            ("basalRecommendations", ResponseSchema::string()),
            ("supplementAdvise", ResponseSchema::string()),
        ],
        PLAN_REQUIRED,
    )
}

pub fn meal_alternatives_schema() -> ResponseSchema {
    ResponseSchema::array(meal_schema()).with_exact_len(ALTERNATIVES_COUNT)
}
