pub mod generator;
pub mod prompts;
pub mod schema;

pub use generator::{
    clean_json_response, decode_weekly_diet, generate_diet_plan, get_meal_alternatives, PlanError,
};
