use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::i18n::Language;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub prep_time: String,
    pub difficulty: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDiet {
    pub day: String,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub snack: Meal,
    pub dinner: Meal,
    pub total_calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDiet {
    pub plan: Vec<DailyDiet>,
    pub recommendations: String,
    pub exercise_plan: String,
    pub basal_recommendations: String,
    pub supplement_advise: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
    ];

    pub fn label(self, language: Language) -> &'static str {
        let t = language.translations();
        match self {
            MealSlot::Breakfast => t.diet_breakfast,
            MealSlot::Lunch => t.diet_lunch,
            MealSlot::Snack => t.diet_snack,
            MealSlot::Dinner => t.diet_dinner,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snack => "snack",
            MealSlot::Dinner => "dinner",
        };
        f.write_str(name)
    }
}

impl DailyDiet {
    pub fn meal(&self, slot: MealSlot) -> &Meal {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snack => &self.snack,
            MealSlot::Dinner => &self.dinner,
        }
    }

    fn meal_mut(&mut self, slot: MealSlot) -> &mut Meal {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Snack => &mut self.snack,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn meals(&self) -> impl Iterator<Item = (MealSlot, &Meal)> {
        MealSlot::ALL.into_iter().map(move |slot| (slot, self.meal(slot)))
    }

    pub fn sum_of_meal_calories(&self) -> f64 {
        self.meals().map(|(_, meal)| meal.calories).sum()
    }

    /// Protein, carbs and fats in grams summed over the four meals.
    pub fn macro_totals(&self) -> (f64, f64, f64) {
        self.meals().fold((0.0, 0.0, 0.0), |(p, c, f), (_, meal)| {
            (p + meal.protein, c + meal.carbs, f + meal.fats)
        })
    }

    /// Swaps one meal and recomputes the day total locally; returns the replaced meal.
    pub fn replace_meal(&mut self, slot: MealSlot, meal: Meal) -> Meal {
        let previous = std::mem::replace(self.meal_mut(slot), meal);
        self.total_calories = self.sum_of_meal_calories();
        previous
    }
}

impl WeeklyDiet {
    pub const DAYS: usize = 7;

    pub fn day(&self, index: usize) -> Option<&DailyDiet> {
        self.plan.get(index)
    }

    pub fn day_mut(&mut self, index: usize) -> Option<&mut DailyDiet> {
        self.plan.get_mut(index)
    }

    pub fn weekly_calories(&self) -> f64 {
        self.plan.iter().map(|d| d.total_calories).sum()
    }
}
