use thiserror::Error;

use super::prompts::{build_alternatives_prompt, build_plan_prompt};
use super::schema::{meal_alternatives_schema, weekly_diet_schema, ALTERNATIVES_COUNT};
use crate::api_connection::{ApiConnectionError, GenerativeModel};
use crate::diet::{Meal, WeeklyDiet};
use crate::profile::UserProfile;

#[derive(Debug, Error)]
pub enum PlanError {
    /// The credential is missing; detected before any request goes out.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("generation failed: {0}")]
    Upstream(ApiConnectionError),
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl From<ApiConnectionError> for PlanError {
    fn from(err: ApiConnectionError) -> Self {
        match err {
            ApiConnectionError::MissingApiKey(var) => PlanError::Configuration(format!(
                "environment variable {} is not set",
                var
            )),
            ApiConnectionError::EmptyResponse => {
                PlanError::MalformedResponse("response contained no text".to_string())
            }
            other => PlanError::Upstream(other),
        }
    }
}

/// Trims the text and removes a surrounding Markdown code fence, if any.
pub fn clean_json_response(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

/// Strict decode of a weekly plan: valid JSON, every required field, exactly seven days.
pub fn decode_weekly_diet(raw: &str) -> Result<WeeklyDiet, PlanError> {
    let content = clean_json_response(raw);
    if content.is_empty() {
        return Err(PlanError::MalformedResponse(
            "response was empty after stripping markdown".to_string(),
        ));
    }
    let diet: WeeklyDiet = serde_json::from_str(content)
        .map_err(|e| PlanError::MalformedResponse(format!("not a weekly plan: {}", e)))?;
    if diet.plan.len() != WeeklyDiet::DAYS {
        return Err(PlanError::MalformedResponse(format!(
            "expected {} days, got {}",
            WeeklyDiet::DAYS,
            diet.plan.len()
        )));
    }
    Ok(diet)
}

pub fn decode_meals(raw: &str) -> Result<Vec<Meal>, PlanError> {
    let content = clean_json_response(raw);
    serde_json::from_str(content)
        .map_err(|e| PlanError::MalformedResponse(format!("not a meal list: {}", e)))
}

pub async fn generate_diet_plan(
    model: &dyn GenerativeModel,
    profile: &UserProfile,
) -> Result<WeeklyDiet, PlanError> {
    let prompt = build_plan_prompt(profile);
    tracing::info!(
        language = %profile.language,
        prompt_chars = prompt.len(),
        "requesting weekly plan"
    );

    let raw = model
        .generate_json(&prompt, &weekly_diet_schema())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "weekly plan request failed");
            PlanError::from(e)
        })?;

    decode_weekly_diet(&raw).inspect_err(|e| {
        tracing::error!(error = %e, "weekly plan response rejected");
        tracing::debug!(raw = %raw, "raw weekly plan response");
    })
}

/// Two substitutes for `meal` with matching macros. Failures yield an empty list.
pub async fn get_meal_alternatives(
    model: &dyn GenerativeModel,
    meal: &Meal,
    profile: &UserProfile,
) -> Vec<Meal> {
    let prompt = build_alternatives_prompt(meal, profile);
    let raw = match model.generate_json(&prompt, &meal_alternatives_schema()).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(meal = %meal.name, error = %e, "alternatives request failed");
            return Vec::new();
        }
    };
    match decode_meals(&raw) {
        Ok(mut meals) => {
            meals.truncate(ALTERNATIVES_COUNT);
            meals
        }
        Err(e) => {
            tracing::warn!(meal = %meal.name, error = %e, "alternatives response rejected");
            Vec::new()
        }
    }
}
