use chrono::Utc;
use clap::ValueEnum;
use std::collections::HashMap;
use thiserror::Error;

use crate::api_connection::GenerativeModel;
use crate::diet::{Meal, MealSlot, WeeklyDiet};
use crate::i18n::Language;
use crate::planner::{generate_diet_plan, get_meal_alternatives, PlanError};
use crate::profile::{validate_profile, FieldError, UserProfile, ValidationErrors, VALID_RANGES};
use crate::store::{PlanStore, StoreError};
use crate::tracking::ProgressEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Tab {
    #[default]
    Plan,
    Tracking,
    Profile,
    #[value(alias = "refs")]
    References,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Plan, Tab::Tracking, Tab::Profile, Tab::References];

    pub fn label(self, language: Language) -> &'static str {
        let t = language.translations();
        match self {
            Tab::Plan => t.tab_diet,
            Tab::Tracking => t.tab_evolution,
            Tab::Profile => t.tab_profile,
            Tab::References => t.tab_science,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Onboarding,
    Tab(Tab),
}

/// Identifies one alternative-meal request for a day/slot pair.
///
/// Only the most recently issued ticket for a slot may apply a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapTicket {
    pub day: usize,
    pub slot: MealSlot,
    token: u64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("no profile has been created yet")]
    NoProfile,
    #[error("no plan has been generated yet")]
    NoPlan,
    #[error("day {day} is not part of the current plan")]
    InvalidDay { day: usize },
    #[error("a newer alternative request exists for {slot} on day {day}")]
    StaleSwap { day: usize, slot: MealSlot },
    #[error(transparent)]
    Generation(#[from] PlanError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory application state mirrored to a `PlanStore`.
pub struct Session<M> {
    store: PlanStore,
    model: M,
    profile: Option<UserProfile>,
    history: Vec<ProgressEntry>,
    diet: Option<WeeklyDiet>,
    language: Language,
    active_tab: Tab,
    error: Option<String>,
    swap_tokens: HashMap<(usize, MealSlot), u64>,
    next_token: u64,
}

impl<M: GenerativeModel> Session<M> {
    pub fn load(store: PlanStore, model: M) -> Self {
        let profile = store.load_profile();
        let history = store.load_history();
        let diet = store.load_diet();
        let language = store.load_language().unwrap_or_default();
        tracing::debug!(
            has_profile = profile.is_some(),
            history_len = history.len(),
            has_diet = diet.is_some(),
            %language,
            "session loaded"
        );
        Self {
            store,
            model,
            profile,
            history,
            diet,
            language,
            active_tab: Tab::Plan,
            error: None,
            swap_tokens: HashMap::new(),
            next_token: 0,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn history(&self) -> &[ProgressEntry] {
        &self.history
    }

    pub fn diet(&self) -> Option<&WeeklyDiet> {
        self.diet.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn view(&self) -> View {
        if self.profile.is_some() {
            View::Tab(self.active_tab)
        } else {
            View::Onboarding
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), SessionError> {
        self.store.save_language(language)?;
        self.language = language;
        Ok(())
    }

    fn banner_for(&self, err: &PlanError) -> String {
        let t = self.language.translations();
        match err {
            PlanError::Configuration(detail) => {
                format!("{}: {} ({})", t.error_detected, t.error_config, detail)
            }
            other => format!("{}: {}", t.error_detected, other),
        }
    }

    /// Validates, generates a new plan and, only on success, commits profile,
    /// history and plan together and switches to the plan tab.
    pub async fn submit_profile(&mut self, profile: UserProfile) -> Result<&WeeklyDiet, SessionError> {
        validate_profile(&profile)?;
        self.error = None;

        let profile = UserProfile {
            language: self.language,
            ..profile
        };

        let diet = match generate_diet_plan(&self.model, &profile).await {
            Ok(diet) => diet,
            Err(e) => {
                self.error = Some(self.banner_for(&e));
                return Err(e.into());
            }
        };

        let entry = ProgressEntry::record(profile.weight, profile.waist, profile.height, Utc::now());
        let mut history = self.history.clone();
        history.push(entry);

        self.store.save_profile(&profile)?;
        self.store.save_history(&history)?;
        self.store.save_diet(&diet)?;

        tracing::info!(history_len = history.len(), "new plan committed");
        self.profile = Some(profile);
        self.history = history;
        self.swap_tokens.clear();
        self.active_tab = Tab::Plan;
        Ok(self.diet.insert(diet))
    }

    /// Appends a sample and patches the profile's current weight and waist.
    pub fn log_progress(&mut self, weight: f64, waist: f64) -> Result<&ProgressEntry, SessionError> {
        let profile = self.profile.as_ref().ok_or(SessionError::NoProfile)?;

        let mut fields = Vec::new();
        for (name, value, range) in [
            ("weight", weight, VALID_RANGES.weight),
            ("waist", waist, VALID_RANGES.waist),
        ] {
            if !range.contains(value) {
                fields.push((name, FieldError::OutOfRange { min: range.min, max: range.max }));
            }
        }
        if !fields.is_empty() {
            return Err(ValidationErrors { fields }.into());
        }

        let entry = ProgressEntry::record(weight, waist, profile.height, Utc::now());
        let updated = UserProfile {
            weight,
            waist,
            ..profile.clone()
        };
        let mut history = self.history.clone();
        history.push(entry);

        self.store.save_history(&history)?;
        self.store.save_profile(&updated)?;
        self.history = history;
        self.profile = Some(updated);
        self.history.last().ok_or(SessionError::NoProfile)
    }

    /// Issues a fresh ticket for the slot, superseding any earlier one.
    pub fn begin_swap(&mut self, day: usize, slot: MealSlot) -> Result<SwapTicket, SessionError> {
        let diet = self.diet.as_ref().ok_or(SessionError::NoPlan)?;
        if diet.day(day).is_none() {
            return Err(SessionError::InvalidDay { day });
        }
        self.next_token += 1;
        self.swap_tokens.insert((day, slot), self.next_token);
        Ok(SwapTicket {
            day,
            slot,
            token: self.next_token,
        })
    }

    pub fn current_meal(&self, day: usize, slot: MealSlot) -> Result<&Meal, SessionError> {
        let diet = self.diet.as_ref().ok_or(SessionError::NoPlan)?;
        diet.day(day)
            .map(|d| d.meal(slot))
            .ok_or(SessionError::InvalidDay { day })
    }

    pub async fn request_alternatives(&self, ticket: &SwapTicket) -> Result<Vec<Meal>, SessionError> {
        let profile = self.profile.as_ref().ok_or(SessionError::NoProfile)?;
        let meal = self.current_meal(ticket.day, ticket.slot)?;
        Ok(get_meal_alternatives(&self.model, meal, profile).await)
    }

    /// Replaces the meal if `ticket` is still the latest for its slot; returns the new day total.
    pub fn apply_swap(&mut self, ticket: SwapTicket, meal: Meal) -> Result<f64, SessionError> {
        let key = (ticket.day, ticket.slot);
        if self.swap_tokens.get(&key) != Some(&ticket.token) {
            tracing::debug!(day = ticket.day, slot = %ticket.slot, "dropping stale swap");
            return Err(SessionError::StaleSwap {
                day: ticket.day,
                slot: ticket.slot,
            });
        }

        let mut diet = self.diet.clone().ok_or(SessionError::NoPlan)?;
        let day = diet
            .day_mut(ticket.day)
            .ok_or(SessionError::InvalidDay { day: ticket.day })?;
        day.replace_meal(ticket.slot, meal);
        let total = day.total_calories;

        self.store.save_diet(&diet)?;
        self.diet = Some(diet);
        self.swap_tokens.remove(&key);
        Ok(total)
    }

    /// Wholesale replacement of the current plan.
    pub fn save_diet(&mut self, diet: WeeklyDiet) -> Result<(), SessionError> {
        self.store.save_diet(&diet)?;
        self.diet = Some(diet);
        self.swap_tokens.clear();
        Ok(())
    }

    /// Erases profile, history and plan, returning to onboarding.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        self.profile = None;
        self.history.clear();
        self.diet = None;
        self.error = None;
        self.swap_tokens.clear();
        self.active_tab = Tab::Plan;
        Ok(())
    }
}
