use async_trait::async_trait;
use nutriplan::api_connection::{ApiConnectionError, GenerativeModel, ResponseSchema};
use nutriplan::diet::{DailyDiet, Meal, MealSlot, WeeklyDiet};
use nutriplan::i18n::Language;
use nutriplan::planner::PlanError;
use nutriplan::profile::UserProfile;
use nutriplan::session::{Session, SessionError, Tab, View};
use nutriplan::store::PlanStore;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::{tempdir, TempDir};

/// Replays canned results in order and counts calls.
#[derive(Default)]
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ApiConnectionError>>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn with(replies: Vec<Result<String, ApiConnectionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_json(
        &self,
        _prompt: &str,
        _schema: &ResponseSchema,
    ) -> Result<String, ApiConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiConnectionError::EmptyResponse))
    }
}

fn meal(name: &str, calories: f64) -> Meal {
    Meal {
        name: name.into(),
        description: format!("{} of the day", name),
        instructions: "1. Prepare.\n2. Serve.".into(),
        prep_time: "20 min".into(),
        difficulty: "Medium".into(),
        calories,
        protein: 25.0,
        carbs: 40.0,
        fats: 12.0,
    }
}

fn weekly_diet(tag: &str) -> WeeklyDiet {
    let plan = (1..=7)
        .map(|i| DailyDiet {
            day: format!("Day {}", i),
            breakfast: meal(&format!("{} breakfast", tag), 400.0),
            lunch: meal(&format!("{} lunch", tag), 600.0),
            snack: meal(&format!("{} snack", tag), 200.0),
            dinner: meal(&format!("{} dinner", tag), 500.0),
            total_calories: 1700.0,
            exercise_note: None,
        })
        .collect();
    WeeklyDiet {
        plan,
        recommendations: format!("{} recommendations", tag),
        exercise_plan: "Walk daily".into(),
        basal_recommendations: "Take the stairs".into(),
        supplement_advise: "Vitamin D in winter".into(),
    }
}

fn plan_reply(tag: &str) -> Result<String, ApiConnectionError> {
    Ok(format!("```json\n{}\n```", serde_json::to_string(&weekly_diet(tag)).unwrap()))
}

fn alternatives_reply(a: f64, b: f64) -> Result<String, ApiConnectionError> {
    Ok(serde_json::to_string(&vec![meal("Alt one", a), meal("Alt two", b)]).unwrap())
}

fn open(dir: &TempDir, model: ScriptedModel) -> Session<ScriptedModel> {
    Session::load(PlanStore::open(dir.path()).unwrap(), model)
}

fn api_failure() -> ApiConnectionError {
    ApiConnectionError::ApiError {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        error_body: "overloaded".into(),
    }
}

#[tokio::test]
async fn test_starts_in_onboarding() {
    let dir = tempdir().unwrap();
    let session = open(&dir, ScriptedModel::default());
    assert_eq!(session.view(), View::Onboarding);
    assert_eq!(session.language(), Language::Es);
}

#[tokio::test]
async fn test_submit_commits_profile_history_and_plan() {
    let dir = tempdir().unwrap();
    let mut session = open(&dir, ScriptedModel::with(vec![plan_reply("first")]));
    session.set_language(Language::En).unwrap();
    session.select_tab(Tab::References);

    let profile = UserProfile {
        weight: 82.0,
        height: 180.0,
        waist: 94.0,
        language: Language::Es,
        ..Default::default()
    };
    let diet = session.submit_profile(profile).await.unwrap().clone();
    assert_eq!(diet, weekly_diet("first"));
    assert_eq!(session.view(), View::Tab(Tab::Plan));
    assert_eq!(session.profile().unwrap().language, Language::En);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].bmi, 25.3);

    let store = PlanStore::open(dir.path()).unwrap();
    assert_eq!(store.load_diet(), Some(diet));
    assert_eq!(store.load_history().len(), 1);
    assert_eq!(store.load_profile().unwrap().weight, 82.0);
}

#[tokio::test]
async fn test_invalid_profile_never_calls_model() {
    let dir = tempdir().unwrap();
    let mut session = open(&dir, ScriptedModel::with(vec![plan_reply("unused")]));

    for profile in [
        UserProfile {
            age: 5,
            ..Default::default()
        },
        UserProfile {
            weight: 300.0,
            ..Default::default()
        },
    ] {
        let err = session.submit_profile(profile).await.unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }
    assert_eq!(session.view(), View::Onboarding);
    assert!(session.error().is_none());
    assert_eq!(session.model().calls(), 0);
    assert!(PlanStore::open(dir.path()).unwrap().load_profile().is_none());
}

#[tokio::test]
async fn test_generation_failure_leaves_state_untouched() {
    let dir = tempdir().unwrap();
    let mut session = open(
        &dir,
        ScriptedModel::with(vec![plan_reply("first"), Err(api_failure())]),
    );
    session.submit_profile(UserProfile::default()).await.unwrap();
    session.select_tab(Tab::Tracking);

    let edited = UserProfile {
        weight: 90.0,
        ..Default::default()
    };
    let err = session.submit_profile(edited).await.unwrap_err();
    assert!(matches!(err, SessionError::Generation(PlanError::Upstream(_))));

    assert_eq!(session.active_tab(), Tab::Tracking);
    assert!(session.error().unwrap().contains("overloaded"));
    assert_eq!(session.profile().unwrap().weight, 70.0);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.diet(), Some(&weekly_diet("first")));

    let store = PlanStore::open(dir.path()).unwrap();
    assert_eq!(store.load_profile().unwrap().weight, 70.0);
    assert_eq!(store.load_history().len(), 1);
    assert_eq!(store.load_diet(), Some(weekly_diet("first")));

    session.dismiss_error();
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_missing_key_shows_configuration_banner() {
    let dir = tempdir().unwrap();
    let model = ScriptedModel::with(vec![Err(ApiConnectionError::MissingApiKey(
        "GEMINI_API_KEY".into(),
    ))]);
    let mut session = open(&dir, model);
    session.set_language(Language::En).unwrap();

    let err = session.submit_profile(UserProfile::default()).await.unwrap_err();
    assert!(matches!(err, SessionError::Generation(PlanError::Configuration(_))));
    let banner = session.error().unwrap();
    assert!(banner.contains("GEMINI_API_KEY"));
    assert!(banner.contains("not configured"));
    assert_eq!(session.view(), View::Onboarding);
}

#[tokio::test]
async fn test_malformed_reply_is_distinct_error() {
    let dir = tempdir().unwrap();
    let mut session = open(&dir, ScriptedModel::with(vec![Ok("I cannot help".into())]));
    let err = session.submit_profile(UserProfile::default()).await.unwrap_err();
    assert!(matches!(err, SessionError::Generation(PlanError::MalformedResponse(_))));
    assert!(session.diet().is_none());
}

#[tokio::test]
async fn test_log_progress_appends_and_patches_profile() {
    let dir = tempdir().unwrap();
    let mut session = open(&dir, ScriptedModel::with(vec![plan_reply("first")]));
    assert!(matches!(session.log_progress(70.0, 85.0), Err(SessionError::NoProfile)));

    session.submit_profile(UserProfile::default()).await.unwrap();
    let entry = session.log_progress(68.5, 83.0).unwrap().clone();
    assert_eq!(entry.bmi, 23.7);

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.profile().unwrap().weight, 68.5);
    assert_eq!(session.profile().unwrap().waist, 83.0);

    let store = PlanStore::open(dir.path()).unwrap();
    assert_eq!(store.load_history().last(), Some(&entry));
    assert_eq!(store.load_profile().unwrap().waist, 83.0);

    assert!(matches!(session.log_progress(500.0, 83.0), Err(SessionError::Validation(_))));
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_swap_replaces_meal_and_recomputes_total() {
    let dir = tempdir().unwrap();
    let mut session = open(
        &dir,
        ScriptedModel::with(vec![plan_reply("first"), alternatives_reply(250.0, 190.0)]),
    );
    session.submit_profile(UserProfile::default()).await.unwrap();

    let ticket = session.begin_swap(2, MealSlot::Snack).unwrap();
    let alternatives = session.request_alternatives(&ticket).await.unwrap();
    assert_eq!(alternatives.len(), 2);

    let total = session.apply_swap(ticket, alternatives[0].clone()).unwrap();
    assert_eq!(total, 1750.0);

    let day = &session.diet().unwrap().plan[2];
    assert_eq!(day.snack.name, "Alt one");
    assert_eq!(day.total_calories, 1750.0);
    assert_eq!(session.diet().unwrap().plan[1].total_calories, 1700.0);

    let saved = PlanStore::open(dir.path()).unwrap().load_diet().unwrap();
    assert_eq!(saved.plan[2].total_calories, 1750.0);
}

#[tokio::test]
async fn test_stale_swap_is_rejected() {
    let dir = tempdir().unwrap();
    let mut session = open(&dir, ScriptedModel::with(vec![plan_reply("first")]));
    session.submit_profile(UserProfile::default()).await.unwrap();

    let older = session.begin_swap(0, MealSlot::Lunch).unwrap();
    let newer = session.begin_swap(0, MealSlot::Lunch).unwrap();
    let other_slot = session.begin_swap(0, MealSlot::Dinner).unwrap();

    session.apply_swap(newer, meal("Newer", 610.0)).unwrap();
    let err = session.apply_swap(older, meal("Older", 590.0)).unwrap_err();
    assert!(matches!(err, SessionError::StaleSwap { day: 0, slot: MealSlot::Lunch }));
    assert_eq!(session.diet().unwrap().plan[0].lunch.name, "Newer");

    // A ticket is consumed once applied.
    assert!(session.apply_swap(newer, meal("Again", 600.0)).is_err());
    // Other slots are unaffected.
    session.apply_swap(other_slot, meal("Fish", 450.0)).unwrap();
    assert_eq!(session.diet().unwrap().plan[0].total_calories, 400.0 + 610.0 + 200.0 + 450.0);
}

#[tokio::test]
async fn test_alternatives_failure_is_empty_list() {
    let dir = tempdir().unwrap();
    let mut session = open(
        &dir,
        ScriptedModel::with(vec![plan_reply("first"), Err(api_failure())]),
    );
    session.submit_profile(UserProfile::default()).await.unwrap();
    let ticket = session.begin_swap(0, MealSlot::Breakfast).unwrap();
    assert!(session.request_alternatives(&ticket).await.unwrap().is_empty());
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_swap_requires_valid_day() {
    let dir = tempdir().unwrap();
    let mut session = open(&dir, ScriptedModel::with(vec![plan_reply("first")]));
    assert!(matches!(session.begin_swap(0, MealSlot::Lunch), Err(SessionError::NoPlan)));
    session.submit_profile(UserProfile::default()).await.unwrap();
    assert!(matches!(
        session.begin_swap(7, MealSlot::Lunch),
        Err(SessionError::InvalidDay { day: 7 })
    ));
}

#[tokio::test]
async fn test_reset_clears_everything_but_language() {
    let dir = tempdir().unwrap();
    let mut session = open(&dir, ScriptedModel::with(vec![plan_reply("first")]));
    session.set_language(Language::En).unwrap();
    session.submit_profile(UserProfile::default()).await.unwrap();
    session.log_progress(69.0, 84.0).unwrap();

    session.reset().unwrap();
    assert_eq!(session.view(), View::Onboarding);
    assert!(session.profile().is_none());
    assert!(session.diet().is_none());
    assert!(session.history().is_empty());

    let reloaded = open(&dir, ScriptedModel::default());
    assert_eq!(reloaded.view(), View::Onboarding);
    assert!(reloaded.history().is_empty());
    assert!(reloaded.diet().is_none());
    assert_eq!(reloaded.language(), Language::En);
}

#[tokio::test]
async fn test_plan_round_trips_through_restart() {
    let dir = tempdir().unwrap();
    let model = ScriptedModel::with(vec![plan_reply("first")]);
    let mut session = open(&dir, model);
    let generated = session.submit_profile(UserProfile::default()).await.unwrap().clone();

    let reloaded = open(&dir, ScriptedModel::default());
    assert_eq!(reloaded.diet(), Some(&generated));
    assert_eq!(reloaded.view(), View::Tab(Tab::Plan));
}

#[tokio::test]
async fn test_each_submit_is_one_model_call() {
    let dir = tempdir().unwrap();
    let mut session = open(
        &dir,
        ScriptedModel::with(vec![plan_reply("first"), plan_reply("second")]),
    );
    session.submit_profile(UserProfile::default()).await.unwrap();
    session.submit_profile(UserProfile::default()).await.unwrap();
    assert_eq!(session.diet().unwrap().recommendations, "second recommendations");
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.model().calls(), 2);
}

#[test]
fn test_tab_labels_follow_language() {
    assert_eq!(Tab::Tracking.label(Language::Es), "Evolución");
    assert_eq!(Tab::References.label(Language::En), "Science");
    let labels: Vec<_> = Tab::ALL.iter().map(|t| t.label(Language::En)).collect();
    assert_eq!(labels, vec!["Plan", "Evolution", "Profile", "Science"]);
}
