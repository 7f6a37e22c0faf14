use nutriplan::api_connection::{
    connection::ApiConnectionError,
    endpoints::{GenerateContentRequest, ResponseSchema, GEMINI_MODELS},
    GenerativeModel, Provider,
};
use nutriplan::planner::{generate_diet_plan, get_meal_alternatives, schema::meal_schema, PlanError};
use nutriplan::profile::UserProfile;
use dotenv::dotenv;
use std::env;

const TEST_API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

fn setup_test_environment() {
    dotenv().ok();
}

#[test]
fn test_model_catalogue_supports_schemas() {
    assert!(GEMINI_MODELS.iter().all(|m| m.supports_response_schema));
    assert_eq!(Provider::gemini("X").get_available_models().len(), GEMINI_MODELS.len());
}

#[tokio::test]
async fn test_missing_api_key_error() {
    setup_test_environment();
    let provider = Provider::gemini("THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    let request = GenerateContentRequest::json("Hello", ResponseSchema::string());
    let result = provider.call_generate_content(&request).await;
    assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));
    if let Err(ApiConnectionError::MissingApiKey(key_name)) = result {
        assert_eq!(key_name, "THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    }
}

#[tokio::test]
async fn test_missing_key_fails_generation_fast() {
    // Base URL points nowhere; the credential check must trip before any request.
    let provider = Provider::gemini("THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ")
        .with_base_url("http://127.0.0.1:9");
    let result = generate_diet_plan(&provider, &UserProfile::default()).await;
    assert!(matches!(result, Err(PlanError::Configuration(_))));
}

#[tokio::test]
async fn test_alternatives_without_key_are_empty() {
    let provider = Provider::gemini("THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    let meal = nutriplan::diet::Meal {
        name: "Omelette".into(),
        description: "Eggs".into(),
        instructions: "Whisk and cook".into(),
        prep_time: "10 min".into(),
        difficulty: "Easy".into(),
        calories: 350.0,
        protein: 25.0,
        carbs: 5.0,
        fats: 24.0,
    };
    let alternatives = get_meal_alternatives(&provider, &meal, &UserProfile::default()).await;
    assert!(alternatives.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_successful_structured_call() {
    setup_test_environment();
    if env::var(TEST_API_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_successful_structured_call: {} not set.",
            TEST_API_KEY_ENV_VAR
        );
        return;
    }

    let provider = Provider::gemini(TEST_API_KEY_ENV_VAR);
    let schema = ResponseSchema::array(meal_schema()).with_exact_len(1);
    let result = provider
        .generate_json("Suggest one healthy breakfast.", &schema)
        .await;
    assert!(result.is_ok(), "API call failed: {:?}", result.err());

    let raw = result.unwrap();
    let parsed: Result<Vec<nutriplan::diet::Meal>, _> =
        serde_json::from_str(nutriplan::planner::clean_json_response(&raw));
    assert!(parsed.is_ok(), "Response is not a meal list: {}", raw);
    assert_eq!(parsed.unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_successful_weekly_plan() {
    setup_test_environment();
    if env::var(TEST_API_KEY_ENV_VAR).is_err() {
        println!("Skipping test_successful_weekly_plan: {} not set.", TEST_API_KEY_ENV_VAR);
        return;
    }

    let provider = Provider::gemini(TEST_API_KEY_ENV_VAR);
    let diet = generate_diet_plan(&provider, &UserProfile::default())
        .await
        .expect("weekly plan generation failed");
    assert_eq!(diet.plan.len(), 7);
    assert!(!diet.supplement_advise.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_api_error_with_invalid_key() {
    setup_test_environment();

    const INVALID_KEY_ENV_NAME_FOR_THIS_TEST: &str = "NUTRIPLAN_ENV_VAR_WITH_BAD_KEY_VALUE";
    unsafe {
        std::env::set_var(INVALID_KEY_ENV_NAME_FOR_THIS_TEST, "this_is_a_deliberately_bad_api_key");
    }

    let provider = Provider::gemini(INVALID_KEY_ENV_NAME_FOR_THIS_TEST);
    let request = GenerateContentRequest::json("This call should fail.", ResponseSchema::string());
    let result = provider.call_generate_content(&request).await;
    assert!(
        matches!(result, Err(ApiConnectionError::ApiError { .. })),
        "Expected ApiError, got {:?}",
        result
    );
    if let Err(ApiConnectionError::ApiError { status, .. }) = result {
        assert!(status.is_client_error(), "Expected a 4xx, got {}", status);
    }

    unsafe {
        std::env::remove_var(INVALID_KEY_ENV_NAME_FOR_THIS_TEST);
    }
}
