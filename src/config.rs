use std::env;
use std::path::PathBuf;

use crate::api_connection::endpoints::{DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL};
use crate::api_connection::Provider;

pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const FALLBACK_API_KEY_ENV_VAR: &str = "API_KEY";
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV_VAR: &str = "GEMINI_BASE_URL";
pub const DATA_DIR_ENV_VAR: &str = "NUTRIPLAN_DATA_DIR";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment variable the provider reads the key from.
    pub api_key_env_var: String,
    pub model: String,
    pub base_url: String,
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Reads configuration from the environment (after `.env` has been loaded).
    ///
    /// The key itself is not read here; a missing key surfaces on the first model call.
    pub fn from_env() -> Self {
        let api_key_env_var = if env::var(API_KEY_ENV_VAR).is_err()
            && env::var(FALLBACK_API_KEY_ENV_VAR).is_ok()
        {
            FALLBACK_API_KEY_ENV_VAR
        } else {
            API_KEY_ENV_VAR
        };

        let data_dir = env::var(DATA_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Self {
            api_key_env_var: api_key_env_var.to_string(),
            model: env::var(MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| GEMINI_BASE_URL.to_string()),
            data_dir,
        }
    }

    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn provider(&self) -> Provider {
        Provider::gemini(&self.api_key_env_var)
            .with_model(&self.model)
            .with_base_url(&self.base_url)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nutriplan")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig::from_env().with_data_dir(Some(PathBuf::from("/tmp/np")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/np"));
    }

    #[test]
    fn test_default_data_dir_ends_with_app_name() {
        assert!(default_data_dir().ends_with("nutriplan"));
    }
}
