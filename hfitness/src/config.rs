//! Environment-driven settings for the assistant and its lookup tools.
//!
//! ```rust
//! use hfitness::FitnessConfig;
//!
//! let config = FitnessConfig::from_lookup(|name| match name {
//!     "OPENAI_API_KEY" => Some("sk-test".to_string()),
//!     "HEALTHMATE_MAX_TOOL_ROUNDS" => Some("5".to_string()),
//!     _ => None,
//! })
//! .expect("config should load");
//!
//! assert_eq!(config.model, "gpt-4-0613");
//! assert_eq!(config.max_tool_rounds, 5);
//! assert!(config.nutrition_api_key.is_none());
//! ```

use std::time::Duration;

use hprovider::SecretString;

use crate::FitnessError;

pub const DEFAULT_MODEL: &str = "gpt-4-0613";
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 3;
pub const DEFAULT_NUTRITION_URL: &str = "https://api.api-ninjas.com/v1/nutrition";
pub const DEFAULT_MEAL_PLAN_URL: &str = "https://api.edamam.com/api/meal-planner/v1";
pub const DEFAULT_FITBIT_BASE_URL: &str = "http://localhost:5000/api/user";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct FitnessConfig {
    pub openai_api_key: SecretString,
    pub openai_base_url: Option<String>,
    pub model: String,
    pub max_tool_rounds: u32,
    pub nutrition_api_key: Option<SecretString>,
    pub nutrition_url: String,
    pub edamam_app_id: Option<String>,
    pub edamam_app_key: Option<SecretString>,
    pub meal_plan_url: String,
    pub fitbit_base_url: String,
    pub http_timeout: Duration,
}

impl FitnessConfig {
    pub fn new(openai_api_key: impl Into<SecretString>) -> Self {
        Self {
            openai_api_key: openai_api_key.into(),
            openai_base_url: None,
            model: DEFAULT_MODEL.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            nutrition_api_key: None,
            nutrition_url: DEFAULT_NUTRITION_URL.to_string(),
            edamam_app_id: None,
            edamam_app_key: None,
            meal_plan_url: DEFAULT_MEAL_PLAN_URL.to_string(),
            fitbit_base_url: DEFAULT_FITBIT_BASE_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, FitnessError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FitnessError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key =
            var("OPENAI_API_KEY").ok_or_else(|| FitnessError::missing_var("OPENAI_API_KEY"))?;
        let mut config = Self::new(api_key);
        config.openai_base_url = var("OPENAI_BASE_URL");

        if let Some(model) = var("HEALTHMATE_MODEL") {
            config.model = model;
        }

        if let Some(rounds) = var("HEALTHMATE_MAX_TOOL_ROUNDS") {
            config.max_tool_rounds = rounds.parse().map_err(|_| {
                FitnessError::invalid_var(
                    "HEALTHMATE_MAX_TOOL_ROUNDS",
                    format!("expected a non-negative integer, got '{rounds}'"),
                )
            })?;
        }

        config.nutrition_api_key = var("NUT_API_KEY").map(SecretString::from);
        config.edamam_app_id = var("EDAMAM_APP_ID");
        config.edamam_app_key = var("EDAMAM_APP_KEY").map(SecretString::from);

        if let Some(url) = var("FITBIT_BASE_URL") {
            config.fitbit_base_url = url;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: u32) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn with_nutrition_api_key(mut self, key: impl Into<SecretString>) -> Self {
        self.nutrition_api_key = Some(key.into());
        self
    }

    pub fn with_nutrition_url(mut self, url: impl Into<String>) -> Self {
        self.nutrition_url = url.into();
        self
    }

    pub fn with_edamam_credentials(
        mut self,
        app_id: impl Into<String>,
        app_key: impl Into<SecretString>,
    ) -> Self {
        self.edamam_app_id = Some(app_id.into());
        self.edamam_app_key = Some(app_key.into());
        self
    }

    pub fn with_meal_plan_url(mut self, url: impl Into<String>) -> Self {
        self.meal_plan_url = url.into();
        self
    }

    pub fn with_fitbit_base_url(mut self, url: impl Into<String>) -> Self {
        self.fitbit_base_url = url.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}
