//! HTTP-backed nutrition, meal-plan and activity lookups.

use std::sync::Arc;

use htooling::{
    SchemaError, ToolError, ToolErrorKind, ToolRegistry, optional_string, required_i64,
    required_string, tool_signature,
};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Value, json};

use crate::{FitnessConfig, FitnessError};

/// Shared client for the third-party lookups a [`FitnessConfig`] points at.
#[derive(Debug, Clone)]
pub struct FitnessClient {
    http: Client,
    config: Arc<FitnessConfig>,
}

impl FitnessClient {
    pub fn new(config: FitnessConfig) -> Result<Self, FitnessError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(FitnessError::HttpClient)?;

        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: FitnessConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// Nutrition facts for a free-text food query.
    pub async fn nutritional_info(&self, query: &str) -> Result<Value, ToolError> {
        let key = self
            .config
            .nutrition_api_key
            .as_ref()
            .ok_or_else(|| ToolError::unauthorized("NUT_API_KEY is not configured"))?;

        let request = self
            .http
            .get(&self.config.nutrition_url)
            .query(&[("query", query)])
            .header("X-Api-Key", key.expose());

        json_or_error_report(send(request).await?).await
    }

    pub async fn meal_plan(
        &self,
        calories: i64,
        diet: Option<&str>,
        health: Option<&str>,
    ) -> Result<Value, ToolError> {
        let (Some(app_id), Some(app_key)) = (
            self.config.edamam_app_id.as_deref(),
            self.config.edamam_app_key.as_ref(),
        ) else {
            return Err(ToolError::unauthorized(
                "EDAMAM_APP_ID and EDAMAM_APP_KEY must both be configured",
            ));
        };

        let mut params = vec![
            ("app_id", app_id.to_string()),
            ("app_key", app_key.expose().to_string()),
            ("calories", calories.to_string()),
        ];
        if let Some(diet) = diet {
            params.push(("diet", diet.to_string()));
        }
        if let Some(health) = health {
            params.push(("health", health.to_string()));
        }

        let request = self.http.get(&self.config.meal_plan_url).query(&params);
        json_or_error_report(send(request).await?).await
    }

    /// One activity-tracker record; any failure is logged and yields `None`.
    pub async fn fitbit_data(&self, user_id: &str, date: &str, data_type: &str) -> Option<Value> {
        let url = format!(
            "{}/{user_id}/{data_type}/date/{date}",
            self.config.fitbit_base_url.trim_end_matches('/')
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    phase = "lookup",
                    event = "activity_unavailable",
                    data_type,
                    url = %url,
                    error = %error,
                    "activity request failed"
                );
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                phase = "lookup",
                event = "activity_unavailable",
                data_type,
                url = %url,
                status = status.as_u16(),
                "activity endpoint returned an error status"
            );
            return None;
        }

        match response.json().await {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(
                    phase = "lookup",
                    event = "activity_unavailable",
                    data_type,
                    url = %url,
                    error = %error,
                    "activity payload was not JSON"
                );
                None
            }
        }
    }

    /// Daily summary of steps, sleep and resting heart rate.
    pub async fn activity_summary(&self, user_id: &str, date: &str) -> String {
        let activities = self.fitbit_data(user_id, date, "activities").await;
        let sleep = self.fitbit_data(user_id, date, "sleep").await;
        let heart = self.fitbit_data(user_id, date, "heart").await;

        format!(
            "On {date}:\n- Steps: {}\n- Sleep: {} minutes\n- Resting Heart Rate: {} bpm",
            field_or_na(activities.as_ref(), "TotalSteps"),
            field_or_na(sleep.as_ref(), "totalMinutesAsleep"),
            field_or_na(heart.as_ref(), "restingHeartRate"),
        )
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ToolError> {
    request.send().await.map_err(|err| {
        let retryable = err.is_timeout() || err.is_connect();
        ToolError::new(ToolErrorKind::Execution, err.to_string(), retryable)
    })
}

/// Successful bodies are returned as JSON; other statuses become an
/// `{"Error": status, "Message": body}` object the model can read.
async fn json_or_error_report(response: Response) -> Result<Value, ToolError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|err| ToolError::execution(format!("invalid JSON body: {err}")));
    }

    let body = response.text().await.unwrap_or_default();
    Ok(json!({ "Error": status.as_u16(), "Message": body }))
}

fn field_or_na(record: Option<&Value>, field: &str) -> String {
    match record.and_then(|record| record.get(field)) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Registers the lookup tools against a shared client.
pub fn register_lookups(
    registry: &mut ToolRegistry,
    client: FitnessClient,
) -> Result<(), SchemaError> {
    let nutrition = client.clone();
    registry.register_fn(
        tool_signature! {
            /// Fetch the nutritional information for a specific food item.
            ///
            /// :param query: The food item to get nutritional info for
            fn get_nutritional_info(query: String)
        },
        move |args, _ctx| {
            let client = nutrition.clone();
            async move {
                let query = required_string(&args, "query")?;
                client.nutritional_info(&query).await
            }
        },
    )?;

    let meals = client.clone();
    registry.register_fn(
        tool_signature! {
            /// Fetch a personalized meal plan based on user requirements.
            ///
            /// :param calories: Daily calorie goal
            /// :param diet: Optional diet type (e.g., 'balanced', 'low-fat', 'low-carb')
            /// :param health: Optional health label (e.g., 'vegan', 'vegetarian', 'peanut-free')
            fn get_meal_plan(calories: i64, diet: Option<String> = null, health: Option<String> = null)
        },
        move |args, _ctx| {
            let client = meals.clone();
            async move {
                let calories = required_i64(&args, "calories")?;
                let diet = optional_string(&args, "diet")?;
                let health = optional_string(&args, "health")?;
                client
                    .meal_plan(calories, diet.as_deref(), health.as_deref())
                    .await
            }
        },
    )?;

    registry.register_fn(
        tool_signature! {
            /// Process and return user activity data
            ///
            /// :param user_id: The unique identifier for the user
            /// :param date: The date for which to fetch smartwatch data
            fn handle_user_activity_data(user_id: String, date: String)
        },
        move |args, _ctx| {
            let client = client.clone();
            async move {
                let user_id = required_string(&args, "user_id")?;
                let date = required_string(&args, "date")?;
                Ok(Value::String(client.activity_summary(&user_id, &date).await))
            }
        },
    )?;

    Ok(())
}
