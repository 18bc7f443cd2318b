//! API client for communicating with the planner service

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// API client for the planner service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, error_detail(&body));
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a GET request without failing on non-2xx statuses
    ///
    /// Health endpoints answer 503 with a JSON body when a component is
    /// down, and that body is the answer rather than an error.
    pub async fn get_any_status<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, error_detail(&body));
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with JSON body, returning the response as text
    pub async fn post_text<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, error_detail(&body));
        }

        response.text().await.context("Failed to read response")
    }
}

/// Decode a structured server error body, falling back to the raw text
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => match err.details {
            Some(details) => format!("{} ({})", err.error, details),
            None => err.error,
        },
        Err(_) => body.to_string(),
    }
}

// API request and response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub gender: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: String,
    pub goal: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub bmi: f64,
    pub diet_style: String,
    pub calorie_range: CalorieRange,
    pub macros_g: MacroTargets,
    pub meal_suggestions: Vec<String>,
    pub exercise_suggestions: Vec<String>,
    pub exercise_note: String,
    pub raw: RawMetabolics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieRange {
    pub low: i64,
    pub high: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMetabolics {
    pub bmr: i64,
    pub tdee: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
