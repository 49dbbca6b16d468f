//! Runtime configuration for the API access layer.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default                 | Description                 |
//! |---------------------|----------|-------------------------|-----------------------------|
//! | `TODO_API_BASE_URL` | no       | `http://localhost:3002` | Base address of the service |
//!
//! A `.env` file in the working directory is loaded first if present.

pub const BASE_URL_VAR: &str = "TODO_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3002";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read configuration from the process environment (and `.env`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values fall
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}
