//! Application configuration loaded from environment variables.
//!
//! Only the auth secret is required. The hosted services (document store,
//! generation endpoint, payment processor, photo search) are optional; the
//! features backed by a missing service degrade instead of failing startup.

use std::env;

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_PEXELS_API_BASE: &str = "https://api.pexels.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS and checkout redirects
    pub frontend_url: String,
    /// GCP project ID; `None` selects the in-memory store
    pub gcp_project_id: Option<String>,
    /// Server port
    pub port: u16,
    /// Text-to-flashcard endpoint
    pub generation_api_url: Option<String>,
    pub stripe_api_base: String,
    pub pexels_api_base: String,

    // --- Secrets ---
    /// Shared secret used to verify session JWTs from the auth provider
    pub jwt_signing_key: Vec<u8>,
    pub stripe_secret_key: Option<String>,
    pub pexels_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: optional_var("GCP_PROJECT_ID"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            generation_api_url: optional_var("GENERATION_API_URL"),
            stripe_api_base: optional_var("STRIPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            pexels_api_base: optional_var("PEXELS_API_BASE")
                .unwrap_or_else(|| DEFAULT_PEXELS_API_BASE.to_string()),

            jwt_signing_key: env::var("AUTH_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("AUTH_JWT_SECRET"))?
                .into_bytes(),
            stripe_secret_key: optional_var("STRIPE_SECRET_KEY"),
            pexels_api_key: optional_var("PEXELS_API_KEY"),
        })
    }

    /// Deterministic configuration for tests: in-memory store, no hosted services.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: None,
            port: 8080,
            generation_api_url: None,
            stripe_api_base: DEFAULT_STRIPE_API_BASE.to_string(),
            pexels_api_base: DEFAULT_PEXELS_API_BASE.to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            stripe_secret_key: None,
            pexels_api_key: None,
        }
    }
}

/// Read an env var, treating unset and blank the same.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
