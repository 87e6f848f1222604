use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://subscriptions.db";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_STATIC_DIR: &str = "static";

/// Application configuration loaded from environment variables.
/// Fails at startup if the payment provider key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    /// Resolved against the working directory at runtime.
    pub static_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            stripe_secret_key: lookup("STRIPE_SECRET_KEY").with_context(|| {
                "Required environment variable 'STRIPE_SECRET_KEY' is not set".to_string()
            })?,
            stripe_api_base: env_or("STRIPE_API_BASE", DEFAULT_STRIPE_API_BASE),
            static_dir: env_or("STATIC_DIR", DEFAULT_STATIC_DIR),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}
