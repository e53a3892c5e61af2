use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::mentor::responses::SalaryDetail;

const TOKEN_PREFIX: &str = "hf_";

/// Application configuration loaded from environment variables.
/// Startup fails if the inference token is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub hf_token: String,
    pub database_url: String,
    pub inference_base_url: String,
    pub inference_model: String,
    pub inference_timeout: Duration,
    pub prompt_cache_capacity: usize,
    pub salary_detail: SalaryDetail,
    pub generative_replies: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout_secs = optional("INFERENCE_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .context("INFERENCE_TIMEOUT_SECS must be a whole number of seconds")?;
        if !(1..=120).contains(&timeout_secs) {
            bail!("INFERENCE_TIMEOUT_SECS must be between 1 and 120, got {timeout_secs}");
        }

        let prompt_cache_capacity = optional("PROMPT_CACHE_CAPACITY", "100")
            .parse::<usize>()
            .context("PROMPT_CACHE_CAPACITY must be a positive integer")?;
        if prompt_cache_capacity == 0 {
            bail!("PROMPT_CACHE_CAPACITY must be greater than zero");
        }

        Ok(Config {
            hf_token: validate_token(lookup("HF_TOKEN"))?,
            database_url: optional("DATABASE_URL", "sqlite://data/jobs.db"),
            inference_base_url: optional(
                "INFERENCE_BASE_URL",
                "https://api-inference.huggingface.co",
            ),
            inference_model: optional("INFERENCE_MODEL", "HuggingFaceH4/zephyr-7b-beta"),
            inference_timeout: Duration::from_secs(timeout_secs),
            prompt_cache_capacity,
            salary_detail: optional("SALARY_DETAIL", "range").parse()?,
            generative_replies: parse_flag(&optional("GENERATIVE_REPLIES", "false"))
                .context("GENERATIVE_REPLIES must be true or false")?,
            port: optional("PORT", "7860")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}

fn validate_token(token: Option<String>) -> Result<String> {
    let token = token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .context("Required environment variable 'HF_TOKEN' is not set")?;

    if !token.starts_with(TOKEN_PREFIX) || token.len() <= TOKEN_PREFIX.len() {
        bail!("HF_TOKEN is malformed: expected a token starting with '{TOKEN_PREFIX}'");
    }
    Ok(token)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean flag '{other}'"),
    }
}
