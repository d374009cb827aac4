use anyhow::{Context, Result};

use crate::recommendation::engine::ScoringWeights;

const DEFAULT_AI_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_CHAT_MODEL: &str = "google/gemini-2.5-flash";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_api_key: String,
    /// Assistant chat is disabled when unset.
    pub ai_gateway_api_key: Option<String>,
    pub ai_gateway_url: String,
    pub chat_model: String,
    pub port: u16,
    pub rust_log: String,
    pub scoring_weights: ScoringWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            admin_api_key: require_env("ADMIN_API_KEY")?,
            ai_gateway_api_key: std::env::var("AI_GATEWAY_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            ai_gateway_url: std::env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_AI_GATEWAY_URL.to_string()),
            chat_model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring_weights: weights_from_lookup(|key| std::env::var(key).ok())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Builds scoring weights from `SCORE_WEIGHT_*` overrides, keeping defaults for unset keys.
fn weights_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ScoringWeights> {
    let defaults = ScoringWeights::default();
    let read = |key: &str, default: u32| -> Result<u32> {
        match lookup(key) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
            None => Ok(default),
        }
    };

    Ok(ScoringWeights {
        sector: read("SCORE_WEIGHT_SECTOR", defaults.sector)?,
        skill: read("SCORE_WEIGHT_SKILL", defaults.skill)?,
        remote: read("SCORE_WEIGHT_REMOTE", defaults.remote)?,
        city: read("SCORE_WEIGHT_CITY", defaults.city)?,
        education: read("SCORE_WEIGHT_EDUCATION", defaults.education)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_default_when_unset() {
        let weights = weights_from_lookup(|_| None).unwrap();
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_weight_override_applies() {
        let weights = weights_from_lookup(|key| {
            (key == "SCORE_WEIGHT_SECTOR").then(|| " 10 ".to_string())
        })
        .unwrap();
        assert_eq!(weights.sector, 10);
        assert_eq!(weights.skill, 10);
        assert_eq!(weights.education, 5);
    }

    #[test]
    fn test_invalid_weight_is_rejected() {
        let err = weights_from_lookup(|key| {
            (key == "SCORE_WEIGHT_CITY").then(|| "-3".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("SCORE_WEIGHT_CITY"));
    }
}
