use std::env;

use anyhow::{Result, anyhow};

use crate::poisson::{DEFAULT_MAX_GOALS, MAX_GOALS_LIMIT};

const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
const DEFAULT_FORM_LAST_N: u32 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub form_last_n: u32,
    pub max_goals: u32,
    pub cache_ttl_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            form_last_n: DEFAULT_FORM_LAST_N,
            max_goals: DEFAULT_MAX_GOALS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unparseable values fall back to
    /// defaults and numeric values are clamped to sane ranges.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("API_FOOTBALL_KEY");
        let base_url = get("API_FOOTBALL_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let form_last_n = get("FORM_LAST_N")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_FORM_LAST_N)
            .clamp(1, 50);
        let max_goals = get("MAX_GOALS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_GOALS)
            .min(MAX_GOALS_LIMIT);
        let cache_ttl_secs = get("CACHE_TTL_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        let http_timeout_secs = get("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
            .clamp(1, 120);

        Self {
            api_key,
            base_url,
            form_last_n,
            max_goals,
            cache_ttl_secs,
            http_timeout_secs,
        }
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("API_FOOTBALL_KEY is not set (export it or add it to .env)"))
    }
}
