// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const API_URL_VAR: &str = "SKILLMATCH_API_URL";
pub const LOG_PATH_VAR: &str = "SKILLMATCH_LOG";
const CONFIG_FILE: &str = "skillmatch.yaml";
const DEFAULT_LOG_PATH: &str = "/tmp/skillmatch.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub environment: String,
}

/// One profile in `skillmatch.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
struct ProfileConfig {
    api_base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ProfileConfig,
    #[serde(default)]
    production: ProfileConfig,
}

/// Developer log file; `SKILLMATCH_LOG` or `/tmp/skillmatch.log`.
pub fn log_path() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var(LOG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_PATH))
}

impl ClientConfig {
    /// Load from `.env`, the process environment and `skillmatch.yaml` in the
    /// working directory. `api_url_override` (the CLI flag) wins over all.
    pub fn load(api_url_override: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let profile = Self::load_profile(Path::new(CONFIG_FILE), &environment)?;

        Self::resolve(
            environment,
            profile,
            api_url_override,
            std::env::var(API_URL_VAR).ok(),
        )
    }

    fn get_environment() -> String {
        std::env::var("SKILLMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_profile(path: &Path, environment: &str) -> Result<ProfileConfig> {
        if !path.exists() {
            return Ok(ProfileConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse_profile(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_profile(content: &str, environment: &str) -> Result<ProfileConfig> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn resolve(
        environment: String,
        profile: ProfileConfig,
        api_url_override: Option<String>,
        api_url_env: Option<String>,
    ) -> Result<Self> {
        let api_base_url = api_url_override
            .or(api_url_env)
            .or(profile.api_base_url)
            .filter(|url| !url.trim().is_empty())
            .with_context(|| {
                format!(
                    "No analysis service URL configured. Set {} or pass --api-url",
                    API_URL_VAR
                )
            })?;

        Ok(Self {
            api_base_url: api_base_url.trim().to_string(),
            environment,
        })
    }
}
