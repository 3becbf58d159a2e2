use std::{
    env, fs,
    path::PathBuf,
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::Deserialize;

pub const CONFIG_PATH_ENV: &str = "GH_ISSUES_CSV_CONFIG";
pub const API_URL_ENV: &str = "GH_ISSUES_CSV_API_URL";
const LOCAL_CONFIG_FILE: &str = "gh-issues-csv.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("gh-issues-csv/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

pub fn parse_config(src: &str) -> Result<Config> {
    let mut cfg: Config = toml::from_str(src).context("failed to parse config TOML")?;
    normalize_config(&mut cfg);
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Loads the first config file found, or the defaults when there is none,
/// then applies the API URL override from the environment.
pub fn load_config() -> Result<Config> {
    let mut cfg = match resolve_config_path()? {
        Some(path) => {
            let src = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&src).with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(url) = env::var_os(API_URL_ENV) {
        cfg.api_base_url = url
            .into_string()
            .map_err(|_| anyhow!("{API_URL_ENV} is not valid UTF-8"))?;
        normalize_config(&mut cfg);
        validate_config(&cfg)?;
    }

    Ok(cfg)
}

pub fn resolve_config_path() -> Result<Option<PathBuf>> {
    if let Some(raw) = env::var_os(CONFIG_PATH_ENV) {
        let explicit = PathBuf::from(raw);
        if !explicit.exists() {
            return Err(anyhow!(
                "{CONFIG_PATH_ENV} points to a missing file: {}",
                explicit.display()
            ));
        }
        return Ok(Some(explicit));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(default_config_path().filter(|path| path.exists()))
}

pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("gh-issues-csv")
            .join("config.toml")
    })
}

fn normalize_config(cfg: &mut Config) {
    let trimmed = cfg.api_base_url.trim().trim_end_matches('/');
    cfg.api_base_url = trimmed.to_string();
}

fn validate_config(cfg: &Config) -> Result<()> {
    let scheme_ok =
        cfg.api_base_url.starts_with("http://") || cfg.api_base_url.starts_with("https://");
    if !scheme_ok {
        return Err(anyhow!(
            "api_base_url '{}' must start with http:// or https://",
            cfg.api_base_url
        ));
    }

    if cfg.user_agent.trim().is_empty() {
        return Err(anyhow!("user_agent must not be empty"));
    }

    if cfg.request_timeout_seconds == 0 {
        return Err(anyhow!("request_timeout_seconds must be >= 1"));
    }

    Ok(())
}
