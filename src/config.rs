use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            rates: RatesConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Backend API endpoints and paging
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the order/material store API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL for line-item preview assets (svg_url is relative to this)
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Default page size for list commands
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            asset_base_url: default_asset_base_url(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

/// Exchange-rate provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatesConfig {
    /// EUR-base rate table endpoint
    #[serde(default = "default_rates_url")]
    pub url: String,

    /// How long a fetched rate table stays fresh
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            url: default_rates_url(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Override for the session state file (defaults to the user data dir)
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://flusk-backend.onrender.com/api".to_string()
}

fn default_asset_base_url() -> String {
    "https://flusk-backend.onrender.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u32 {
    10
}

fn default_rates_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/EUR".to_string()
}

fn default_cache_ttl_seconds() -> u64 {
    3600
}

pub fn load_config() -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("CNC_ADMIN").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.api.base_url.is_empty() {
        anyhow::bail!("api.base_url cannot be empty");
    }
    if url::Url::parse(&cfg.api.base_url).is_err() {
        anyhow::bail!("api.base_url is not a valid URL: {}", cfg.api.base_url);
    }
    if url::Url::parse(&cfg.api.asset_base_url).is_err() {
        anyhow::bail!(
            "api.asset_base_url is not a valid URL: {}",
            cfg.api.asset_base_url
        );
    }
    if url::Url::parse(&cfg.rates.url).is_err() {
        anyhow::bail!("rates.url is not a valid URL: {}", cfg.rates.url);
    }
    if cfg.api.page_size == 0 {
        anyhow::bail!("api.page_size must be at least 1");
    }
    if cfg.api.timeout_seconds == 0 {
        anyhow::bail!("api.timeout_seconds must be at least 1");
    }

    Ok(())
}
