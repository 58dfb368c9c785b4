use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use rewards_domain::{parse_timezone, DbConfig, RuntimeConfig, DEFAULT_TIMEZONE};

use crate::config::validation::{
    validate_bind_addr, validate_database_name, LogFormat, StoreBackend,
};

pub const CONFIG_ENV: &str = "REWARDS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub timezone: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_format: LogFormat,
    pub log_dir: Option<String>,
    /// Path the file values came from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            store_backend: StoreBackend::Clickhouse,
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "rewards".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
            log_format: LogFormat::Text,
            log_dir: None,
            source: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config: AppConfig = toml::from_str(&content)?;
            config.source = Some(path.clone());
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides(|key| env::var(key).ok())?;
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.clickhouse_user = normalize_optional(self.clickhouse_user.take());
        self.clickhouse_password = normalize_optional(self.clickhouse_password.take());
        self.log_dir = normalize_optional(self.log_dir.take());
        self.timezone = self.timezone.trim().to_string();
        self.bind_addr = self.bind_addr.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bind_addr(&self.bind_addr)?;
        parse_timezone(&self.timezone)?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.store_backend == StoreBackend::Clickhouse {
            if self.clickhouse_url.trim().is_empty() {
                return Err(anyhow!("clickhouse_url is required for the clickhouse store"));
            }
            validate_database_name(&self.clickhouse_database)?;
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            timezone: parse_timezone(&self.timezone)?,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        })
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("REWARDS_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("REWARDS_STORE_BACKEND") {
            self.store_backend = parse_override("REWARDS_STORE_BACKEND", &value)?;
        }
        if let Some(value) = lookup("REWARDS_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Some(value) = lookup("REWARDS_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Some(value) = lookup("REWARDS_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Some(value) = lookup("REWARDS_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Some(value) = lookup("REWARDS_TIMEZONE") {
            self.timezone = value;
        }
        if let Some(value) = lookup("REWARDS_MAX_BODY_BYTES") {
            self.max_body_bytes = parse_override("REWARDS_MAX_BODY_BYTES", &value)?;
        }
        if let Some(value) = lookup("REWARDS_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds =
                parse_override("REWARDS_REQUEST_TIMEOUT_SECONDS", &value)?;
        }
        if let Some(value) = lookup("REWARDS_LOG_FORMAT") {
            self.log_format = parse_override("REWARDS_LOG_FORMAT", &value)?;
        }
        if let Some(value) = lookup("REWARDS_LOG_DIR") {
            self.log_dir = Some(value);
        }
        Ok(())
    }
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|err| anyhow!("invalid {}='{}': {}", key, value, err))
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
