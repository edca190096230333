// src/core/config_manager.rs
//! Unified configuration: `config.yaml` paths plus environment variable overrides

use anyhow::{Context, Result};
use std::str::FromStr;
use tracing::info;

use crate::core::gate::QuotaLimits;
use crate::environment::EnvironmentConfig;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_EXTRACTION_URL: &str = "http://127.0.0.1:5555";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_NETLIFY_API_URL: &str = "https://api.netlify.com/api/v1";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
    pub quotas: QuotaLimits,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub extraction_url: String,
    pub github_api_url: String,
    pub netlify_api_url: String,
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            extraction_url: DEFAULT_EXTRACTION_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            netlify_api_url: DEFAULT_NETLIFY_API_URL.to_string(),
            timeout_seconds: crate::core::service_client::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConfigManager {
    pub fn load() -> Result<Self> {
        let environment = EnvironmentConfig::load()?;
        Self::from_parts(environment, |key| std::env::var(key).ok())
    }

    /// Build from an environment config and a variable lookup
    pub fn from_parts<F>(environment: EnvironmentConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();
        let quota_defaults = QuotaLimits::default();

        let service = ServiceConfig {
            extraction_url: lookup("EXTRACTION_SERVICE_URL").unwrap_or(defaults.extraction_url),
            github_api_url: lookup("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            netlify_api_url: lookup("NETLIFY_API_URL").unwrap_or(defaults.netlify_api_url),
            timeout_seconds: parse_var(&lookup, "SERVICE_TIMEOUT_SECS", defaults.timeout_seconds)?,
        };

        let quotas = QuotaLimits {
            resume_per_day: parse_var(&lookup, "DAILY_RESUME_QUOTA", quota_defaults.resume_per_day)?,
            deploy_per_day: parse_var(&lookup, "DAILY_DEPLOY_QUOTA", quota_defaults.deploy_per_day)?,
        };

        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;

        info!(
            "Configuration loaded: port {}, extraction service {}",
            port, service.extraction_url
        );

        Ok(Self {
            environment,
            service,
            quotas,
            port,
        })
    }

    pub async fn ensure_directories(&self) -> Result<()> {
        self.environment.ensure_directories().await
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Result<ConfigManager> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigManager::from_parts(EnvironmentConfig::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.service, ServiceConfig::default());
        assert_eq!(config.quotas, QuotaLimits::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = load_with(&[
            ("PORT", "9100"),
            ("EXTRACTION_SERVICE_URL", "http://extract:7000"),
            ("GITHUB_API_URL", "http://github.local"),
            ("DAILY_RESUME_QUOTA", "3"),
            ("DAILY_DEPLOY_QUOTA", " 7 "),
        ])
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.service.extraction_url, "http://extract:7000");
        assert_eq!(config.service.github_api_url, "http://github.local");
        assert_eq!(config.service.netlify_api_url, DEFAULT_NETLIFY_API_URL);
        assert_eq!(config.quotas.resume_per_day, 3);
        assert_eq!(config.quotas.deploy_per_day, 7);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        assert!(load_with(&[("PORT", "eighty")]).is_err());
        assert!(load_with(&[("DAILY_RESUME_QUOTA", "-1")]).is_err());
    }
}
