// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::FsOps;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub output_path: PathBuf,
    pub database_path: PathBuf,
    pub credentials_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output"),
            database_path: PathBuf::from("data/folio.db"),
            credentials_path: PathBuf::from("data/credentials.json"),
        }
    }
}

impl EnvironmentConfig {
    /// Load `config.yaml` from the working directory for the active environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_from(Path::new("config.yaml"), &environment)
    }

    pub fn get_environment() -> String {
        std::env::var("FOLIO_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from(config_path: &Path, environment: &str) -> Result<Self> {
        let env_config = if config_path.exists() {
            let config_content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;

            let config_file: ConfigFile = serde_yaml::from_str(&config_content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;

            match environment {
                "production" => config_file.production,
                _ => config_file.local,
            }
        } else {
            warn!(
                "{} not found, using built-in local defaults",
                config_path.display()
            );
            Self::default()
        };

        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self {
            output_path: FsOps::normalize_path(&current_dir, &env_config.output_path),
            database_path: FsOps::normalize_path(&current_dir, &env_config.database_path),
            credentials_path: FsOps::normalize_path(&current_dir, &env_config.credentials_path),
        })
    }

    /// Create the output directory and the parents of the database and credential files
    pub async fn ensure_directories(&self) -> Result<()> {
        FsOps::ensure_dir_exists(&self.output_path).await?;

        for file in [&self.database_path, &self.credentials_path] {
            if let Some(parent) = file.parent() {
                FsOps::ensure_dir_exists(parent).await?;
            }
        }

        info!("All configured directories ensured to exist");
        Ok(())
    }
}
