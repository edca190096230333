// src/deploy/mod.rs
//! Publishing a generated site to a hosting provider

pub mod github;
pub mod netlify;

pub use github::GithubDeployer;
pub use netlify::NetlifyDeployer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::core::gate::FeatureFlag;
use crate::generator::GeneratedSite;
use crate::utils::normalize_site_name;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Github,
    Netlify,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Github, Provider::Netlify];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Netlify => "netlify",
        }
    }

    pub fn feature_flag(&self) -> FeatureFlag {
        match self {
            Self::Github => FeatureFlag::GithubDeploy,
            Self::Netlify => FeatureFlag::NetlifyDeploy,
        }
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "github" | "gh" => Ok(Self::Github),
            "netlify" => Ok(Self::Netlify),
            other => anyhow::bail!("Unknown provider: {}. Use github or netlify", other),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a site goes: repository or site name, plus the credential
#[derive(Debug, Clone)]
pub struct DeployTarget {
    pub name: String,
    pub description: Option<String>,
    pub token: String,
}

impl DeployTarget {
    pub fn new(name: &str, token: &str) -> Self {
        Self {
            name: normalize_site_name(name),
            description: None,
            token: token.trim().to_string(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployOutcome {
    pub live_url: String,
    pub admin_url: String,
}

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("No {0} access token provided")]
    MissingToken(Provider),
    #[error("{provider} rejected the access token")]
    Unauthorized { provider: Provider },
    #[error("{provider} API returned {status} while trying to {step}: {body}")]
    Api {
        provider: Provider,
        step: &'static str,
        status: u16,
        body: String,
    },
    #[error("Request to {provider} failed: {message}")]
    Transport { provider: Provider, message: String },
    #[error("Unexpected response from {provider}: {message}")]
    InvalidResponse { provider: Provider, message: String },
}

impl DeployError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken(_) => "MISSING_TOKEN",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Api { .. } => "PROVIDER_ERROR",
            Self::Transport { .. } => "PROVIDER_UNREACHABLE",
            Self::InvalidResponse { .. } => "PROVIDER_INVALID_RESPONSE",
        }
    }
}

#[async_trait]
pub trait SiteDeployer: Send + Sync {
    fn provider(&self) -> Provider;

    async fn deploy(
        &self,
        site: &GeneratedSite,
        target: &DeployTarget,
    ) -> Result<DeployOutcome, DeployError>;
}

pub(crate) fn http_client(provider: Provider, timeout_seconds: u64) -> Result<reqwest::Client, DeployError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| DeployError::Transport {
            provider,
            message: e.to_string(),
        })
}

pub(crate) fn transport_error(provider: Provider) -> impl Fn(reqwest::Error) -> DeployError {
    move |e| DeployError::Transport {
        provider,
        message: e.to_string(),
    }
}

/// Pass successful responses through; map auth failures and other statuses to `DeployError`
pub(crate) async fn ensure_success(
    provider: Provider,
    step: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, DeployError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(DeployError::Unauthorized { provider });
    }

    let body = response.text().await.unwrap_or_default();
    Err(DeployError::Api {
        provider,
        step,
        status: status.as_u16(),
        body,
    })
}

pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    provider: Provider,
    response: reqwest::Response,
) -> Result<T, DeployError> {
    response
        .json::<T>()
        .await
        .map_err(|e| DeployError::InvalidResponse {
            provider,
            message: e.to_string(),
        })
}
