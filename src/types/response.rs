// src/types/response.rs
//! Wire types exchanged with the extraction service and returned by the API

use serde::{Deserialize, Serialize};

use crate::types::portfolio_data::PortfolioData;

// ===== Extraction Service =====

/// Success body of `POST /process-resume`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResumeResponse {
    pub portfolio_data: PortfolioData,
}

/// Raw success body before checking that `portfolioData` is present
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProcessResumeResponse {
    pub portfolio_data: Option<PortfolioData>,
}

/// Structured failure body `{ "type": ..., "details": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub details: String,
}

pub const NOT_RESUME: &str = "NOT_RESUME";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const RATE_LIMITED: &str = "RATE_LIMITED";
pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";

impl ExtractionErrorBody {
    pub fn new(kind: &str, details: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            details: details.into(),
        }
    }
}

// ===== Deployment =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubDeployResponse {
    pub repo_url: String,
    pub pages_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetlifyDeployResponse {
    pub url: String,
    pub admin_url: String,
}
