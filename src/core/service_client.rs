// src/core/service_client.rs
//! HTTP client for the resume extraction service

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::types::portfolio_data::PortfolioData;
use crate::types::response::{
    ExtractionErrorBody, RawProcessResumeResponse, NOT_RESUME, RATE_LIMITED, SERVICE_UNAVAILABLE,
    UPSTREAM_ERROR, VALIDATION_ERROR,
};

const PROCESS_RESUME_ENDPOINT: &str = "/process-resume";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("The uploaded document does not look like a resume: {0}")]
    NotResume(String),
    #[error("The resume could not be validated: {0}")]
    Validation(String),
    #[error("Extraction service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Extraction service response had no portfolio data")]
    MissingData,
    #[error("Extraction service is unreachable: {0}")]
    Unavailable(String),
}

impl ExtractionError {
    /// The `type` value reported to API clients
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotResume(_) => NOT_RESUME,
            Self::Validation(_) => VALIDATION_ERROR,
            Self::Upstream { status: 429, .. } => RATE_LIMITED,
            Self::Unavailable(_) => SERVICE_UNAVAILABLE,
            Self::Upstream { .. } | Self::MissingData => UPSTREAM_ERROR,
        }
    }

    pub fn to_body(&self) -> ExtractionErrorBody {
        let details = match self {
            Self::NotResume(details) | Self::Validation(details) => details.clone(),
            other => other.to_string(),
        };
        ExtractionErrorBody::new(self.kind(), details)
    }
}

pub struct ResumeExtractionClient {
    client: reqwest::Client,
    base_url: String,
}

impl ResumeExtractionClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a validated PDF and receive the extracted portfolio document
    pub async fn process_resume(
        &self,
        file_bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<PortfolioData, ExtractionError> {
        let url = format!("{}{}", self.base_url, PROCESS_RESUME_ENDPOINT);

        let part = Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| ExtractionError::Unavailable(e.to_string()))?;
        let form = Form::new().part("file", part);

        info!("Calling resume extraction service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Extraction request failed: {}", e);
                ExtractionError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::Unavailable(e.to_string()))?;
        debug!("Extraction service responded {} ({} bytes)", status, body.len());

        Self::interpret_response(status, &body)
    }

    fn interpret_response(status: StatusCode, body: &str) -> Result<PortfolioData, ExtractionError> {
        if let Ok(structured) = serde_json::from_str::<ExtractionErrorBody>(body) {
            match structured.kind.as_str() {
                NOT_RESUME => return Err(ExtractionError::NotResume(structured.details)),
                VALIDATION_ERROR => return Err(ExtractionError::Validation(structured.details)),
                _ => {}
            }
        }

        if !status.is_success() {
            error!("Extraction service error {}: {}", status, body);
            return Err(ExtractionError::Upstream {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }

        let parsed: RawProcessResumeResponse = serde_json::from_str(body).map_err(|e| {
            error!("Unparseable extraction response: {}", e);
            ExtractionError::MissingData
        })?;

        parsed.portfolio_data.ok_or(ExtractionError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_errors_map_to_variants() {
        let err = ResumeExtractionClient::interpret_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"type":"NOT_RESUME","details":"This is an invoice"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ExtractionError::NotResume(ref d) if d == "This is an invoice"));
        assert_eq!(err.kind(), "NOT_RESUME");

        let err = ResumeExtractionClient::interpret_response(
            StatusCode::BAD_REQUEST,
            r#"{"type":"VALIDATION_ERROR","details":"Too many pages"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_body().details, "Too many pages");
    }

    #[test]
    fn test_success_without_data_is_failure() {
        let err = ResumeExtractionClient::interpret_response(StatusCode::OK, r#"{"status":"ok"}"#)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::MissingData));
        assert_eq!(err.kind(), "UPSTREAM_ERROR");
    }

    #[test]
    fn test_rate_limit_kind() {
        let err = ResumeExtractionClient::interpret_response(StatusCode::TOO_MANY_REQUESTS, "slow down")
            .unwrap_err();
        assert_eq!(err.kind(), "RATE_LIMITED");
    }

    #[test]
    fn test_success_parses_partial_document() {
        let data = ResumeExtractionClient::interpret_response(
            StatusCode::OK,
            r#"{"portfolioData":{"settings":{"name":"Sam Lee","title":"Designer"}}}"#,
        )
        .unwrap();
        assert_eq!(data.settings.name, "Sam Lee");
        assert!(data.sections.about.enabled);
    }
}
