// src/web/types.rs

use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::core::config_manager::ServiceConfig;
use crate::core::gate::FeatureFlag;
use crate::generator::SiteFile;
use crate::types::portfolio_data::{PortfolioData, ValidationIssue};

pub struct ServerConfig {
    pub service: ServiceConfig,
}

// ===== Requests =====

#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub file: TempFile<'f>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct GithubDeployRequest {
    pub portfolio_data: PortfolioData,
    pub repo_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub token: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct NetlifyDeployRequest {
    pub portfolio_data: PortfolioData,
    pub site_name: String,
    pub token: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct WaitlistRequest {
    pub email: String,
    pub feature: FeatureFlag,
}

// ===== Responses =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ExportData {
    pub files: Vec<SiteFile>,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

pub type ApiError = (Status, Json<StandardErrorResponse>);

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

pub fn api_error(status: Status, error: impl Into<String>, error_code: &str, suggestions: &[&str]) -> ApiError {
    (
        status,
        Json(StandardErrorResponse::new(
            error.into(),
            error_code.to_string(),
            suggestions.iter().map(|s| s.to_string()).collect(),
        )),
    )
}
