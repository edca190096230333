// src/web/handlers/resume_handlers.rs
//! Resume upload, validation and extraction

use rocket::form::Form;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use std::net::IpAddr;
use tracing::{error, info, info_span, warn, Instrument};

use crate::core::gate::{AccessGate, FeatureFlag, GateDecision};
use crate::core::{FsOps, ResumeExtractionClient};
use crate::types::response::{
    ExtractionErrorBody, ProcessResumeResponse, RATE_LIMITED, SERVICE_UNAVAILABLE, UPSTREAM_ERROR,
    VALIDATION_ERROR,
};
use crate::upload_validator::UploadValidator;
use crate::web::types::ResumeUploadForm;

pub type ResumeError = (Status, Json<ExtractionErrorBody>);

fn resume_error(status: Status, kind: &str, details: impl Into<String>) -> ResumeError {
    (status, Json(ExtractionErrorBody::new(kind, details)))
}

pub fn subject_for(client_ip: Option<IpAddr>) -> String {
    client_ip
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn process_resume_handler(
    upload: Form<ResumeUploadForm<'_>>,
    client_ip: Option<IpAddr>,
    gate: &State<AccessGate>,
    client: &State<ResumeExtractionClient>,
) -> Result<Json<ProcessResumeResponse>, ResumeError> {
    let subject = subject_for(client_ip);
    let span = info_span!(
        "process_resume",
        request_id = %uuid::Uuid::new_v4(),
        subject = %subject
    );

    process_resume(upload, subject, gate, client)
        .instrument(span)
        .await
}

async fn process_resume(
    mut upload: Form<ResumeUploadForm<'_>>,
    subject: String,
    gate: &AccessGate,
    client: &ResumeExtractionClient,
) -> Result<Json<ProcessResumeResponse>, ResumeError> {
    let decision = gate
        .check_and_consume(FeatureFlag::ResumeProcessing, &subject)
        .await
        .map_err(|e| {
            error!("Gate check failed: {}", e);
            resume_error(
                Status::ServiceUnavailable,
                SERVICE_UNAVAILABLE,
                "Resume processing is temporarily unavailable",
            )
        })?;

    match decision {
        GateDecision::Allowed { remaining } => {
            info!("Resume processing allowed, {} left today", remaining)
        }
        GateDecision::Disabled => {
            return Err(resume_error(
                Status::ServiceUnavailable,
                SERVICE_UNAVAILABLE,
                decision.message(FeatureFlag::ResumeProcessing),
            ))
        }
        GateDecision::QuotaExhausted { .. } => {
            return Err(resume_error(
                Status::TooManyRequests,
                RATE_LIMITED,
                decision.message(FeatureFlag::ResumeProcessing),
            ))
        }
    }

    let file_name = upload
        .file
        .raw_name()
        .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "resume.pdf".to_string());

    let temp_path = std::env::temp_dir().join(format!("resume_upload_{}", uuid::Uuid::new_v4()));
    if let Err(e) = upload.file.persist_to(&temp_path).await {
        error!("Failed to save uploaded file: {}", e);
        return Err(resume_error(
            Status::InternalServerError,
            UPSTREAM_ERROR,
            "Failed to process uploaded file",
        ));
    }

    let validated = UploadValidator::validate_file(&temp_path).await;
    if let Err(e) = FsOps::remove_file_if_exists(&temp_path).await {
        warn!("{}", e);
    }

    let bytes = validated.map_err(|e| {
        warn!("Rejected upload {}: {}", file_name, e.message);
        resume_error(
            Status::BadRequest,
            VALIDATION_ERROR,
            format!("{}. {}", e.message, e.suggestion),
        )
    })?;

    match client.process_resume(bytes, &file_name).await {
        Ok(portfolio_data) => {
            info!(
                "Extracted portfolio for {}",
                if portfolio_data.settings.name.is_empty() {
                    "unnamed resume"
                } else {
                    portfolio_data.settings.name.as_str()
                }
            );
            Ok(Json(ProcessResumeResponse { portfolio_data }))
        }
        Err(e) => {
            warn!("Extraction failed: {}", e);
            let status = match e.kind() {
                RATE_LIMITED => Status::TooManyRequests,
                VALIDATION_ERROR => Status::BadRequest,
                SERVICE_UNAVAILABLE | UPSTREAM_ERROR => Status::BadGateway,
                _ => Status::UnprocessableEntity,
            };
            Err((status, Json(e.to_body())))
        }
    }
}
