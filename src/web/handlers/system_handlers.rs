// src/web/handlers/system_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::core::gate::{AccessGate, FlagStatus};
use crate::types::portfolio_data::PortfolioData;
use crate::web::types::*;

pub async fn health_handler(gate: &State<AccessGate>) -> Result<Json<TextResponse>, ApiError> {
    if let Err(e) = gate.database().health_check().await {
        error!("Health check failed: {}", e);
        return Err(api_error(
            Status::ServiceUnavailable,
            "Database unavailable",
            "DATABASE_ERROR",
            &["Check the database path in config.yaml"],
        ));
    }
    Ok(Json(TextResponse::success("OK".to_string())))
}

pub async fn sample_handler() -> Json<PortfolioData> {
    Json(PortfolioData::sample())
}

pub async fn flags_handler(
    gate: &State<AccessGate>,
) -> Result<Json<DataResponse<Vec<FlagStatus>>>, ApiError> {
    match gate.flags().await {
        Ok(flags) => Ok(Json(DataResponse::success(
            format!("{} feature flags", flags.len()),
            flags,
        ))),
        Err(e) => {
            error!("Failed to read feature flags: {}", e);
            Err(api_error(
                Status::InternalServerError,
                "Failed to read feature flags",
                "DATABASE_ERROR",
                &["Try again in a few moments"],
            ))
        }
    }
}

pub async fn waitlist_handler(
    request: Json<WaitlistRequest>,
    gate: &State<AccessGate>,
) -> Result<Json<ActionResponse>, ApiError> {
    let request = request.into_inner();

    match gate.join_waitlist(&request.email, request.feature).await {
        Ok(added) => {
            info!("Waitlist request for {} (new: {})", request.feature, added);
            let message = if added {
                format!("You're on the {} waitlist", request.feature)
            } else {
                format!("You're already on the {} waitlist", request.feature)
            };
            Ok(Json(ActionResponse::success(message, "waitlist_joined".to_string())))
        }
        Err(e) => Err(api_error(
            Status::BadRequest,
            e.to_string(),
            "INVALID_EMAIL",
            &["Provide a valid email address"],
        )),
    }
}
