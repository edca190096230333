// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::core::gate::AccessGate;
use crate::core::{ConfigManager, Database, ResumeExtractionClient};
use crate::types::portfolio_data::PortfolioData;
use crate::types::response::{
    ExtractionErrorBody, GithubDeployResponse, NetlifyDeployResponse, ProcessResumeResponse,
};
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::net::IpAddr;
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/health")]
pub async fn health(gate: &State<AccessGate>) -> Result<Json<TextResponse>, ApiError> {
    handlers::health_handler(gate).await
}

#[get("/sample")]
pub async fn sample() -> Json<PortfolioData> {
    handlers::sample_handler().await
}

#[post("/preview?<theme>", data = "<data>")]
pub async fn preview(
    data: Json<PortfolioData>,
    theme: Option<&str>,
) -> Result<RawHtml<String>, ApiError> {
    handlers::preview_handler(data, theme).await
}

#[post("/export?<mode>", data = "<data>")]
pub async fn export(
    data: Json<PortfolioData>,
    mode: Option<&str>,
) -> Result<Json<DataResponse<ExportData>>, ApiError> {
    handlers::export_handler(data, mode).await
}

#[post("/process-resume", data = "<upload>")]
pub async fn process_resume(
    upload: Form<ResumeUploadForm<'_>>,
    client_ip: Option<IpAddr>,
    gate: &State<AccessGate>,
    client: &State<ResumeExtractionClient>,
) -> Result<Json<ProcessResumeResponse>, (Status, Json<ExtractionErrorBody>)> {
    handlers::process_resume_handler(upload, client_ip, gate, client).await
}

#[post("/deploy/github", data = "<request>")]
pub async fn deploy_github(
    request: Json<GithubDeployRequest>,
    client_ip: Option<IpAddr>,
    gate: &State<AccessGate>,
    config: &State<ServerConfig>,
) -> Result<Json<GithubDeployResponse>, ApiError> {
    handlers::github_deploy_handler(request, client_ip, gate, config).await
}

#[post("/deploy/netlify", data = "<request>")]
pub async fn deploy_netlify(
    request: Json<NetlifyDeployRequest>,
    client_ip: Option<IpAddr>,
    gate: &State<AccessGate>,
    config: &State<ServerConfig>,
) -> Result<Json<NetlifyDeployResponse>, ApiError> {
    handlers::netlify_deploy_handler(request, client_ip, gate, config).await
}

#[get("/flags")]
pub async fn flags(
    gate: &State<AccessGate>,
) -> Result<Json<DataResponse<Vec<crate::core::gate::FlagStatus>>>, ApiError> {
    handlers::flags_handler(gate).await
}

#[post("/waitlist", data = "<request>")]
pub async fn waitlist(
    request: Json<WaitlistRequest>,
    gate: &State<AccessGate>,
) -> Result<Json<ActionResponse>, ApiError> {
    handlers::waitlist_handler(request, gate).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("No route for {} {}", request.method(), request.uri()),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body is too large".to_string(),
        "PAYLOAD_TOO_LARGE".to_string(),
        vec!["Upload a PDF smaller than 2MB".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Verify the portfolio data matches the expected shape".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the Rocket instance with managed state, routes and catchers
pub fn build_rocket(config: &ConfigManager, gate: AccessGate) -> Result<Rocket<Build>> {
    let limits = Limits::default()
        .limit("file", 3.mebibytes())
        .limit("data-form", 3.mebibytes())
        .limit("json", 5.mebibytes());

    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", config.port))
        .merge(("limits", limits));

    let client = ResumeExtractionClient::new(
        &config.service.extraction_url,
        config.service.timeout_seconds,
    )?;

    let server_config = ServerConfig {
        service: config.service.clone(),
    };

    Ok(rocket::custom(figment)
        .attach(Cors)
        .manage(server_config)
        .manage(gate)
        .manage(client)
        .register(
            "/api",
            catchers![
                bad_request,
                not_found,
                payload_too_large,
                unprocessable,
                internal_error
            ],
        )
        .mount(
            "/api",
            routes![
                health,
                sample,
                preview,
                export,
                process_resume,
                deploy_github,
                deploy_netlify,
                flags,
                waitlist,
                options,
            ],
        ))
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    config.ensure_directories().await?;

    let db = match Database::new(&config.environment.database_path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e);
        }
    };
    let gate = AccessGate::new(db, config.quotas);

    info!("Starting portfolio API server");
    info!("Database: {}", config.environment.database_path.display());
    info!("Extraction service: {}", config.service.extraction_url);
    info!("Server: http://0.0.0.0:{}", config.port);

    build_rocket(&config, gate)?
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
