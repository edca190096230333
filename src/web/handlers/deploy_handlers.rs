// src/web/handlers/deploy_handlers.rs
//! One-click publishing to GitHub Pages and Netlify

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use std::net::IpAddr;
use tracing::{error, info, info_span, warn, Instrument};

use crate::core::gate::{AccessGate, GateDecision};
use crate::deploy::{
    DeployError, DeployOutcome, DeployTarget, GithubDeployer, NetlifyDeployer, Provider,
    SiteDeployer,
};
use crate::generator::GeneratedSite;
use crate::render::RenderContext;
use crate::types::portfolio_data::PortfolioData;
use crate::types::response::{GithubDeployResponse, NetlifyDeployResponse};
use crate::web::handlers::resume_handlers::subject_for;
use crate::web::types::*;

pub async fn github_deploy_handler(
    request: Json<GithubDeployRequest>,
    client_ip: Option<IpAddr>,
    gate: &State<AccessGate>,
    config: &State<ServerConfig>,
) -> Result<Json<GithubDeployResponse>, ApiError> {
    let request = request.into_inner();
    let span = info_span!(
        "deploy",
        provider = "github",
        request_id = %uuid::Uuid::new_v4(),
        repo = %request.repo_name
    );

    let subject = subject_for(client_ip);
    publish_to_github(request, &subject, gate, config)
        .instrument(span)
        .await
}

async fn publish_to_github(
    request: GithubDeployRequest,
    subject: &str,
    gate: &AccessGate,
    config: &ServerConfig,
) -> Result<Json<GithubDeployResponse>, ApiError> {
    let deployer = GithubDeployer::new(
        &config.service.github_api_url,
        config.service.timeout_seconds,
    )
    .map_err(deploy_error_response)?;

    let target = DeployTarget::new(&request.repo_name, &request.token)
        .with_description(request.description);

    let outcome = run_deploy(&deployer, &request.portfolio_data, &target, subject, gate).await?;

    Ok(Json(GithubDeployResponse {
        repo_url: outcome.admin_url,
        pages_url: outcome.live_url,
    }))
}

pub async fn netlify_deploy_handler(
    request: Json<NetlifyDeployRequest>,
    client_ip: Option<IpAddr>,
    gate: &State<AccessGate>,
    config: &State<ServerConfig>,
) -> Result<Json<NetlifyDeployResponse>, ApiError> {
    let request = request.into_inner();
    let span = info_span!(
        "deploy",
        provider = "netlify",
        request_id = %uuid::Uuid::new_v4(),
        site = %request.site_name
    );

    let subject = subject_for(client_ip);
    publish_to_netlify(request, &subject, gate, config)
        .instrument(span)
        .await
}

async fn publish_to_netlify(
    request: NetlifyDeployRequest,
    subject: &str,
    gate: &AccessGate,
    config: &ServerConfig,
) -> Result<Json<NetlifyDeployResponse>, ApiError> {
    let deployer = NetlifyDeployer::new(
        &config.service.netlify_api_url,
        config.service.timeout_seconds,
    )
    .map_err(deploy_error_response)?;

    let target = DeployTarget::new(&request.site_name, &request.token);

    let outcome = run_deploy(&deployer, &request.portfolio_data, &target, subject, gate).await?;

    Ok(Json(NetlifyDeployResponse {
        url: outcome.live_url,
        admin_url: outcome.admin_url,
    }))
}

async fn run_deploy(
    deployer: &dyn SiteDeployer,
    data: &PortfolioData,
    target: &DeployTarget,
    subject: &str,
    gate: &AccessGate,
) -> Result<DeployOutcome, ApiError> {
    let provider = deployer.provider();
    if target.token.is_empty() {
        return Err(deploy_error_response(DeployError::MissingToken(provider)));
    }

    check_gate(provider, subject, gate).await?;

    let site = GeneratedSite::build(data, &RenderContext::published());
    info!(
        "Deploying {} files ({} bytes) to {}",
        site.files.len(),
        site.total_bytes(),
        provider
    );

    match deployer.deploy(&site, target).await {
        Ok(outcome) => {
            info!("Deployed to {}", outcome.live_url);
            Ok(outcome)
        }
        Err(e) => {
            warn!("Deployment to {} failed: {}", provider, e);
            Err(deploy_error_response(e))
        }
    }
}

async fn check_gate(provider: Provider, subject: &str, gate: &AccessGate) -> Result<(), ApiError> {
    let flag = provider.feature_flag();
    let decision = gate.check_and_consume(flag, subject).await.map_err(|e| {
        error!("Gate check failed: {}", e);
        api_error(
            Status::ServiceUnavailable,
            format!("{} deployment is temporarily unavailable", provider),
            "DATABASE_ERROR",
            &["Try again in a few moments"],
        )
    })?;

    let status = match decision {
        GateDecision::Allowed { .. } => return Ok(()),
        GateDecision::Disabled => Status::ServiceUnavailable,
        GateDecision::QuotaExhausted { .. } => Status::TooManyRequests,
    };

    Err(api_error(
        status,
        decision.message(flag),
        decision.error_code(),
        &[
            "Join the waitlist to be notified when capacity frees up",
            "Download the site instead and host it yourself",
        ],
    ))
}

fn deploy_error_response(e: DeployError) -> ApiError {
    let message = e.to_string();
    let code = e.error_code();
    match e {
        DeployError::MissingToken(_) => {
            api_error(Status::BadRequest, message, code, &["Provide an access token"])
        }
        DeployError::Unauthorized { .. } => api_error(
            Status::Unauthorized,
            message,
            code,
            &["Check that the token is valid and has not expired"],
        ),
        DeployError::Api { .. } => api_error(
            Status::BadGateway,
            message,
            code,
            &["Check the name is available and the token has write access"],
        ),
        DeployError::Transport { .. } | DeployError::InvalidResponse { .. } => {
            api_error(Status::BadGateway, message, code, &["Try again in a few moments"])
        }
    }
}
