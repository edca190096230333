// src/deploy/netlify.rs
//! Netlify publishing through a file-digest deploy

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::{
    ensure_success, http_client, parse_json, transport_error, DeployError, DeployOutcome,
    DeployTarget, Provider, SiteDeployer,
};
use crate::generator::GeneratedSite;

const PROVIDER: Provider = Provider::Netlify;

#[derive(Debug, Deserialize)]
struct NetlifySite {
    id: String,
    url: String,
    #[serde(default)]
    ssl_url: Option<String>,
    admin_url: String,
}

#[derive(Debug, Deserialize)]
struct NetlifyDeploy {
    id: String,
    #[serde(default)]
    required: Vec<String>,
}

pub struct NetlifyDeployer {
    client: reqwest::Client,
    api_url: String,
}

impl NetlifyDeployer {
    pub fn new(api_url: &str, timeout_seconds: u64) -> Result<Self, DeployError> {
        Ok(Self {
            client: http_client(PROVIDER, timeout_seconds)?,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn create_site(&self, target: &DeployTarget) -> Result<NetlifySite, DeployError> {
        let url = format!("{}/sites", self.api_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&target.token)
            .json(&json!({ "name": target.name }))
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        let response = ensure_success(PROVIDER, "create the site", response).await?;
        let site: NetlifySite = parse_json(PROVIDER, response).await?;
        info!("Created Netlify site {} ({})", target.name, site.id);
        Ok(site)
    }

    async fn create_deploy(
        &self,
        site_id: &str,
        token: &str,
        digests: &BTreeMap<String, String>,
    ) -> Result<NetlifyDeploy, DeployError> {
        let url = format!("{}/sites/{}/deploys", self.api_url, site_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "files": digests }))
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        let response = ensure_success(PROVIDER, "create the deploy", response).await?;
        parse_json(PROVIDER, response).await
    }

    async fn upload_file(
        &self,
        deploy_id: &str,
        token: &str,
        path: &str,
        content: &str,
    ) -> Result<(), DeployError> {
        let url = format!("{}/deploys/{}/files/{}", self.api_url, deploy_id, path);
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/octet-stream")
            .body(content.as_bytes().to_vec())
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        ensure_success(PROVIDER, "upload a file", response).await?;
        debug!("Uploaded {} to deploy {}", path, deploy_id);
        Ok(())
    }
}

#[async_trait]
impl SiteDeployer for NetlifyDeployer {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    async fn deploy(
        &self,
        site: &GeneratedSite,
        target: &DeployTarget,
    ) -> Result<DeployOutcome, DeployError> {
        if target.token.is_empty() {
            return Err(DeployError::MissingToken(PROVIDER));
        }

        let netlify_site = self.create_site(target).await?;
        let digests = file_digests(site);
        let deploy = self
            .create_deploy(&netlify_site.id, &target.token, &digests)
            .await?;

        let mut uploaded = 0;
        for file in &site.files {
            let digest = sha1_hex(&file.content);
            if deploy.required.contains(&digest) {
                self.upload_file(&deploy.id, &target.token, &file.path, &file.content)
                    .await?;
                uploaded += 1;
            }
        }

        let live_url = netlify_site.ssl_url.unwrap_or(netlify_site.url);
        info!(
            "Deployed {} ({} of {} files uploaded) to {}",
            target.name,
            uploaded,
            site.files.len(),
            live_url
        );

        Ok(DeployOutcome {
            live_url,
            admin_url: netlify_site.admin_url,
        })
    }
}

pub fn sha1_hex(content: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `/path` → SHA-1 map Netlify uses to decide which files it still needs
pub fn file_digests(site: &GeneratedSite) -> BTreeMap<String, String> {
    site.files
        .iter()
        .map(|file| (format!("/{}", file.path), sha1_hex(&file.content)))
        .collect()
}
