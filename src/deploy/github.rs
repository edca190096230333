// src/deploy/github.rs
//! GitHub Pages publishing through the REST API with a personal access token

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{
    ensure_success, http_client, parse_json, transport_error, DeployError, DeployOutcome,
    DeployTarget, Provider, SiteDeployer,
};
use crate::generator::GeneratedSite;

const PROVIDER: Provider = Provider::Github;
const DEFAULT_BRANCH: &str = "main";
const COMMIT_MESSAGE: &str = "Update portfolio";

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    html_url: String,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubContent {
    sha: String,
}

pub struct GithubDeployer {
    client: reqwest::Client,
    api_url: String,
}

impl GithubDeployer {
    pub fn new(api_url: &str, timeout_seconds: u64) -> Result<Self, DeployError> {
        Ok(Self {
            client: http_client(PROVIDER, timeout_seconds)?,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    async fn owner(&self, token: &str) -> Result<String, DeployError> {
        let url = format!("{}/user", self.api_url);
        let response = self
            .request(self.client.get(&url), token)
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        let response = ensure_success(PROVIDER, "resolve the token owner", response).await?;
        let user: GithubUser = parse_json(PROVIDER, response).await?;
        Ok(user.login)
    }

    /// Create the repository, or reuse it when the name is already taken by this owner
    async fn ensure_repo(&self, owner: &str, target: &DeployTarget) -> Result<GithubRepo, DeployError> {
        let url = format!("{}/user/repos", self.api_url);
        let payload = json!({
            "name": target.name,
            "description": target.description.clone().unwrap_or_else(|| "Personal portfolio".to_string()),
            "homepage": pages_url(owner, &target.name),
            "auto_init": true,
        });

        let response = self
            .request(self.client.post(&url), &target.token)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            info!("Repository {}/{} already exists, reusing it", owner, target.name);
            let url = format!("{}/repos/{}/{}", self.api_url, owner, target.name);
            let response = self
                .request(self.client.get(&url), &target.token)
                .send()
                .await
                .map_err(transport_error(PROVIDER))?;
            let response = ensure_success(PROVIDER, "look up the existing repository", response).await?;
            return parse_json(PROVIDER, response).await;
        }

        let response = ensure_success(PROVIDER, "create the repository", response).await?;
        info!("Created repository {}/{}", owner, target.name);
        parse_json(PROVIDER, response).await
    }

    async fn existing_sha(
        &self,
        owner: &str,
        target: &DeployTarget,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, DeployError> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_url, owner, target.name, path, branch
        );
        let response = self
            .request(self.client.get(&url), &target.token)
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(PROVIDER, "read an existing file", response).await?;
        let content: GithubContent = parse_json(PROVIDER, response).await?;
        Ok(Some(content.sha))
    }

    async fn upsert_file(
        &self,
        owner: &str,
        target: &DeployTarget,
        path: &str,
        content: &str,
        branch: &str,
    ) -> Result<(), DeployError> {
        let sha = self.existing_sha(owner, target, path, branch).await?;

        let mut payload = json!({
            "message": COMMIT_MESSAGE,
            "content": STANDARD.encode(content.as_bytes()),
            "branch": branch,
        });
        if let Some(sha) = sha {
            payload["sha"] = json!(sha);
        }

        let url = format!("{}/repos/{}/{}/contents/{}", self.api_url, owner, target.name, path);
        let response = self
            .request(self.client.put(&url), &target.token)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        ensure_success(PROVIDER, "upload a file", response).await?;
        debug!("Uploaded {} to {}/{}", path, owner, target.name);
        Ok(())
    }

    async fn enable_pages(&self, owner: &str, target: &DeployTarget, branch: &str) -> Result<(), DeployError> {
        let url = format!("{}/repos/{}/{}/pages", self.api_url, owner, target.name);
        let payload = json!({ "source": { "branch": branch, "path": "/" } });

        let response = self
            .request(self.client.post(&url), &target.token)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error(PROVIDER))?;

        // 409: Pages already enabled for this repository
        if response.status() == StatusCode::CONFLICT {
            debug!("GitHub Pages already enabled for {}/{}", owner, target.name);
            return Ok(());
        }

        ensure_success(PROVIDER, "enable GitHub Pages", response).await?;
        info!("Enabled GitHub Pages for {}/{}", owner, target.name);
        Ok(())
    }
}

#[async_trait]
impl SiteDeployer for GithubDeployer {
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

        let owner = self.owner(&target.token).await?;
        let repo = self.ensure_repo(&owner, target).await?;
        let branch = repo
            .default_branch
            .clone()
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        for file in &site.files {
            self.upsert_file(&owner, target, &file.path, &file.content, &branch)
                .await?;
        }

        self.enable_pages(&owner, target, &branch).await?;

        let live_url = pages_url(&owner, &target.name);
        info!("Deployed {} files to {}", site.files.len(), live_url);

        Ok(DeployOutcome {
            live_url,
            admin_url: repo.html_url,
        })
    }
}

/// `https://<owner>.github.io/<repo>/`
pub fn pages_url(owner: &str, repo: &str) -> String {
    format!("https://{}.github.io/{}/", owner.to_lowercase(), repo)
}
