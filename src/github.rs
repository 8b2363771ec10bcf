use crate::colors::LanguageColors;
use crate::config::GatewayConfig;
use crate::error::{Result, Severity};
use crate::mapper::{map_repo, map_repo_details, map_user_info};
use crate::models::{Repo, RepoDetails, UserInfo};
use crate::readme::{rewrite_relative_images, RawLocation};
use crate::storage::TokenStore;
use crate::token::validate_credential;
use crate::types::{RepoDetailsDto, RepoDto, UserInfoDto};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

const PER_PAGE: u32 = 100;
const LOW_RATE_LIMIT: u32 = 10;
const GITHUB_JSON: &str = "application/vnd.github.v3+json";

pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error, check your network and try again";
pub const LIST_ERROR_MESSAGE: &str = "Something went wrong while loading repositories";
pub const SIGN_IN_ERROR_MESSAGE: &str =
    "GitHub rejected the sign-in request; check that the token is active and has the repo scope";

/// Operations the presentation layer needs from GitHub.
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    async fn get_repositories(&self) -> Result<Vec<Repo>>;

    async fn get_repository(&self, repo_id: &str) -> Result<RepoDetails>;

    /// Validate `token`, check it against GitHub and persist it.
    async fn sign_in(&self, token: &str) -> Result<UserInfo>;

    /// README of `owner/repo` at `branch` with relative images made absolute.
    async fn get_repository_readme(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String>;

    async fn get_token(&self) -> Result<Option<String>>;
}

pub struct GitHubClient {
    client: Client,
    config: GatewayConfig,
    store: Arc<dyn TokenStore>,
}

impl GitHubClient {
    pub fn new(config: GatewayConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let config = config.validate()?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            config,
            store,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn make_request(&self, url: &str, authorization: Option<&str>) -> Result<Response> {
        let mut retries = 0;

        loop {
            let mut request = self.client.get(url);
            if let Some(authorization) = authorization {
                request = request
                    .header("Accept", GITHUB_JSON)
                    .header("Authorization", authorization);
            }
            let response = request.send().await?;

            let rate_limit_remaining = response
                .headers()
                .get("X-RateLimit-Remaining")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u32>().ok());

            if let Some(remaining) = rate_limit_remaining {
                if remaining < LOW_RATE_LIMIT {
                    warn!(remaining, "GitHub rate limit is running low");
                }
            }

            let status = response.status();
            if status.is_server_error() && retries < self.config.max_retries {
                retries += 1;
                warn!(
                    %status,
                    url,
                    retries,
                    "Server error, retrying in {}ms",
                    self.config.retry_delay.as_millis()
                );
                sleep(self.config.retry_delay).await;
                continue;
            }

            debug!(%status, url, "GitHub responded");
            return Ok(response);
        }
    }

    /// Single decision point for every remote call: a failed status, or a
    /// success whose body `decode` rejects, becomes one error of the given severity.
    async fn connect<T>(
        response: Response,
        severity: Severity,
        message: &str,
        decode: impl FnOnce(String) -> Option<T>,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!(%status, ?severity, "GitHub request failed");
            return Err(severity.into_error(status, message));
        }

        let body = response.text().await?;
        decode(body).ok_or_else(|| {
            warn!(%status, ?severity, "GitHub response body could not be decoded");
            severity.into_error(status, message)
        })
    }

    /// JSON endpoints always send a body; an empty one is a failure.
    fn decode_json<T: DeserializeOwned>(body: String) -> Option<T> {
        if body.is_empty() {
            return None;
        }
        serde_json::from_str(&body).ok()
    }
}

#[async_trait]
impl RepositoryGateway for GitHubClient {
    async fn get_repositories(&self) -> Result<Vec<Repo>> {
        let authorization = self.store.token_for_github().await?;
        let url = format!(
            "{}/user/repos?per_page={}",
            self.config.api_base_url, PER_PAGE
        );
        let response = self.make_request(&url, Some(&authorization)).await?;
        let dtos: Vec<RepoDto> =
            Self::connect(response, Severity::Message, LIST_ERROR_MESSAGE, Self::decode_json)
                .await?;

        let colors = LanguageColors::bundled()?;
        let repos: Vec<Repo> = dtos
            .into_iter()
            .map(|mut dto| {
                colors.annotate(&mut dto);
                map_repo(dto)
            })
            .collect();

        debug!(count = repos.len(), "Loaded repositories");
        Ok(repos)
    }

    async fn get_repository(&self, repo_id: &str) -> Result<RepoDetails> {
        let authorization = self.store.token_for_github().await?;
        let url = format!("{}/repositories/{}", self.config.api_base_url, repo_id);
        let response = self.make_request(&url, Some(&authorization)).await?;
        let dto: RepoDetailsDto = Self::connect(
            response,
            Severity::Message,
            CONNECTION_ERROR_MESSAGE,
            Self::decode_json,
        )
        .await?;
        Ok(map_repo_details(dto))
    }

    async fn sign_in(&self, token: &str) -> Result<UserInfo> {
        let credential = validate_credential(token)?;
        let url = format!("{}/user", self.config.api_base_url);
        let response = self.make_request(&url, Some(&credential)).await?;
        let dto: UserInfoDto = Self::connect(
            response,
            Severity::MessageAndCode,
            SIGN_IN_ERROR_MESSAGE,
            Self::decode_json,
        )
        .await?;

        self.store.save_token(token).await?;
        info!(login = %dto.login, "Signed in");
        Ok(map_user_info(dto))
    }

    async fn get_repository_readme(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/{}/{}/{}/README.md",
            self.config.raw_base_url, owner, repo, branch
        );
        let response = self.make_request(&url, None).await?;
        // An empty README.md is still a README.
        let readme =
            Self::connect(response, Severity::Code, CONNECTION_ERROR_MESSAGE, Some).await?;

        let location = RawLocation::new(owner, repo, branch);
        Ok(rewrite_relative_images(
            &readme,
            location,
            &self.config.raw_base_url,
        ))
    }

    async fn get_token(&self) -> Result<Option<String>> {
        self.store.token().await
    }
}
