use async_trait::async_trait;
use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::commit::{Commit, FileChange, FileStatus};
use crate::domain::repository::{Organization, Repository, Tag};
use crate::error::{AppError, AppResult};
use crate::services::SourceControlService;

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("tagbrief/", env!("CARGO_PKG_VERSION"));
/// Largest page GitHub serves. Longer listings are truncated.
const PAGE_SIZE: u32 = 100;

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(base_url: String, token: String) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| AppError::SourceControl(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Resolves `endpoint` against the base URL. Path segments and query
    /// values are percent-encoded, so ref names may contain `+`, `#` or `/`.
    fn url(&self, endpoint: &Endpoint) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            AppError::SourceControl(format!("invalid GitHub API URL '{}': {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::SourceControl(format!(
                    "GitHub API URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(&endpoint.segments);
        if !endpoint.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &endpoint.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> AppResult<T> {
        let url = self.url(&endpoint)?;
        debug!(%url, "GitHub request");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|err| AppError::SourceControl(format!("failed to call GitHub: {err}")))?;

        let response = ensure_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::SourceControl(format!("failed to parse GitHub response: {err}")))
    }
}

async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response>".to_string());
    Err(AppError::SourceControl(format!(
        "GitHub responded with {status}: {body}"
    )))
}

/// Unencoded path segments and query pairs of one API call.
struct Endpoint {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
        }
    }

    /// `repos/{owner}/{name}/...`; `repo` is the `owner/name` full name.
    fn repo(repo: &str, rest: &[&str]) -> Self {
        let mut endpoint = Self::new(&["repos"]);
        endpoint.segments.extend(repo.split('/').map(str::to_string));
        endpoint.segments.extend(rest.iter().map(|s| s.to_string()));
        endpoint
    }

    fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }
}

fn user_repos_endpoint() -> Endpoint {
    Endpoint::new(&["user", "repos"])
        .query("per_page", PAGE_SIZE)
        .query("type", "all")
}

fn org_repos_endpoint(org: &str) -> Endpoint {
    Endpoint::new(&["orgs", org, "repos"])
        .query("per_page", PAGE_SIZE)
        .query("type", "all")
}

fn tags_endpoint(repo: &str) -> Endpoint {
    Endpoint::repo(repo, &["tags"]).query("per_page", PAGE_SIZE)
}

fn compare_endpoint(repo: &str, base: &str, head: &str) -> Endpoint {
    // `base...head` is a single segment; a `/` inside a ref is encoded.
    let range = format!("{base}...{head}");
    Endpoint::repo(repo, &["compare", range.as_str()])
}

fn commits_endpoint(repo: &str, reference: &str) -> Endpoint {
    Endpoint::repo(repo, &["commits"])
        .query("sha", reference)
        .query("per_page", PAGE_SIZE)
}

fn commit_endpoint(repo: &str, sha: &str) -> Endpoint {
    Endpoint::repo(repo, &["commits", sha])
}

#[async_trait]
impl SourceControlService for GitHubClient {
    async fn list_user_repositories(&self) -> AppResult<Vec<Repository>> {
        let payload: Vec<GitHubRepository> = self.get_json(user_repos_endpoint()).await?;
        Ok(payload.into_iter().map(Into::into).collect())
    }

    async fn list_organizations(&self) -> AppResult<Vec<Organization>> {
        let payload: Vec<GitHubOrganization> =
            self.get_json(Endpoint::new(&["user", "orgs"])).await?;
        Ok(payload
            .into_iter()
            .map(|org| Organization { login: org.login })
            .collect())
    }

    async fn list_organization_repositories(&self, org: &str) -> AppResult<Vec<Repository>> {
        let payload: Vec<GitHubRepository> = self.get_json(org_repos_endpoint(org)).await?;
        Ok(payload.into_iter().map(Into::into).collect())
    }

    async fn list_tags(&self, repo: &str) -> AppResult<Vec<Tag>> {
        let payload: Vec<GitHubTag> = self.get_json(tags_endpoint(repo)).await?;
        Ok(payload
            .into_iter()
            .map(|tag| Tag { name: tag.name })
            .collect())
    }

    async fn compare(&self, repo: &str, base: &str, head: &str) -> AppResult<Vec<Commit>> {
        let payload: GitHubComparison =
            self.get_json(compare_endpoint(repo, base, head)).await?;
        Ok(payload.commits.into_iter().map(Into::into).collect())
    }

    async fn list_commits(&self, repo: &str, reference: &str) -> AppResult<Vec<Commit>> {
        let payload: Vec<GitHubCommit> =
            self.get_json(commits_endpoint(repo, reference)).await?;
        Ok(payload.into_iter().map(Into::into).collect())
    }

    async fn commit_details(&self, repo: &str, sha: &str) -> AppResult<Commit> {
        let payload: GitHubCommit = self.get_json(commit_endpoint(repo, sha)).await?;
        Ok(payload.into())
    }
}

#[derive(Deserialize)]
struct GitHubRepository {
    full_name: String,
    html_url: String,
}

impl From<GitHubRepository> for Repository {
    fn from(repo: GitHubRepository) -> Self {
        Repository {
            full_name: repo.full_name,
            html_url: repo.html_url,
        }
    }
}

#[derive(Deserialize)]
struct GitHubOrganization {
    login: String,
}

#[derive(Deserialize)]
struct GitHubTag {
    name: String,
}

#[derive(Deserialize)]
struct GitHubComparison {
    #[serde(default)]
    commits: Vec<GitHubCommit>,
}

#[derive(Deserialize)]
struct GitHubCommit {
    sha: String,
    commit: GitHubCommitBody,
    #[serde(default)]
    files: Vec<GitHubFile>,
}

#[derive(Deserialize)]
struct GitHubCommitBody {
    message: String,
}

#[derive(Deserialize)]
struct GitHubFile {
    filename: String,
    status: String,
}

impl From<GitHubCommit> for Commit {
    fn from(commit: GitHubCommit) -> Self {
        let mut converted = Commit::new(commit.sha, commit.commit.message);
        converted.files = commit
            .files
            .into_iter()
            .map(|file| FileChange::new(file.filename, FileStatus::parse(&file.status)))
            .collect();
        converted
    }
}
