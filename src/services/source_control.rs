use async_trait::async_trait;

use crate::domain::commit::Commit;
use crate::domain::repository::{Organization, Repository, Tag};
use crate::error::AppResult;

/// Read-only access to a hosted source-control API.
///
/// Implementations report upstream failures as errors; deciding whether a
/// failure is fatal belongs to the workflows.
#[async_trait]
pub trait SourceControlService: Send + Sync {
    async fn list_user_repositories(&self) -> AppResult<Vec<Repository>>;
    async fn list_organizations(&self) -> AppResult<Vec<Organization>>;
    async fn list_organization_repositories(&self, org: &str) -> AppResult<Vec<Repository>>;
    async fn list_tags(&self, repo: &str) -> AppResult<Vec<Tag>>;
    /// Commits between `base` and `head`, in the order the API returns them.
    async fn compare(&self, repo: &str, base: &str, head: &str) -> AppResult<Vec<Commit>>;
    /// Commits reachable from `reference`, most recent first, single page.
    async fn list_commits(&self, repo: &str, reference: &str) -> AppResult<Vec<Commit>>;
    /// A single commit with its file list populated.
    async fn commit_details(&self, repo: &str, sha: &str) -> AppResult<Commit>;
}
