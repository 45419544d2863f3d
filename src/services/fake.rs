//! In-memory stand-ins for the service traits, used by workflow tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::commit::{Commit, FileChange, FileStatus};
use crate::domain::repository::{Organization, Repository, Tag};
use crate::error::{AppError, AppResult};
use crate::services::{LanguageModelService, SourceControlService};

type Canned<T> = Result<T, String>;

fn replay<T: Clone>(canned: &Canned<T>) -> AppResult<T> {
    canned.clone().map_err(AppError::SourceControl)
}

pub fn repository(full_name: &str) -> Repository {
    Repository {
        full_name: full_name.to_string(),
        html_url: format!("https://github.test/{full_name}"),
    }
}

pub fn commit_with_files(sha: &str, message: &str, files: &[(&str, FileStatus)]) -> Commit {
    Commit {
        sha: sha.to_string(),
        message: message.to_string(),
        files: files
            .iter()
            .map(|(name, status)| FileChange::new(*name, status.clone()))
            .collect(),
    }
}

pub struct FakeSourceControl {
    pub user_repositories: Canned<Vec<Repository>>,
    pub organizations: Canned<Vec<Organization>>,
    pub organization_repositories: HashMap<String, Canned<Vec<Repository>>>,
    pub tags: HashMap<String, Canned<Vec<Tag>>>,
    pub comparison: Canned<Vec<Commit>>,
    pub recent_commits: Canned<Vec<Commit>>,
    pub details: HashMap<String, Canned<Commit>>,
    pub detail_delays: HashMap<String, Duration>,
    pub tracker: CallTracker,
}

/// Call log and in-flight tracking for [`FakeSourceControl`].
#[derive(Default)]
pub struct CallTracker {
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl Default for FakeSourceControl {
    fn default() -> Self {
        Self {
            user_repositories: Ok(Vec::new()),
            organizations: Ok(Vec::new()),
            organization_repositories: HashMap::new(),
            tags: HashMap::new(),
            comparison: Err("404 Not Found".to_string()),
            recent_commits: Err("404 Not Found".to_string()),
            details: HashMap::new(),
            detail_delays: HashMap::new(),
            tracker: CallTracker::default(),
        }
    }
}

impl FakeSourceControl {
    /// Registers `commits` as the detail responses, keyed by sha.
    pub fn with_details(mut self, commits: &[Commit]) -> Self {
        for commit in commits {
            self.details.insert(commit.sha.clone(), Ok(commit.clone()));
        }
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.tracker.calls.lock().unwrap().clone()
    }

    pub fn calls_named(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(':').next() == Some(name))
            .count()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.tracker.peak_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.tracker.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SourceControlService for FakeSourceControl {
    async fn list_user_repositories(&self) -> AppResult<Vec<Repository>> {
        self.record("user_repos".to_string());
        replay(&self.user_repositories)
    }

    async fn list_organizations(&self) -> AppResult<Vec<Organization>> {
        self.record("orgs".to_string());
        replay(&self.organizations)
    }

    async fn list_organization_repositories(&self, org: &str) -> AppResult<Vec<Repository>> {
        self.record(format!("org_repos:{org}"));
        self.organization_repositories
            .get(org)
            .map(replay)
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_tags(&self, repo: &str) -> AppResult<Vec<Tag>> {
        self.record(format!("tags:{repo}"));
        self.tags
            .get(repo)
            .map(replay)
            .unwrap_or_else(|| Err(AppError::SourceControl("404 Not Found".to_string())))
    }

    async fn compare(&self, repo: &str, base: &str, head: &str) -> AppResult<Vec<Commit>> {
        self.record(format!("compare:{repo}:{base}...{head}"));
        replay(&self.comparison)
    }

    async fn list_commits(&self, repo: &str, reference: &str) -> AppResult<Vec<Commit>> {
        self.record(format!("commits:{repo}:{reference}"));
        replay(&self.recent_commits)
    }

    async fn commit_details(&self, _repo: &str, sha: &str) -> AppResult<Commit> {
        self.record(format!("detail:{sha}"));
        let current = self.tracker.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.tracker.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.detail_delays.get(sha) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.tracker.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.details
            .get(sha)
            .map(replay)
            .unwrap_or_else(|| Err(AppError::SourceControl(format!("no commit {sha}"))))
    }
}

/// Returns a fixed completion (or error) and remembers every prompt.
pub struct FakeLanguageModel {
    pub reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeLanguageModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModelService for FakeLanguageModel {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(AppError::LanguageModel)
    }
}
