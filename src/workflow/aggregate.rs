use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::domain::change::ChangeSummary;
use crate::domain::commit::Commit;
use crate::domain::report::Reported;
use crate::error::AppResult;
use crate::services::SourceControlService;

struct DetailRecord {
    position: usize,
    details: AppResult<Commit>,
}

/// Fetches every commit's file list and folds them into a [`ChangeSummary`].
///
/// At most `concurrency` fetches are in flight. Each task returns its own
/// record and only this function touches the summary. Commit messages come
/// from `commits`, so their order is the range order whatever order the
/// fetches finish in. A failed fetch keeps the message, contributes no
/// files and adds a warning.
pub async fn aggregate(
    source_control: &dyn SourceControlService,
    repo: &str,
    commits: &[Commit],
    concurrency: usize,
) -> Reported<ChangeSummary> {
    let summary = ChangeSummary::from_messages(commits.iter().map(|commit| commit.message.clone()));
    let mut report = Reported::new(summary);

    let mut records = stream::iter(commits.iter().enumerate())
        .map(|(position, commit)| async move {
            DetailRecord {
                position,
                details: source_control.commit_details(repo, &commit.sha).await,
            }
        })
        .buffer_unordered(concurrency.max(1));

    while let Some(record) = records.next().await {
        match record.details {
            Ok(details) => report.value.record_files(&details.files),
            Err(err) => {
                let sha = &commits[record.position].sha;
                warn!(%repo, %sha, error = %err, "commit detail fetch failed");
                report.warn(format!(
                    "Failed to fetch details for commit {}: {err}",
                    short_sha(sha)
                ));
            }
        }
    }

    debug!(
        commits = report.value.commit_count,
        files = report.value.changed_files.len(),
        seen = report.value.file_changes_seen,
        "aggregation finished"
    );
    report
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use super::*;
    use crate::domain::commit::FileStatus;
    use crate::services::fake::{FakeSourceControl, commit_with_files};

    fn bare(commits: &[Commit]) -> Vec<Commit> {
        commits
            .iter()
            .map(|c| Commit::new(c.sha.clone(), c.message.clone()))
            .collect()
    }

    #[tokio::test]
    async fn deduplicates_labels_across_commits() {
        let detailed = vec![
            commit_with_files("aaa", "fix bug", &[("a.py", FileStatus::Modified)]),
            commit_with_files(
                "bbb",
                "add feature",
                &[("a.py", FileStatus::Modified), ("b.py", FileStatus::Added)],
            ),
        ];
        let fake = FakeSourceControl::default().with_details(&detailed);

        let report = aggregate(&fake, "acme/api", &bare(&detailed), 1).await;
        let summary = report.value;

        assert!(report.warnings.is_empty());
        assert_eq!(summary.commit_count, 2);
        assert_eq!(
            summary.changed_files,
            BTreeSet::from(["a.py (modified)".to_string(), "b.py (added)".to_string()])
        );
        assert_eq!(summary.file_changes_seen, 3);
        assert!(summary.changed_files.len() <= summary.file_changes_seen);
        assert_eq!(summary.commit_messages, vec!["fix bug", "add feature"]);
    }

    #[tokio::test]
    async fn failed_detail_keeps_message_and_counts_no_files() {
        let detailed = vec![
            commit_with_files("aaa1111222", "first", &[("a.rs", FileStatus::Added)]),
            commit_with_files("bbb", "second", &[]),
        ];
        let mut fake = FakeSourceControl::default().with_details(&detailed);
        fake.details
            .insert("bbb".to_string(), Err("502 Bad Gateway".to_string()));

        let report = aggregate(&fake, "acme/api", &bare(&detailed), 4).await;

        assert_eq!(report.value.commit_messages, vec!["first", "second"]);
        assert_eq!(report.value.changed_files.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("bbb"));
        assert!(report.warnings[0].contains("502 Bad Gateway"));
    }

    #[tokio::test]
    async fn parallel_fetches_keep_range_order_for_messages() {
        let detailed: Vec<Commit> = (0..6)
            .map(|i| {
                let file = format!("file{i}.rs");
                commit_with_files(
                    &format!("sha{i}"),
                    &format!("message {i}"),
                    &[(file.as_str(), FileStatus::Modified)],
                )
            })
            .collect();
        let mut fake = FakeSourceControl::default().with_details(&detailed);
        // Earlier commits finish last.
        for i in 0..6u64 {
            fake.detail_delays
                .insert(format!("sha{i}"), Duration::from_millis(60 - i * 10));
        }

        let report = aggregate(&fake, "acme/api", &bare(&detailed), 3).await;

        let expected: Vec<String> = (0..6).map(|i| format!("message {i}")).collect();
        assert_eq!(report.value.commit_messages, expected);
        assert_eq!(report.value.changed_files.len(), 6);
        assert!(fake.peak_in_flight() <= 3);
        assert!(fake.peak_in_flight() > 1);
    }

    #[tokio::test]
    async fn zero_concurrency_runs_sequentially() {
        let detailed = vec![
            commit_with_files("aaa", "one", &[]),
            commit_with_files("bbb", "two", &[]),
        ];
        let fake = FakeSourceControl::default().with_details(&detailed);

        let report = aggregate(&fake, "acme/api", &bare(&detailed), 0).await;
        assert_eq!(report.value.commit_count, 2);
        assert_eq!(fake.peak_in_flight(), 1);
    }

    #[test]
    fn shortens_long_shas_only() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
    }
}
