use tracing::{info, warn};

use crate::domain::commit::{CommitRange, RangeSource, apply_limit};
use crate::domain::report::Reported;
use crate::services::SourceControlService;

/// Resolves the commits between `from` and `to`, keeping at most `limit`
/// (0 keeps all).
///
/// When the comparison fails or comes back empty, falls back to the recent
/// history reachable from `from`. That answers a different question, so a
/// fallback result always carries a warning saying so. `None` means neither
/// strategy produced commits; the warnings explain why.
///
/// Callers must reject `from == to` before calling this.
pub async fn resolve_range(
    source_control: &dyn SourceControlService,
    repo: &str,
    from: &str,
    to: &str,
    limit: usize,
) -> Reported<Option<CommitRange>> {
    let comparison_failure = match source_control.compare(repo, from, to).await {
        Ok(commits) if !commits.is_empty() => {
            info!(%repo, %from, %to, total = commits.len(), "comparison resolved");
            return Reported::new(Some(CommitRange {
                commits: apply_limit(commits, limit),
                source: RangeSource::Comparison,
            }));
        }
        Ok(_) => format!("no commits found between `{from}` and `{to}`"),
        Err(err) => format!("failed to compare `{from}` and `{to}`: {err}"),
    };
    warn!(%repo, reason = %comparison_failure, "comparison unusable, listing from base tag");

    match source_control.list_commits(repo, from).await {
        Ok(commits) if !commits.is_empty() => {
            let commits = apply_limit(commits, limit);
            let mut report = Reported::new(Some(CommitRange {
                commits,
                source: RangeSource::RecentFromBase,
            }));
            report.warn(format!(
                "Comparison unavailable ({comparison_failure}). Showing recent commits reachable \
                 from `{from}` instead; these are not the commits between `{from}` and `{to}`."
            ));
            report
        }
        Ok(_) => Reported::with_warning(
            None,
            format!("No commits found: {comparison_failure}, and `{from}` lists no commits."),
        ),
        Err(err) => Reported::with_warning(
            None,
            format!(
                "Failed to fetch commits: {comparison_failure}; \
                 fallback listing from `{from}` failed: {err}"
            ),
        ),
    }
}
