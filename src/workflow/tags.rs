use tracing::warn;

use crate::domain::report::Reported;
use crate::services::SourceControlService;

/// Tag names in the order the API lists them. Never fails; problems are
/// reported as warnings alongside an empty list.
pub async fn list_tags(
    source_control: &dyn SourceControlService,
    repo: &str,
) -> Reported<Vec<String>> {
    match source_control.list_tags(repo).await {
        Ok(tags) if tags.is_empty() => {
            Reported::with_warning(Vec::new(), format!("No tags found in `{repo}`."))
        }
        Ok(tags) => Reported::new(tags.into_iter().map(|tag| tag.name).collect()),
        Err(err) => {
            warn!(%repo, error = %err, "tag listing failed");
            Reported::with_warning(Vec::new(), format!("Failed to fetch tags: {err}"))
        }
    }
}
