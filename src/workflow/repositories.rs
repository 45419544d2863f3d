use tracing::{debug, warn};

use crate::domain::report::Reported;
use crate::domain::repository::RepositoryIndex;
use crate::services::SourceControlService;

/// Lists personal repositories, then every organization's repositories,
/// merged in that order. Upstream failures become warnings and contribute
/// nothing; one organization failing does not stop the rest.
pub async fn list_repositories(
    source_control: &dyn SourceControlService,
) -> Reported<RepositoryIndex> {
    let mut report = Reported::new(RepositoryIndex::new());

    match source_control.list_user_repositories().await {
        Ok(repositories) => report.value.merge(repositories),
        Err(err) => {
            warn!(error = %err, "personal repository listing failed");
            report.warn(format!("Failed to fetch user repositories: {err}"));
        }
    }

    let organizations = match source_control.list_organizations().await {
        Ok(organizations) => organizations,
        Err(err) => {
            warn!(error = %err, "organization listing failed");
            report.warn(format!("Failed to fetch organizations: {err}"));
            Vec::new()
        }
    };

    for org in organizations {
        match source_control
            .list_organization_repositories(&org.login)
            .await
        {
            Ok(repositories) => report.value.merge(repositories),
            Err(err) => {
                warn!(org = %org.login, error = %err, "organization repository listing failed");
                report.warn(format!(
                    "Failed to fetch repositories for {}: {err}",
                    org.login
                ));
            }
        }
    }

    debug!(
        repositories = report.value.len(),
        replaced = report.value.replaced(),
        "repository listing merged"
    );

    if report.value.is_empty() {
        report.warn(
            "No repositories found. Ensure your GitHub token has `repo` and `read:org` permissions.",
        );
    }

    report
}
