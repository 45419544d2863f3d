use tracing::info;

use crate::context::AppContext;
use crate::domain::change::ChangeSummary;
use crate::domain::commit::RangeSource;
use crate::domain::report::Reported;
use crate::error::AppResult;
use crate::workflow::{aggregate::aggregate, narrate::narrate, range::resolve_range};

#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub repo: String,
    pub tag_from: String,
    pub tag_to: String,
    pub limit: usize,
    pub instruction: Option<String>,
    pub summary_only: bool,
}

#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub source: RangeSource,
    pub summary: ChangeSummary,
    pub rendered: String,
    pub narrative: Option<String>,
}

/// Resolves, aggregates, renders and narrates one tag comparison.
///
/// Upstream listing problems come back as warnings with `None`; only a
/// completion-service failure is an error.
pub async fn compare_tags(
    ctx: &AppContext,
    request: &ComparisonRequest,
) -> AppResult<Reported<Option<ComparisonReport>>> {
    if request.tag_from == request.tag_to {
        return Ok(Reported::with_warning(
            None,
            "Please select two different tags for comparison.",
        ));
    }

    let mut warnings = Vec::new();
    info!(
        repo = %request.repo,
        from = %request.tag_from,
        to = %request.tag_to,
        limit = request.limit,
        "comparing tags"
    );

    let range = resolve_range(
        ctx.source_control.as_ref(),
        &request.repo,
        &request.tag_from,
        &request.tag_to,
        request.limit,
    )
    .await
    .drain_into(&mut warnings);

    let Some(range) = range else {
        return Ok(Reported {
            value: None,
            warnings,
        });
    };

    let summary = aggregate(
        ctx.source_control.as_ref(),
        &request.repo,
        &range.commits,
        ctx.config.concurrency,
    )
    .await
    .drain_into(&mut warnings);
    let rendered = summary.render();

    let narrative = if request.summary_only {
        None
    } else {
        Some(
            narrate(
                ctx.language_model.as_ref(),
                request.instruction.as_deref(),
                &rendered,
            )
            .await?,
        )
    };

    Ok(Reported {
        value: Some(ComparisonReport {
            source: range.source,
            summary,
            rendered,
            narrative,
        }),
        warnings,
    })
}
