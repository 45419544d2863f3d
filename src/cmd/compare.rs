use crate::cmd::print_warnings;
use crate::context::AppContext;
use crate::domain::commit::RangeSource;
use crate::error::AppResult;
use crate::workflow::compare::{ComparisonRequest, compare_tags};

pub async fn run(ctx: &AppContext, request: ComparisonRequest) -> AppResult<()> {
    eprintln!(
        "Comparing `{}` to `{}` in `{}`...",
        request.tag_from, request.tag_to, request.repo
    );

    let report = compare_tags(ctx, &request).await?;
    print_warnings(&report.warnings);

    let Some(comparison) = report.value else {
        return Ok(());
    };

    eprintln!(
        "Analyzed {} commits touching {} files.",
        comparison.summary.commit_count,
        comparison.summary.changed_files.len()
    );

    match comparison.narrative {
        Some(narrative) => {
            println!("{}\n", heading(comparison.source, &request));
            println!("{narrative}");
        }
        None => print!("{}", comparison.rendered),
    }
    Ok(())
}

fn heading(source: RangeSource, request: &ComparisonRequest) -> String {
    match source {
        RangeSource::Comparison => "Summary of Changes:".to_string(),
        RangeSource::RecentFromBase => format!(
            "Summary of Recent Commits from `{}` (not limited to `{}`):",
            request.tag_from, request.tag_to
        ),
    }
}
