use crate::cmd::print_warnings;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::repositories::list_repositories;

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let report = list_repositories(ctx.source_control.as_ref()).await;
    print_warnings(&report.warnings);

    let width = report
        .value
        .names()
        .map(str::len)
        .max()
        .unwrap_or_default();
    for repo in report.value.iter() {
        println!("{:<width$}  {}", repo.full_name, repo.html_url);
    }
    Ok(())
}
