use crate::cmd::print_warnings;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::tags::list_tags;

pub async fn run(ctx: &AppContext, repo: &str) -> AppResult<()> {
    let report = list_tags(ctx.source_control.as_ref(), repo).await;
    print_warnings(&report.warnings);

    for tag in &report.value {
        println!("{tag}");
    }
    Ok(())
}
