mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::llm::OpenAiClient;
use crate::workflow::compare::ComparisonRequest;

#[derive(Parser)]
#[command(
    name = "tagbrief",
    author,
    version,
    about = "Summarize the changes between two release tags of a GitHub repository"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List repositories visible to the token (personal and organization).
    Repos,
    /// List the tags of a repository.
    Tags(TagsArgs),
    /// Summarize the commits between two tags.
    Compare(CompareArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct TagsArgs {
    /// Repository as `owner/name`.
    repo: String,
}

#[derive(Args)]
struct CompareArgs {
    /// Repository as `owner/name`.
    repo: String,
    /// Base tag.
    from: String,
    /// Head tag.
    to: String,
    /// Maximum number of commits to analyze (0 = all).
    #[arg(short, long, default_value_t = 10)]
    limit: usize,
    /// Replace the default summarization instruction.
    #[arg(short, long)]
    instruction: Option<String>,
    /// Parallel commit detail fetches (overrides configuration).
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,
    /// Print the aggregated change summary without calling the language model.
    #[arg(long)]
    summary_only: bool,
}

#[tokio::main]
async fn main() {
    logging::setup_logger();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Repos => {
            let ctx = build_context(None)?;
            cmd::repos::run(&ctx).await
        }
        Commands::Tags(args) => {
            let ctx = build_context(None)?;
            cmd::tags::run(&ctx, &args.repo).await
        }
        Commands::Compare(args) => {
            let ctx = build_context(args.concurrency)?;
            let request = ComparisonRequest {
                repo: args.repo,
                tag_from: args.from,
                tag_to: args.to,
                limit: args.limit,
                instruction: args.instruction,
                summary_only: args.summary_only,
            };
            cmd::compare::run(&ctx, request).await
        }
    }
}

fn build_context(concurrency: Option<usize>) -> AppResult<AppContext> {
    let mut config = AppConfig::load()?;
    if let Some(concurrency) = concurrency {
        config.concurrency = concurrency.max(1);
    }

    let source_control = Arc::new(GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
    )?);
    let language_model = Arc::new(OpenAiClient::new(
        config.openai_api_url.clone(),
        config.openai_api_key.clone(),
        config.model.clone(),
        config.max_tokens,
    ));

    Ok(AppContext::new(config, source_control, language_model))
}
