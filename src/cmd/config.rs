use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{
    DEFAULT_CONCURRENCY, DEFAULT_GITHUB_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_OPENAI_API_URL, StoredConfig, config_file_path,
};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring tagbrief.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Environment variables (GITHUB_API_KEY, OPENAI_API_KEY, ...) override these values.");
    println!();

    apply_prompt("GitHub token", &mut cfg.github_token, true)?;
    apply_prompt(
        &format!("GitHub API URL (default {DEFAULT_GITHUB_API_URL})"),
        &mut cfg.github_api_url,
        false,
    )?;
    apply_prompt("Completion API key", &mut cfg.openai_api_key, true)?;
    apply_prompt(
        &format!("Completion API URL (default {DEFAULT_OPENAI_API_URL})"),
        &mut cfg.openai_api_url,
        false,
    )?;
    apply_prompt(
        &format!("Model (default {DEFAULT_MODEL})"),
        &mut cfg.model,
        false,
    )?;
    apply_prompt(
        &format!("Max response tokens (default {DEFAULT_MAX_TOKENS})"),
        &mut cfg.max_tokens,
        false,
    )?;
    apply_prompt(
        &format!("Parallel commit fetches (default {DEFAULT_CONCURRENCY})"),
        &mut cfg.concurrency,
        false,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("GitHub token: {}", mask_secret(&cfg.github_token));
    println!("GitHub API URL: {}", display_value(&cfg.github_api_url));
    println!("Completion API key: {}", mask_secret(&cfg.openai_api_key));
    println!("Completion API URL: {}", display_value(&cfg.openai_api_url));
    println!("Model: {}", display_value(&cfg.model));
    println!("Max response tokens: {}", display_value(&cfg.max_tokens));
    println!("Parallel commit fetches: {}", display_value(&cfg.concurrency));

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::parse(&input))
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 && token.is_ascii() => {
            let prefix = &token[..3];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
