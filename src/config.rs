use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const CONFIG_DIR_NAME: &str = "tagbrief";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Settings persisted by `tagbrief config init`. Every field is optional;
/// environment variables take precedence when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    pub github_token: Option<String>,
    pub github_api_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_api_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<String>,
    pub concurrency: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("unable to determine the user config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: String,
    pub github_api_url: String,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub concurrency: usize,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(stored, |key| env::var(key).ok())
    }

    /// Layers `lookup` (normally the process environment) over `stored`.
    /// Both secrets are required.
    pub fn resolve<F>(stored: StoredConfig, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = pick(
            &lookup,
            &["GITHUB_API_KEY", "TAGBRIEF_GITHUB_TOKEN"],
            stored.github_token,
        )
        .ok_or_else(|| {
            AppError::Configuration(
                "GitHub token not configured (set GITHUB_API_KEY or run `tagbrief config init`)"
                    .to_string(),
            )
        })?;
        let openai_api_key = pick(
            &lookup,
            &["OPENAI_API_KEY", "TAGBRIEF_OPENAI_API_KEY"],
            stored.openai_api_key,
        )
        .ok_or_else(|| {
            AppError::Configuration(
                "completion API key not configured (set OPENAI_API_KEY or run `tagbrief config init`)"
                    .to_string(),
            )
        })?;

        let github_api_url = pick(&lookup, &["TAGBRIEF_GITHUB_API_URL"], stored.github_api_url)
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());
        let openai_api_url = pick(&lookup, &["TAGBRIEF_OPENAI_API_URL"], stored.openai_api_url)
            .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string());
        let model = pick(&lookup, &["TAGBRIEF_MODEL"], stored.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_tokens = match pick(&lookup, &["TAGBRIEF_MAX_TOKENS"], stored.max_tokens) {
            Some(raw) => parse_number::<u32>("max tokens", &raw)?,
            None => DEFAULT_MAX_TOKENS,
        };
        let concurrency = match pick(&lookup, &["TAGBRIEF_CONCURRENCY"], stored.concurrency) {
            Some(raw) => parse_number::<usize>("concurrency", &raw)?.max(1),
            None => DEFAULT_CONCURRENCY,
        };

        Ok(Self {
            github_token,
            github_api_url,
            openai_api_key,
            openai_api_url,
            model,
            max_tokens,
            concurrency,
        })
    }
}

fn pick<F>(lookup: &F, keys: &[&str], fallback: Option<String>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .find_map(|&key| lookup(key))
        .or(fallback)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> AppResult<T> {
    raw.parse::<T>()
        .map_err(|_| AppError::Configuration(format!("invalid {field} value '{raw}'")))
}
