use crate::error::AppResult;
use crate::services::LanguageModelService;

pub const DEFAULT_INSTRUCTION: &str = "You are an expert software engineer. Summarize the following commit history with insights about the code changes:";

pub fn build_prompt(instruction: Option<&str>, formatted_summary: &str) -> String {
    let instruction = instruction
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(DEFAULT_INSTRUCTION);
    format!("{instruction}\n\n{formatted_summary}")
}

pub async fn narrate(
    language_model: &dyn LanguageModelService,
    instruction: Option<&str>,
    formatted_summary: &str,
) -> AppResult<String> {
    let prompt = build_prompt(instruction, formatted_summary);
    language_model.complete(&prompt).await
}
