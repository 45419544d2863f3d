pub mod github;
pub mod llm;
