pub mod language_model;
pub mod source_control;

#[cfg(test)]
pub mod fake;

pub use language_model::LanguageModelService;
pub use source_control::SourceControlService;
