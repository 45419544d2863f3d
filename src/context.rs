use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{LanguageModelService, SourceControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub source_control: Arc<dyn SourceControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        source_control: Arc<dyn SourceControlService>,
        language_model: Arc<dyn LanguageModelService>,
    ) -> Self {
        Self {
            config,
            source_control,
            language_model,
        }
    }
}
