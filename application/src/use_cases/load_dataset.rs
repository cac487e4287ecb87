//! Load Dataset use case.
//!
//! Handles one CSV upload: parse the file, build an analysis agent bound to
//! the parsed table, and attach both to the session. On a parse failure the
//! session is left exactly as it was and no agent is constructed.

use super::cycle_error::CycleError;
use crate::config::AgentSettings;
use crate::ports::analysis_agent::AnalysisAgentFactory;
use crate::ports::dataset_loader::DatasetLoader;
use crate::session::SessionContext;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use wizard_domain::DatasetHandle;

#[derive(Clone)]
pub struct LoadDatasetUseCase {
    loader: Arc<dyn DatasetLoader>,
    agent_factory: Arc<dyn AnalysisAgentFactory>,
    settings: AgentSettings,
}

impl LoadDatasetUseCase {
    pub fn new(
        loader: Arc<dyn DatasetLoader>,
        agent_factory: Arc<dyn AnalysisAgentFactory>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            loader,
            agent_factory,
            settings,
        }
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn execute(
        &self,
        ctx: &mut SessionContext,
        path: &Path,
    ) -> Result<Arc<DatasetHandle>, CycleError> {
        let dataset = match self.loader.load(path) {
            Ok(dataset) => Arc::new(dataset),
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                return Err(CycleError::UploadParseFailure(e));
            }
        };

        info!(
            "Loaded {} ({} rows, {} columns)",
            dataset.name(),
            dataset.row_count(),
            dataset.columns().len()
        );

        let agent = self.agent_factory.build(Arc::clone(&dataset), &self.settings);
        ctx.attach(Arc::clone(&dataset), agent);
        Ok(dataset)
    }
}
