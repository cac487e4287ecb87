//! [`AnalysisAgent`] that asks a chat model for an analysis plan

use crate::charts::ChartRenderer;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use wizard_application::config::AgentSettings;
use wizard_application::ports::analysis_agent::{AgentError, AnalysisAgent, AnalysisAgentFactory};
use wizard_application::ports::llm_gateway::{CompletionRequest, LlmGateway};
use wizard_domain::{
    AnalysisOutcome, DatasetHandle, PlanExecutor, PlanOutput, analysis_system_prompt, parse_plan,
    truncate,
};

/// Agent bound to one dataset.
///
/// The system prompt is built once at construction. With `enable_cache`
/// identical queries are answered from memory; the cache starts empty for
/// every new agent.
pub struct LlmAnalysisAgent {
    gateway: Arc<dyn LlmGateway>,
    dataset: Arc<DatasetHandle>,
    settings: AgentSettings,
    system_prompt: String,
    renderer: ChartRenderer,
    cache: Option<Mutex<HashMap<String, AnalysisOutcome>>>,
}

impl LlmAnalysisAgent {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        dataset: Arc<DatasetHandle>,
        settings: &AgentSettings,
    ) -> Self {
        let system_prompt = analysis_system_prompt(&dataset, settings.sample_rows);
        Self {
            gateway,
            renderer: ChartRenderer::new(&settings.charts_dir),
            cache: settings.enable_cache.then(|| Mutex::new(HashMap::new())),
            settings: settings.clone(),
            system_prompt,
            dataset,
        }
    }

    pub fn dataset(&self) -> &DatasetHandle {
        &self.dataset
    }

    fn cached(&self, query: &str) -> Option<AnalysisOutcome> {
        let cache = self.cache.as_ref()?;
        cache.lock().ok()?.get(query).cloned()
    }

    fn remember(&self, query: &str, outcome: &AnalysisOutcome) {
        if let Some(cache) = &self.cache
            && let Ok(mut entries) = cache.lock()
        {
            entries.insert(query.to_string(), outcome.clone());
        }
    }

    fn into_outcome(&self, output: PlanOutput) -> Result<AnalysisOutcome, AgentError> {
        match output {
            PlanOutput::Text(text) => Ok(AnalysisOutcome::Text(text)),
            PlanOutput::Value(value) => Ok(AnalysisOutcome::Other(value)),
            PlanOutput::Chart(chart) if self.settings.save_charts => self
                .renderer
                .render(&chart)
                .map(AnalysisOutcome::Image)
                .map_err(|e| AgentError::ChartSave(e.to_string())),
            PlanOutput::Chart(chart) => Ok(AnalysisOutcome::Text(chart.summary())),
        }
    }
}

#[async_trait]
impl AnalysisAgent for LlmAnalysisAgent {
    async fn chat(&self, query: &str) -> Result<AnalysisOutcome, AgentError> {
        if let Some(hit) = self.cached(query) {
            debug!("Cache hit for query: {}", truncate(query, 60));
            return Ok(hit);
        }

        let request = CompletionRequest::new(&self.system_prompt, query).with_json_mode();
        let response = self.gateway.complete(&request).await?;
        let plan = parse_plan(&response).map_err(AgentError::InvalidPlan)?;

        let plan_json = serde_json::to_string(&plan).unwrap_or_default();
        if self.settings.verbose {
            info!("Analysis plan ({}): {}", self.gateway.model(), plan_json);
        } else {
            debug!("Analysis plan ({}): {}", self.gateway.model(), plan_json);
        }

        let output = PlanExecutor::execute(&plan, &self.dataset).map_err(AgentError::Execution)?;
        let outcome = self.into_outcome(output)?;

        if self.settings.verbose {
            info!("Analysis result: {} ({})", plan.kind(), outcome.kind());
        }

        self.remember(query, &outcome);
        Ok(outcome)
    }
}

/// Builds an [`LlmAnalysisAgent`] for every newly loaded dataset.
pub struct LlmAnalysisAgentFactory {
    gateway: Arc<dyn LlmGateway>,
}

impl LlmAnalysisAgentFactory {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }
}

impl AnalysisAgentFactory for LlmAnalysisAgentFactory {
    fn build(&self, dataset: Arc<DatasetHandle>, settings: &AgentSettings) -> Arc<dyn AnalysisAgent> {
        info!(
            "Building analysis agent for {} (model: {}, cache: {})",
            dataset.name(),
            self.gateway.model(),
            settings.enable_cache
        );
        Arc::new(LlmAnalysisAgent::new(
            Arc::clone(&self.gateway),
            dataset,
            settings,
        ))
    }
}
