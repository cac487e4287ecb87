//! Per-session context.
//!
//! Everything one front-end session owns: the chat state and, once a CSV
//! has been loaded, the dataset together with the agent bound to it. The
//! context is passed by `&mut` into every handler; there is no
//! process-wide session state.

use crate::ports::analysis_agent::AnalysisAgent;
use std::sync::Arc;
use wizard_domain::{ChatSession, DatasetHandle};

/// A loaded dataset and the agent constructed for it
#[derive(Clone)]
pub struct LoadedDataset {
    pub dataset: Arc<DatasetHandle>,
    pub agent: Arc<dyn AnalysisAgent>,
}

#[derive(Default)]
pub struct SessionContext {
    chat: ChatSession,
    loaded: Option<LoadedDataset>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    pub fn loaded(&self) -> Option<&LoadedDataset> {
        self.loaded.as_ref()
    }

    pub fn dataset(&self) -> Option<&Arc<DatasetHandle>> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    /// Replace the current dataset and agent. The transcript is kept.
    pub fn attach(&mut self, dataset: Arc<DatasetHandle>, agent: Arc<dyn AnalysisAgent>) {
        self.loaded = Some(LoadedDataset { dataset, agent });
    }
}
