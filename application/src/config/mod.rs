//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`AgentSettings`]: flags an analysis agent is constructed with
//! - [`BehaviorConfig`]: request timeouts for the chat completion services

pub mod agent_settings;
pub mod behavior;

pub use agent_settings::AgentSettings;
pub use behavior::BehaviorConfig;
