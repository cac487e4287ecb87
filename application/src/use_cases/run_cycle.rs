//! Run Cycle use case.
//!
//! Executes one query cycle:
//! 1. Classify the query with the relevance classifier
//! 2. Rejected → the classifier's reply becomes the answer
//! 3. Relevant → run the analysis agent and normalize its outcome
//! 4. Record the user message and the answer at the head of the transcript
//!
//! The user message and the answer are recorded together, only once the
//! answer exists. A failed cycle leaves the transcript untouched and is
//! reported as [`CycleResult::Failed`]; nothing is retried.

use super::classify_relevance::ClassifyRelevanceUseCase;
use super::cycle_error::CycleError;
use super::normalize_response::ResponseNormalizer;
use crate::ports::chart_loader::ChartLoader;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::CycleProgressNotifier;
use crate::session::{LoadedDataset, SessionContext};
use std::sync::Arc;
use tracing::{info, warn};
use wizard_domain::{CycleState, Message, truncate};

/// How a submitted query ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleResult {
    /// Blank input; nothing happened
    Ignored,
    /// Out of scope; the classifier's reply was recorded
    Rejected,
    /// In scope; the agent's answer was recorded
    Answered,
    /// The cycle failed and recorded nothing
    Failed(CycleError),
}

impl CycleResult {
    pub fn is_recorded(&self) -> bool {
        matches!(self, CycleResult::Rejected | CycleResult::Answered)
    }

    pub fn error(&self) -> Option<&CycleError> {
        match self {
            CycleResult::Failed(e) => Some(e),
            _ => None,
        }
    }
}

pub struct RunCycleUseCase {
    classifier: ClassifyRelevanceUseCase,
    normalizer: ResponseNormalizer,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunCycleUseCase {
    pub fn new(classifier_gateway: Arc<dyn LlmGateway>, chart_loader: Arc<dyn ChartLoader>) -> Self {
        Self {
            classifier: ClassifyRelevanceUseCase::new(classifier_gateway),
            normalizer: ResponseNormalizer::new(chart_loader),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Submit whatever is in the session's input line, clearing it.
    pub async fn submit_pending(
        &self,
        ctx: &mut SessionContext,
        progress: &dyn CycleProgressNotifier,
    ) -> CycleResult {
        let query = ctx.chat().current_input().to_string();
        ctx.chat_mut().clear_input();
        self.on_submit(ctx, &query, progress).await
    }

    /// Run one full cycle for `query`.
    pub async fn on_submit(
        &self,
        ctx: &mut SessionContext,
        query: &str,
        progress: &dyn CycleProgressNotifier,
    ) -> CycleResult {
        if query.trim().is_empty() {
            return CycleResult::Ignored;
        }

        let Some(loaded) = ctx.loaded().cloned() else {
            return CycleResult::Failed(CycleError::NoDataset);
        };

        progress.on_state(CycleState::Submitted);
        info!("Cycle started: {}", truncate(query, 100));
        self.conversation_logger.log(ConversationEvent::new(
            "user_query",
            serde_json::json!({ "query": query, "dataset": loaded.dataset.name() }),
        ));

        let outcome = self.answer(&loaded, query, progress).await;
        progress.on_state(CycleState::Recorded);

        let result = match outcome {
            Ok((answer, rejected)) => {
                let chat = ctx.chat_mut();
                chat.append_front(Message::user(query));
                chat.append_front(answer);
                if rejected {
                    CycleResult::Rejected
                } else {
                    CycleResult::Answered
                }
            }
            Err(e) => {
                warn!("Cycle failed ({}): {}", e.kind(), e);
                self.conversation_logger.log(ConversationEvent::new(
                    "cycle_error",
                    serde_json::json!({ "kind": e.kind(), "error": e.to_string() }),
                ));
                CycleResult::Failed(e)
            }
        };

        progress.on_cycle_end(result.is_recorded());
        progress.on_state(CycleState::Idle);
        result
    }

    /// Produce the assistant message; the flag is true for rejections.
    async fn answer(
        &self,
        loaded: &LoadedDataset,
        query: &str,
        progress: &dyn CycleProgressNotifier,
    ) -> Result<(Message, bool), CycleError> {
        progress.on_state(CycleState::Classifying);
        let verdict = self.classifier.execute(&loaded.dataset, query).await?;
        self.conversation_logger.log(ConversationEvent::new(
            "verdict",
            serde_json::json!({ "status": verdict.status, "message": verdict.message }),
        ));

        if let Some(reply) = verdict.reply() {
            progress.on_state(CycleState::Rejected);
            return Ok((Message::assistant_text(reply), true));
        }

        progress.on_state(CycleState::Analyzing);
        let outcome = loaded.agent.chat(query).await?;
        self.conversation_logger.log(ConversationEvent::new(
            "analysis_result",
            serde_json::json!({ "kind": outcome.kind() }),
        ));

        progress.on_state(CycleState::Normalizing);
        let message = self.normalizer.normalize(outcome)?;
        Ok((message, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::analysis_agent::{AgentError, AnalysisAgent};
    use crate::ports::chart_loader::ChartLoadError;
    use crate::ports::llm_gateway::{CompletionRequest, GatewayError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use wizard_domain::{
        AnalysisOutcome, ChartImage, DatasetHandle, Payload, Role, StructuredValue,
    };

    // ==================== Test Mocks ====================

    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    }

    impl ScriptedGateway {
        fn new(replies: Vec<Result<&str, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().map(|r| r.map(str::to_string)).collect()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more replies".to_string())))
        }
    }

    struct MockAgent {
        outcomes: Mutex<VecDeque<Result<AnalysisOutcome, AgentError>>>,
        queries: Mutex<Vec<String>>,
    }

    impl MockAgent {
        fn new(outcomes: Vec<Result<AnalysisOutcome, AgentError>>) -> Self {
            Self {
                outcomes: Mutex::new(VecDeque::from(outcomes)),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnalysisAgent for MockAgent {
        async fn chat(&self, query: &str) -> Result<AnalysisOutcome, AgentError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(AnalysisOutcome::Text("default".to_string())))
        }
    }

    struct FakeChartLoader;

    impl ChartLoader for FakeChartLoader {
        fn load(&self, path: &Path) -> Result<ChartImage, ChartLoadError> {
            if path.exists() || path.starts_with("/charts") {
                Ok(ChartImage::new(vec![1, 2, 3], 10, 10))
            } else {
                Err(ChartLoadError::NotFound(path.to_path_buf()))
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        states: Mutex<Vec<CycleState>>,
        ends: Mutex<Vec<bool>>,
    }

    impl CycleProgressNotifier for RecordingProgress {
        fn on_state(&self, state: CycleState) {
            self.states.lock().unwrap().push(state);
        }

        fn on_cycle_end(&self, success: bool) {
            self.ends.lock().unwrap().push(success);
        }
    }

    fn context_with(agent: Arc<MockAgent>) -> SessionContext {
        let dataset = DatasetHandle::new(
            "sales.csv",
            vec!["region".into(), "sales".into()],
            vec![vec!["north".into(), "10".into()]],
        )
        .unwrap();
        let mut ctx = SessionContext::new();
        ctx.attach(Arc::new(dataset), agent);
        ctx
    }

    fn use_case(replies: Vec<Result<&str, GatewayError>>) -> RunCycleUseCase {
        RunCycleUseCase::new(
            Arc::new(ScriptedGateway::new(replies)),
            Arc::new(FakeChartLoader),
        )
    }

    const RELEVANT: &str = r#"{"status": true}"#;

    fn texts(ctx: &SessionContext) -> Vec<(Role, String)> {
        ctx.chat()
            .transcript()
            .iter()
            .map(|m| (m.role(), m.text().unwrap_or("<image>").to_string()))
            .collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_rejected_query_skips_agent() {
        let agent = Arc::new(MockAgent::new(vec![]));
        let mut ctx = context_with(agent.clone());
        let use_case = use_case(vec![Ok(
            r#"{"status": false, "message": "I am a Data Wizard and I can only help you with Data Science task"}"#,
        )]);

        let result = use_case.on_submit(&mut ctx, "Who won the 1998 world cup?", &RecordingProgress::default()).await;

        assert_eq!(result, CycleResult::Rejected);
        assert!(agent.calls().is_empty());
        let head = ctx.chat().transcript().first().unwrap();
        assert_eq!(
            *head,
            Message::assistant_text("I am a Data Wizard and I can only help you with Data Science task")
        );
    }

    #[tokio::test]
    async fn test_relevant_query_calls_agent_once() {
        let agent = Arc::new(MockAgent::new(vec![Ok(AnalysisOutcome::Other(
            StructuredValue::Integer(42),
        ))]));
        let mut ctx = context_with(agent.clone());
        let use_case = use_case(vec![Ok(RELEVANT)]);

        let result = use_case.on_submit(&mut ctx, "total sales?", &RecordingProgress::default()).await;

        assert_eq!(result, CycleResult::Answered);
        assert_eq!(agent.calls(), vec!["total sales?".to_string()]);
        assert_eq!(
            texts(&ctx),
            vec![
                (Role::Assistant, "42".to_string()),
                (Role::User, "total sales?".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_transcript_order_newest_first() {
        let agent = Arc::new(MockAgent::new(vec![
            Ok(AnalysisOutcome::Text("A1".to_string())),
            Ok(AnalysisOutcome::Text("A2".to_string())),
        ]));
        let mut ctx = context_with(agent);
        let use_case = use_case(vec![Ok(RELEVANT), Ok(RELEVANT)]);

        use_case.on_submit(&mut ctx, "Q1", &RecordingProgress::default()).await;
        use_case.on_submit(&mut ctx, "Q2", &RecordingProgress::default()).await;

        assert_eq!(
            texts(&ctx),
            vec![
                (Role::Assistant, "A2".to_string()),
                (Role::User, "Q2".to_string()),
                (Role::Assistant, "A1".to_string()),
                (Role::User, "Q1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_classifier_failure_records_nothing() {
        let agent = Arc::new(MockAgent::new(vec![]));
        let mut ctx = context_with(agent.clone());
        let use_case = use_case(vec![Err(GatewayError::ConnectionError("refused".into()))]);
        let progress = RecordingProgress::default();

        let result = use_case.on_submit(&mut ctx, "total sales?", &progress).await;

        assert!(matches!(
            result,
            CycleResult::Failed(CycleError::ClassifierUnavailable(_))
        ));
        assert!(ctx.chat().transcript().is_empty());
        assert!(agent.calls().is_empty());
        assert_eq!(*progress.ends.lock().unwrap(), vec![false]);
    }

    #[tokio::test]
    async fn test_malformed_verdict_fails() {
        let agent = Arc::new(MockAgent::new(vec![]));
        let mut ctx = context_with(agent.clone());
        let use_case = use_case(vec![Ok("relevant!")]);

        let result = use_case.on_submit(&mut ctx, "total sales?", &RecordingProgress::default()).await;

        assert!(matches!(
            result,
            CycleResult::Failed(CycleError::MalformedClassifierResponse(_))
        ));
        assert!(ctx.chat().transcript().is_empty());
        assert!(agent.calls().is_empty());
    }

    #[tokio::test]
    async fn test_agent_failure_records_nothing() {
        let agent = Arc::new(MockAgent::new(vec![Err(AgentError::GatewayError(
            GatewayError::Timeout,
        ))]));
        let mut ctx = context_with(agent);
        let use_case = use_case(vec![Ok(RELEVANT)]);

        let result = use_case.on_submit(&mut ctx, "total sales?", &RecordingProgress::default()).await;

        assert_eq!(
            result.error().map(CycleError::kind),
            Some("analysis_agent_failure")
        );
        assert!(ctx.chat().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_chart_outcome_recorded_as_image() {
        let agent = Arc::new(MockAgent::new(vec![Ok(AnalysisOutcome::Image(
            PathBuf::from("/charts/c1.png"),
        ))]));
        let mut ctx = context_with(agent);
        let use_case = use_case(vec![Ok(RELEVANT)]);

        let result = use_case.on_submit(&mut ctx, "plot sales", &RecordingProgress::default()).await;

        assert_eq!(result, CycleResult::Answered);
        let head = ctx.chat().transcript().first().unwrap();
        assert!(matches!(head.payload(), Payload::Image(img) if img.width() == 10));
    }

    #[tokio::test]
    async fn test_missing_chart_is_render_failure() {
        let agent = Arc::new(MockAgent::new(vec![Ok(AnalysisOutcome::Image(
            PathBuf::from("/definitely/not/here.png"),
        ))]));
        let mut ctx = context_with(agent);
        let use_case = use_case(vec![Ok(RELEVANT)]);

        let result = use_case.on_submit(&mut ctx, "plot sales", &RecordingProgress::default()).await;

        assert!(matches!(
            result,
            CycleResult::Failed(CycleError::ChartRenderFailure(_))
        ));
        assert!(ctx.chat().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_without_dataset() {
        let mut ctx = SessionContext::new();
        let use_case = use_case(vec![]);

        let result = use_case.on_submit(&mut ctx, "hello", &RecordingProgress::default()).await;
        assert_eq!(result, CycleResult::Failed(CycleError::NoDataset));
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let agent = Arc::new(MockAgent::new(vec![]));
        let mut ctx = context_with(agent);
        let use_case = use_case(vec![]);
        let progress = RecordingProgress::default();

        let result = use_case.on_submit(&mut ctx, "   ", &progress).await;

        assert_eq!(result, CycleResult::Ignored);
        assert!(progress.states.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_pending_clears_input() {
        let agent = Arc::new(MockAgent::new(vec![]));
        let mut ctx = context_with(agent.clone());
        ctx.chat_mut().set_input("total sales?");
        let use_case = use_case(vec![Ok(RELEVANT)]);

        let result = use_case.submit_pending(&mut ctx, &RecordingProgress::default()).await;

        assert_eq!(result, CycleResult::Answered);
        assert_eq!(ctx.chat().current_input(), "");
        assert_eq!(agent.calls(), vec!["total sales?".to_string()]);
    }

    #[tokio::test]
    async fn test_state_sequences() {
        let agent = Arc::new(MockAgent::new(vec![]));
        let mut ctx = context_with(agent);
        let use_case = use_case(vec![
            Ok(RELEVANT),
            Ok(r#"{"status": false, "message": "Hi! Ask me about your data."}"#),
        ]);

        let answered = RecordingProgress::default();
        use_case.on_submit(&mut ctx, "total sales?", &answered).await;
        assert_eq!(
            *answered.states.lock().unwrap(),
            vec![
                CycleState::Submitted,
                CycleState::Classifying,
                CycleState::Analyzing,
                CycleState::Normalizing,
                CycleState::Recorded,
                CycleState::Idle,
            ]
        );

        let rejected = RecordingProgress::default();
        use_case.on_submit(&mut ctx, "tell me a joke", &rejected).await;
        let states = rejected.states.lock().unwrap().clone();
        assert_eq!(
            states,
            vec![
                CycleState::Submitted,
                CycleState::Classifying,
                CycleState::Rejected,
                CycleState::Recorded,
                CycleState::Idle,
            ]
        );
        for pair in states.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]));
        }
    }
}
