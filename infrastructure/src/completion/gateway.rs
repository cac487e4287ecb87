//! Chat completion gateway over HTTP

use super::protocol::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use crate::config::ServiceEndpoint;
use async_trait::async_trait;
use tracing::debug;
use wizard_application::BehaviorConfig;
use wizard_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};

/// LLM Gateway implementation for OpenAI-compatible services
pub struct ChatCompletionGateway {
    client: reqwest::Client,
    service: String,
    endpoint: ServiceEndpoint,
}

impl ChatCompletionGateway {
    /// Create a gateway for `endpoint`. `service` names it in errors and logs.
    ///
    /// An empty API key is accepted here; every call then fails with
    /// [`GatewayError::MissingCredential`].
    pub fn new(service: impl Into<String>, endpoint: ServiceEndpoint) -> Result<Self, GatewayError> {
        let behavior = BehaviorConfig::with_timeout_seconds(endpoint.timeout_seconds);
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = behavior.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            service: service.into(),
            endpoint,
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.endpoint.base_url.trim_end_matches('/')
        )
    }

    fn map_send_error(e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::ConnectionError(e.to_string())
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl LlmGateway for ChatCompletionGateway {
    fn model(&self) -> &str {
        &self.endpoint.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        if !self.endpoint.has_credential() {
            return Err(GatewayError::MissingCredential(self.service.clone()));
        }

        let body = ChatRequest {
            model: &self.endpoint.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_message,
                },
            ],
            response_format: request.json_mode.then(ResponseFormat::json_object),
        };

        debug!(
            "POST {} (service: {}, model: {}, json_mode: {})",
            self.url(),
            self.service,
            self.endpoint.model,
            request.json_mode
        );

        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.endpoint.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            return Err(GatewayError::RequestFailed(format!(
                "{} returned HTTP {}: {}",
                self.service,
                status.as_u16(),
                detail
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .into_first_content()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

        debug!("{} replied with {} bytes", self.service, content.len());
        Ok(content)
    }
}
