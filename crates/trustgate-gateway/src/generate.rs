//! Answer generators.
//!
//! Two implementations of the pipeline's `Generator` trait:
//! - [`PromptGenerator`] drives an OpenAI-compatible completions endpoint
//!   through a pluggable transport;
//! - [`ExtractiveGenerator`] is the deterministic fallback used when no
//!   endpoint is configured - it answers with the best-matching passage so
//!   the gateway stays usable end-to-end without a model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trustgate_pipeline::{CollaboratorError, Generator};
use trustgate_types::RetrievedDocument;

pub const AUTH_ENV_VAR: &str = "OPENAI_API_KEY";

const SYSTEM_PROMPT: &str =
    "You are a careful assistant that answers ONLY from the provided documents.";

const NO_ANSWER: &str = "The documents do not contain enough information.";

/// Transport request for a completions call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
}

/// Provider transport abstraction, so the HTTP call can be swapped in tests.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CollaboratorError>;
}

/// Generator that builds a grounded prompt and delegates to a transport.
pub struct PromptGenerator {
    model: String,
    transport: Arc<dyn CompletionTransport>,
}

impl PromptGenerator {
    pub fn new(model: impl Into<String>, transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            model: model.into(),
            transport,
        }
    }
}

#[async_trait]
impl Generator for PromptGenerator {
    async fn generate(
        &self,
        query: &str,
        documents: &[RetrievedDocument],
    ) -> Result<String, CollaboratorError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_prompt(query, documents),
        };
        let answer = self.transport.complete(&request).await?;
        Ok(answer.trim().to_string())
    }
}

/// Compose the question and retrieved passages into one grounded prompt.
fn build_prompt(query: &str, documents: &[RetrievedDocument]) -> String {
    let context = documents
        .iter()
        .map(|doc| format!("Source ({}):\n{}", doc.source_id, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Answer the following question based ONLY on the provided documents.\n\n\
         Question: {query}\n\n\
         Documents:\n{context}\n\n\
         If the answer cannot be found, say \"{NO_ANSWER}\""
    )
}

/// HTTP transport for an OpenAI-compatible chat completions endpoint.
pub struct HttpCompletionTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCompletionTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn api_key(&self) -> Result<String, CollaboratorError> {
        std::env::var(AUTH_ENV_VAR)
            .map_err(|_| CollaboratorError::new(format!("missing {AUTH_ENV_VAR}")))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl CompletionTransport for HttpCompletionTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CollaboratorError> {
        let api_key = self.api_key()?;
        let body = serde_json::json!({
            "model": request.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt},
            ],
            "temperature": 0.2,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CollaboratorError::new(format!("completions request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::new(format!(
                "completions endpoint returned {status}"
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::new(format!("malformed completions response: {e}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CollaboratorError::new("completions response had no choices"))
    }
}

/// Deterministic fallback generator: quotes the best-matching passage.
#[derive(Debug, Default)]
pub struct ExtractiveGenerator;

#[async_trait]
impl Generator for ExtractiveGenerator {
    async fn generate(
        &self,
        _query: &str,
        documents: &[RetrievedDocument],
    ) -> Result<String, CollaboratorError> {
        match documents.first() {
            Some(best) => Ok(format!(
                "According to {}: {}",
                best.source_id, best.content
            )),
            None => Ok(NO_ANSWER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn extractive_quotes_top_passage() {
        let docs = vec![
            RetrievedDocument::new("thirty days notice", "msa.pdf", 0.1),
            RetrievedDocument::new("sixty days payment", "pay.pdf", 0.4),
        ];
        let answer = ExtractiveGenerator.generate("q", &docs).await.unwrap();
        assert_eq!(answer, "According to msa.pdf: thirty days notice");
    }

    #[tokio::test]
    async fn extractive_without_documents_declines() {
        let answer = ExtractiveGenerator.generate("q", &[]).await.unwrap();
        assert_eq!(answer, NO_ANSWER);
    }

    #[test]
    fn prompt_carries_question_and_sources() {
        let docs = vec![
            RetrievedDocument::new("clause text one", "a.pdf", 0.1),
            RetrievedDocument::new("clause text two", "b.pdf", 0.2),
        ];
        let prompt = build_prompt("what is the term?", &docs);
        assert!(prompt.contains("Question: what is the term?"));
        assert!(prompt.contains("Source (a.pdf):\nclause text one"));
        assert!(prompt.contains("Source (b.pdf):\nclause text two"));
        assert!(prompt.contains(NO_ANSWER));
    }

    struct CannedTransport(String);

    #[async_trait]
    impl CompletionTransport for CannedTransport {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<String, CollaboratorError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn prompt_generator_trims_transport_output() {
        let generator =
            PromptGenerator::new("test-model", Arc::new(CannedTransport("  the answer \n".into())));
        let answer = generator.generate("q", &[]).await.unwrap();
        assert_eq!(answer, "the answer");
    }
}
