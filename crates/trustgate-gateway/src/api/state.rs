use std::sync::Arc;
use trustgate_pipeline::{AnswerService, TrustPipeline};
use trustgate_redact::Redactor;

/// Shared application state handed to every request handler.
///
/// All members are constructed once at startup; handlers only ever read.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TrustPipeline>,
    pub answers: Arc<AnswerService>,
    pub redactor: Arc<Redactor>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<TrustPipeline>,
        answers: Arc<AnswerService>,
        redactor: Arc<Redactor>,
    ) -> Self {
        Self {
            pipeline,
            answers,
            redactor,
        }
    }
}
