//! Dummy LLM provider — echoes input back prefixed with `[echo]`.
//! Used for testing the full pipeline round-trip without a real API key.

use crate::llm::{CompletionRequest, ProviderError};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        Ok(format!("[echo] {}", request.content))
    }
}
