use async_trait::async_trait;

use super::observer::ChunkObserver;
use super::types::GenerateOptions;
use crate::errors::VexError;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Single-shot completion from a system+human message pair.
    ///
    /// Every output chunk is delivered to `observer` in arrival order; the
    /// returned string is the full accumulated text.
    async fn generate(
        &self,
        system: &str,
        human: &str,
        opts: &GenerateOptions,
        observer: &dyn ChunkObserver,
    ) -> Result<String, VexError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}

impl std::fmt::Debug for dyn LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProvider")
            .field("provider", &self.provider_name())
            .field("model", &self.model_name())
            .finish()
    }
}
