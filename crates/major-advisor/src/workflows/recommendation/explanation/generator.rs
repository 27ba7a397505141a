use async_trait::async_trait;

/// Sampling temperature used for every explanation; greedy decoding keeps prose reproducible.
pub const EXPLANATION_TEMPERATURE: f32 = 0.0;

/// Prompt plus decoding parameters for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn deterministic(prompt: String, max_tokens: u32) -> Self {
        Self {
            prompt,
            temperature: EXPLANATION_TEMPERATURE,
            max_tokens,
        }
    }
}

/// Failures talking to the text-generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("text generation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("failed to launch '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("text generation exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("text generation returned no output")]
    EmptyOutput,
    #[error("text generation gate is closed")]
    GateClosed,
    #[error("text generation failed after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Launch failures and a closed gate will not heal on a second try.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            GenerationError::Spawn { .. } | GenerationError::GateClosed
        )
    }
}

/// External text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
