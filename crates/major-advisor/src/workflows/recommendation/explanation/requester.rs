use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use super::generator::{GenerationError, GenerationRequest, TextGenerator};
use super::prompt::PromptBuilder;
use crate::config::GenerationConfig;
use crate::workflows::recommendation::domain::{MajorSelection, QuestionnaireResponse};

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Gate, timeout, and retry policy around a [`TextGenerator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub max_concurrent: usize,
    pub max_tokens: u32,
    pub retry_delay: Duration,
}

impl From<&GenerationConfig> for RequestPolicy {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            timeout: config.timeout,
            max_attempts: config.max_attempts.max(1),
            max_concurrent: config.max_concurrent.max(1),
            max_tokens: config.max_tokens,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

/// Packages computed facts into a prompt and obtains the explanation paragraph.
///
/// Generations queue on a fair semaphore so a backend that handles one completion at a time
/// is never driven concurrently.
pub struct ExplanationRequester<G> {
    generator: Arc<G>,
    prompts: PromptBuilder,
    gate: Arc<Semaphore>,
    policy: RequestPolicy,
}

impl<G> ExplanationRequester<G>
where
    G: TextGenerator + 'static,
{
    pub fn new(generator: Arc<G>, prompts: PromptBuilder, policy: RequestPolicy) -> Self {
        Self {
            generator,
            prompts,
            gate: Arc::new(Semaphore::new(policy.max_concurrent)),
            policy,
        }
    }

    /// Request the explanation; the generated text is returned as produced, minus outer whitespace.
    pub async fn explain(
        &self,
        response: &QuestionnaireResponse,
        selection: &MajorSelection,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest::deterministic(
            self.prompts.render(response, selection),
            self.policy.max_tokens,
        );

        let mut attempt = 1;
        loop {
            match self.attempt(&request).await {
                Ok(text) => {
                    let headline = selection.headline();
                    if !text.starts_with(&headline) {
                        warn!(attempt, expected = %headline, "explanation does not open with the major list");
                    }
                    info!(attempt, chars = text.len(), "explanation generated");
                    return Ok(text);
                }
                Err(err) if err.is_retryable() && attempt < self.policy.max_attempts => {
                    warn!(attempt, error = %err, "explanation attempt failed; retrying");
                    tokio::time::sleep(self.policy.retry_delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "explanation attempt failed");
                    return Err(GenerationError::Exhausted {
                        attempts: attempt,
                        last: Box::new(err),
                    });
                }
            }
        }
    }

    async fn attempt(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| GenerationError::GateClosed)?;

        let text = tokio::time::timeout(self.policy.timeout, self.generator.generate(request))
            .await
            .map_err(|_| GenerationError::Timeout {
                timeout_ms: self.policy.timeout.as_millis() as u64,
            })??;

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }
        Ok(text.to_string())
    }
}
