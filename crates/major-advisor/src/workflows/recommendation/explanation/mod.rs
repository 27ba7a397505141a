//! Boundary to the external text-generation capability.

mod generator;
mod llama;
mod prompt;
mod requester;

pub use generator::{GenerationError, GenerationRequest, TextGenerator, EXPLANATION_TEMPERATURE};
pub use llama::LlamaCppGenerator;
pub use prompt::{worked_example_submission, PromptBuilder};
pub use requester::{ExplanationRequester, RequestPolicy};
