//! llama.cpp command-line backend.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::generator::{GenerationError, GenerationRequest, TextGenerator};
use crate::config::GenerationConfig;

const STDERR_SNIPPET_CHARS: usize = 500;

/// Runs one llama.cpp completion process per request against a local GGUF model.
#[derive(Debug, Clone)]
pub struct LlamaCppGenerator {
    config: GenerationConfig,
}

impl LlamaCppGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Command-line arguments for a single non-interactive completion.
    pub fn args(&self, request: &GenerationRequest) -> Vec<String> {
        let config = &self.config;
        let mut args = vec![
            "-m".to_string(),
            config.model_path.display().to_string(),
            "-c".to_string(),
            config.context_size.to_string(),
            "-ngl".to_string(),
            config.gpu_layers.to_string(),
            "-b".to_string(),
            config.batch_size.to_string(),
            "-n".to_string(),
            request.max_tokens.to_string(),
            "--temp".to_string(),
            request.temperature.to_string(),
        ];

        if !config.use_mmap {
            args.push("--no-mmap".to_string());
        }
        if config.use_mlock {
            args.push("--mlock".to_string());
        }

        args.push("--no-display-prompt".to_string());
        args.push("-no-cnv".to_string());
        args.push("-p".to_string());
        args.push(request.prompt.clone());
        args
    }
}

#[async_trait]
impl TextGenerator for LlamaCppGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let mut cmd = Command::new(&self.config.binary);
        cmd.kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .args(self.args(request));

        debug!(
            binary = %self.config.binary.display(),
            model = %self.config.model_path.display(),
            prompt_chars = request.prompt.len(),
            "launching llama.cpp completion"
        );

        let output = cmd.output().await.map_err(|source| GenerationError::Spawn {
            binary: self.config.binary.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerationError::Exit {
                status: output.status.to_string(),
                stderr: truncate_snippet(stderr.trim(), STDERR_SNIPPET_CHARS),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }

        Ok(text.to_string())
    }
}

fn truncate_snippet(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut snippet: String = value.chars().take(max_chars).collect();
    snippet.push_str("...");
    snippet
}
