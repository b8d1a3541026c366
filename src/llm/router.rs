use tracing::debug;

use super::anthropic::AnthropicProvider;
use super::ollama::OllamaProvider;
use super::openai::OpenAiProvider;
use super::provider::LlmProvider;
use crate::errors::VexError;

pub const AUTO: &str = "auto";
pub const OPENAI: &str = "openai";
pub const ANTHROPIC: &str = "anthropic";
pub const OLLAMA: &str = "ollama";

pub const NAMES: [&str; 4] = [AUTO, OPENAI, ANTHROPIC, OLLAMA];

fn env_api_key(var: &str) -> Result<String, VexError> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| VexError::Config(format!("{} is not set", var)))
}

/// Instantiate an LLM backend by name. An empty name or "auto" resolves to
/// OpenAI.
pub fn create_provider(
    name: &str,
    model: Option<&str>,
    base_url: Option<&str>,
) -> Result<Box<dyn LlmProvider>, VexError> {
    let name = match name {
        "" | AUTO => {
            debug!(name = OPENAI, "Automatically choosing LLM backend");
            OPENAI
        }
        other => other,
    };
    match name {
        OPENAI => {
            let api_key = env_api_key("OPENAI_API_KEY")?;
            Ok(Box::new(OpenAiProvider::new(&api_key, model)))
        }
        ANTHROPIC => {
            let api_key = env_api_key("ANTHROPIC_API_KEY")?;
            Ok(Box::new(AnthropicProvider::new(&api_key, model)))
        }
        OLLAMA => {
            let env_model = std::env::var("OLLAMA_MODEL").ok();
            let model = model.or(env_model.as_deref());
            Ok(Box::new(OllamaProvider::new(base_url, model)))
        }
        _ => Err(VexError::Config(format!(
            "unknown LLM backend {:?}, make sure to use one of {:?}",
            name, NAMES
        ))),
    }
}
