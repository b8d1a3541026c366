use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::observer::ChunkObserver;
use super::provider::LlmProvider;
use super::types::GenerateOptions;
use crate::errors::VexError;

/// Talks to a local Ollama daemon through its OpenAI-compatible endpoint.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: Option<&str>, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url
                .unwrap_or("http://localhost:11434/v1")
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or("llama3").to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(
        &self,
        system: &str,
        human: &str,
        opts: &GenerateOptions,
        observer: &dyn ChunkObserver,
    ) -> Result<String, VexError> {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": human},
            ],
            "response_format": {"type": "json_object"},
        });
        if opts.temperature > 0.0 {
            body["temperature"] = json!(opts.temperature);
        }
        if opts.seed != 0 {
            body["seed"] = json!(opts.seed);
        }

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| VexError::Network(format!("Ollama request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(VexError::LlmApi(format!(
                "API returned unexpected status code: {}: {}",
                status.as_u16(),
                text
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| VexError::LlmApi(format!("Failed to parse Ollama response: {}", e)))?;

        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| VexError::LlmApi("No content in Ollama response".into()))?
            .to_string();

        observer.on_chunk(&content);
        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
