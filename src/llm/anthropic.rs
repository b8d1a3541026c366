use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::observer::ChunkObserver;
use super::provider::LlmProvider;
use super::types::GenerateOptions;
use crate::errors::VexError;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self::with_base_url(api_key, model, "https://api.anthropic.com")
    }

    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("claude-sonnet-4-5-20250929").to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn generate(
        &self,
        system: &str,
        human: &str,
        opts: &GenerateOptions,
        observer: &dyn ChunkObserver,
    ) -> Result<String, VexError> {
        // No native schema-constrained mode; the schema travels in the system
        // prompt instead.
        let mut system = system.to_string();
        if let Some(schema) = &opts.json_schema {
            system.push_str(&format!(
                "\nRespond with a single JSON object matching this schema, and nothing else:\n{}\n",
                serde_json::to_string(schema)?
            ));
        }

        let mut body = json!({
            "model": self.model,
            "max_tokens": 4096,
            "system": system,
            "messages": [{"role": "user", "content": human}],
        });
        if opts.temperature > 0.0 {
            body["temperature"] = json!(opts.temperature);
        }

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| VexError::Network(format!("Anthropic request failed: {}", e)))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(VexError::RateLimit("Anthropic rate limit exceeded".into()));
        }
        if status.as_u16() == 401 {
            return Err(VexError::Authentication("Invalid Anthropic API key".into()));
        }
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
            .map_err(|e| VexError::LlmApi(format!("Failed to parse Anthropic response: {}", e)))?;

        if let Some(error) = data.get("error") {
            let msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(VexError::LlmApi(msg.to_string()));
        }

        let content = data["content"][0]["text"]
            .as_str()
            .ok_or_else(|| VexError::LlmApi("No content in Anthropic response".into()))?
            .to_string();

        let input_tokens = data["usage"]["input_tokens"].as_u64();
        let output_tokens = data["usage"]["output_tokens"].as_u64();
        debug!(model = %self.model, input_tokens, output_tokens, "Anthropic completion");

        observer.on_chunk(&content);
        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
