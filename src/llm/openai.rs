use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::observer::ChunkObserver;
use super::provider::LlmProvider;
use super::types::GenerateOptions;
use crate::errors::VexError;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self::with_base_url(api_key, model, "https://api.openai.com/v1")
    }

    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gpt-4o").to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
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
            "stream": true,
        });
        body["response_format"] = match &opts.json_schema {
            Some(schema) => json!({
                "type": "json_schema",
                "json_schema": {"name": "triage", "schema": schema, "strict": true},
            }),
            None => json!({"type": "json_object"}),
        };
        if opts.temperature > 0.0 {
            debug!(temperature = opts.temperature, "Using temperature");
            body["temperature"] = json!(opts.temperature);
        }
        if opts.seed != 0 {
            debug!(seed = opts.seed, "Using seed");
            body["seed"] = json!(opts.seed);
        }

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| VexError::Network(format!("OpenAI request failed: {}", e)))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            let text = resp.text().await.unwrap_or_default();
            return Err(VexError::RateLimit(format!(
                "API returned unexpected status code: 429: {}",
                text
            )));
        }
        if status.as_u16() == 401 {
            return Err(VexError::Authentication("Invalid OpenAI API key".into()));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(VexError::LlmApi(format!(
                "API returned unexpected status code: {}: {}",
                status.as_u16(),
                text
            )));
        }

        // SSE stream: one "data: {json}" event per delta, closed by "data: [DONE]".
        let mut content = String::new();
        let mut lines = LineBuffer::default();
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes =
                chunk.map_err(|e| VexError::Network(format!("OpenAI stream failed: {}", e)))?;
            for line in lines.split_lines(&bytes) {
                let Some(data) = line.strip_prefix("data: ") else {
                    continue;
                };
                if data == "[DONE]" {
                    continue;
                }
                let event: Value = serde_json::from_str(data).map_err(|e| {
                    VexError::LlmApi(format!("Failed to parse OpenAI stream event: {}", e))
                })?;
                if let Some(delta) = event["choices"][0]["delta"]["content"].as_str() {
                    observer.on_chunk(delta);
                    content.push_str(delta);
                }
            }
        }

        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Reassembles SSE lines from raw network chunks. A chunk boundary can fall
/// inside a multi-byte UTF-8 sequence, so bytes are buffered and decoded only
/// once a full line is available.
#[derive(Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn split_lines(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_buffer_splits_complete_lines() {
        let mut buf = LineBuffer::default();
        assert_eq!(
            buf.split_lines(b"data: a\r\ndata: b\n\ndata: c"),
            vec!["data: a", "data: b", ""]
        );
        assert_eq!(buf.split_lines(b"hunk\n"), vec!["data: chunk"]);
    }

    #[test]
    fn test_line_buffer_keeps_multibyte_chars_split_across_chunks() {
        // "é" is 0xC3 0xA9; split it between two network chunks
        let full = "data: {\"delta\":\"café\"}\n".as_bytes();
        let cut = full.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut buf = LineBuffer::default();
        assert!(buf.split_lines(&full[..cut]).is_empty());
        let lines = buf.split_lines(&full[cut..]);
        assert_eq!(lines, vec!["data: {\"delta\":\"café\"}"]);
        assert!(!lines[0].contains('\u{FFFD}'));
    }

    #[test]
    fn test_line_buffer_trailing_bytes_stay_pending() {
        let mut buf = LineBuffer::default();
        assert!(buf.split_lines(b"no newline yet").is_empty());
        assert_eq!(buf.split_lines(b"\n"), vec!["no newline yet"]);
    }
}
