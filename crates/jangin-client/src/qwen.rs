// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Qwen provider (OpenAI-compatible chat completions).
//!
//! The secondary provider, speaking DashScope's compatible-mode endpoint.
//! Chat-tuned Qwen models routinely wrap the critique array in prose, so
//! critique relies on the engine's documented payload extraction before
//! strict validation.

use jangin::backend::Backend;
use jangin::error::{Error, Result};
use jangin::profile::InstructionProfile;
use jangin::suggestion::{parse_suggestions, Suggestion};
use reqwest::blocking::Client;
use serde_json::Value;

/// Default Qwen model.
pub const DEFAULT_QWEN_MODEL: &str = "qwen-plus";

const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// Qwen backend over an OpenAI-compatible chat completions endpoint.
pub struct Qwen {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
}

impl Qwen {
    /// Create a Qwen backend with default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_QWEN_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL (any OpenAI-compatible server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// The model in use.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, system: &str, user: &str) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "temperature": self.temperature,
        })
    }

    fn chat(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        tracing::debug!(model = %self.model, "qwen call");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&self.request_body(system, user))
            .send()
            .map_err(|e| Error::backend(format!("Qwen API request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::backend(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::backend(format!(
                "Qwen API error ({status}): {response_text}"
            )));
        }

        let json: Value = serde_json::from_str(&response_text)
            .map_err(|e| Error::backend(format!("Failed to parse Qwen response: {e}")))?;

        json["choices"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::backend(format!("Unexpected Qwen response format: {json}")))
    }
}

impl Backend for Qwen {
    fn refine(&self, text: &str, profile: &InstructionProfile) -> Result<String> {
        self.chat(&profile.refine_instruction(), text)
    }

    fn critique(&self, text: &str, profile: &InstructionProfile) -> Result<Vec<Suggestion>> {
        let user = format!("{}\n{}", profile.critique_preamble(), text);
        let raw = self.chat(&profile.critique_instruction(), &user)?;
        parse_suggestions(&raw)
    }

    fn name(&self) -> &str {
        "qwen"
    }
}
