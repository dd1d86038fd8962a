// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Gemini provider (generateContent API).
//!
//! The primary provider. Critique calls request structured output through
//! the API's response schema, so the model is constrained to the suggestion
//! array shape before parsing even starts; parsing stays strict anyway.

use jangin::backend::Backend;
use jangin::error::{Error, Result};
use jangin::profile::InstructionProfile;
use jangin::suggestion::{parse_suggestions, Suggestion};
use reqwest::blocking::Client;
use serde_json::Value;

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini backend over the generateContent endpoint.
pub struct Gemini {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
}

impl Gemini {
    /// Create a Gemini backend with default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL.
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

    /// Build the request body. `structured` constrains the response to the
    /// suggestion array schema.
    fn request_body(&self, system: &str, user: &str, structured: bool) -> Value {
        let mut generation_config = serde_json::json!({
            "temperature": self.temperature,
        });
        if structured {
            generation_config["responseMimeType"] = Value::String("application/json".to_string());
            generation_config["responseSchema"] = serde_json::json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {"type": "STRING"},
                        "improvement": {"type": "STRING"},
                        "reason": {"type": "STRING"}
                    },
                    "required": ["category", "improvement", "reason"]
                }
            });
        }
        serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": user}]}],
            "systemInstruction": {"parts": [{"text": system}]},
            "generationConfig": generation_config,
        })
    }

    fn generate(&self, system: &str, user: &str, structured: bool) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        tracing::debug!(model = %self.model, structured, "gemini call");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&self.request_body(system, user, structured))
            .send()
            .map_err(|e| Error::backend(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::backend(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::backend(format!(
                "Gemini API error ({status}): {response_text}"
            )));
        }

        let json: Value = serde_json::from_str(&response_text)
            .map_err(|e| Error::backend(format!("Failed to parse Gemini response: {e}")))?;

        json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|candidate| candidate["content"]["parts"].as_array())
            .and_then(|parts| parts.first())
            .and_then(|part| part["text"].as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::backend(format!("Unexpected Gemini response format: {json}")))
    }
}

impl Backend for Gemini {
    fn refine(&self, text: &str, profile: &InstructionProfile) -> Result<String> {
        self.generate(&profile.refine_instruction(), text, false)
    }

    fn critique(&self, text: &str, profile: &InstructionProfile) -> Result<Vec<Suggestion>> {
        let user = format!("{}\n{}", profile.critique_preamble(), text);
        let raw = self.generate(&profile.critique_instruction(), &user, true)?;
        parse_suggestions(&raw)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
