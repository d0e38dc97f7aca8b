//! OpenAI-compatible chat generator.
//!
//! Implements the library's [`TextGenerator`] boundary over a blocking HTTP
//! client. The boundary contract is absorbed here: any transport, HTTP, or
//! decoding failure logs a warning and hands the original text back, so the
//! engine simply reports the unit as unchanged.

use redraft::{GenerateRequest, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatGenerator {
    client: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatGenerator {
    /// Create a generator for the given endpoint and model.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        }
    }

    fn build_messages(&self, request: &GenerateRequest<'_>) -> Vec<ChatMessage> {
        let mut system = String::from(
            "You are an expert document revision assistant. \
             Return ONLY the revised text, without explanations, without \
             comments, without markdown formatting. \
             Preserve the exact structure of the text (line breaks, spacing).",
        );

        if request.is_correction {
            if let Some(language) = request.language {
                system.push_str(&format!(
                    "\nThe document is written in {language}. Apply the correction in that language."
                ));
            }
        }

        let mut messages = vec![ChatMessage {
            role: "system",
            content: system,
        }];

        if !request.context.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: format!("Context: {}", request.context),
            });
        }

        messages.push(ChatMessage {
            role: "user",
            content: format!("{}\n\nText:\n{}", request.instruction, request.text),
        });

        messages
    }

    fn complete(&self, request: &GenerateRequest<'_>) -> Result<String, Box<dyn std::error::Error>> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: self.build_messages(request),
            temperature: self.temperature,
        };

        let response: ChatResponse = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or("empty choices in chat response")?
            .message
            .content;

        Ok(content.trim().to_string())
    }
}

impl TextGenerator for ChatGenerator {
    fn generate(&self, request: &GenerateRequest<'_>) -> String {
        match self.complete(request) {
            Ok(content) if !content.is_empty() => content,
            Ok(_) => {
                log::warn!("chat endpoint returned empty content; keeping original text");
                request.text.to_string()
            }
            Err(err) => {
                log::warn!("chat request failed: {err}; keeping original text");
                request.text.to_string()
            }
        }
    }
}
