// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Gemini `generateContent` adapter for the [`Assistant`] port.
//!
//! The adapter keeps the multi-turn wire history per session handle; a handle change resets it.
//! A failed dispatch leaves the history untouched so the next attempt replays the same state.
//! The API key is read from the environment at dispatch time and never stored.

use std::env;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::prompt::SYSTEM_INSTRUCTION;

use super::{Assistant, AssistantDispatchError, AssistantFuture, SessionHandle};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default model, overridable with `--model`.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiAssistant {
    client: reqwest::Client,
    model: String,
    history: Mutex<ChatHistory>,
}

#[derive(Debug, Default)]
struct ChatHistory {
    handle: Option<SessionHandle>,
    turns: Vec<WireContent>,
}

impl ChatHistory {
    /// Returns the turns for `handle`, dropping history that belongs to a replaced session.
    fn turns_for(&mut self, handle: SessionHandle) -> &[WireContent] {
        if self.handle != Some(handle) {
            self.handle = Some(handle);
            self.turns.clear();
        }
        &self.turns
    }
}

impl GeminiAssistant {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            history: Mutex::new(ChatHistory::default()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/{}:generateContent", self.model)
    }

    async fn dispatch(
        &self,
        contents: Vec<WireContent>,
        system_instruction: Option<&str>,
        json: bool,
    ) -> Result<String, AssistantDispatchError> {
        let api_key = env::var(API_KEY_VAR)
            .map_err(|_| AssistantDispatchError::MissingCredential { variable: API_KEY_VAR })?;

        let body = GenerateRequest {
            contents,
            system_instruction: system_instruction.map(|text| WireSystemInstruction {
                parts: vec![WirePart { text: text.to_owned() }],
            }),
            generation_config: json
                .then_some(GenerationConfig { response_mime_type: "application/json" }),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| AssistantDispatchError::Transport { detail: err.to_string() })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| AssistantDispatchError::Transport { detail: err.to_string() })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiError>(&text)
                .map(|error| error.error.message)
                .unwrap_or(text);
            return Err(AssistantDispatchError::Api { status: status.as_u16(), detail });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|err| AssistantDispatchError::Shape { detail: err.to_string() })?;

        reply_text(parsed)
    }
}

impl Assistant for GeminiAssistant {
    fn send_message<'a>(&'a self, handle: SessionHandle, message: &'a str) -> AssistantFuture<'a> {
        Box::pin(async move {
            let user_turn = WireContent::user(message);

            let contents = {
                let mut history = self.history.lock().await;
                let mut contents = history.turns_for(handle).to_vec();
                contents.push(user_turn.clone());
                contents
            };

            let reply = self.dispatch(contents, Some(SYSTEM_INSTRUCTION), false).await?;

            let mut history = self.history.lock().await;
            if history.handle == Some(handle) {
                history.turns.push(user_turn);
                history.turns.push(WireContent::model(&reply));
            }
            Ok(reply)
        })
    }

    fn generate<'a>(&'a self, prompt: &'a str, json: bool) -> AssistantFuture<'a> {
        Box::pin(async move { self.dispatch(vec![WireContent::user(prompt)], None, json).await })
    }
}

fn reply_text(response: GenerateResponse) -> Result<String, AssistantDispatchError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AssistantDispatchError::Shape { detail: "no candidates".to_owned() })?;

    let content = candidate
        .content
        .ok_or_else(|| AssistantDispatchError::Shape { detail: "candidate without content".to_owned() })?;

    if content.parts.is_empty() {
        return Err(AssistantDispatchError::Shape { detail: "candidate without parts".to_owned() });
    }

    Ok(content.parts.into_iter().map(|part| part.text).collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct WireContent {
    role: String,
    parts: Vec<WirePart>,
}

impl WireContent {
    fn user(text: &str) -> Self {
        Self { role: "user".to_owned(), parts: vec![WirePart { text: text.to_owned() }] }
    }

    fn model(text: &str) -> Self {
        Self { role: "model".to_owned(), parts: vec![WirePart { text: text.to_owned() }] }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct WirePart {
    text: String,
}

#[derive(Serialize)]
struct WireSystemInstruction {
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<WireContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireSystemInstruction>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<WireContent>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}
