// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! External assistant collaborator.
//!
//! The [`Assistant`] port consumes an outgoing message string plus an opaque session handle and
//! produces a response string. Adapters own the session-side multi-turn history; the rest of the
//! crate never re-sends transcript text. Failures surface as [`AssistantDispatchError`] and are
//! recovered at the UI boundary.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub mod gemini;

pub use gemini::GeminiAssistant;

/// Opaque handle naming one assistant-side conversation.
///
/// A new handle is issued whenever the document set is replaced, so a reply that arrives for an
/// old handle can simply be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

pub type AssistantFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, AssistantDispatchError>> + Send + 'a>>;

pub trait Assistant: Send + Sync {
    /// Dispatches one chat message within the session named by `handle`.
    fn send_message<'a>(&'a self, handle: SessionHandle, message: &'a str) -> AssistantFuture<'a>;

    /// One-shot generation outside any chat session. With `json` set the assistant is asked for
    /// a raw JSON response body.
    fn generate<'a>(&'a self, prompt: &'a str, json: bool) -> AssistantFuture<'a>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantDispatchError {
    /// The credential environment variable is not set.
    MissingCredential { variable: &'static str },
    /// The request never produced an HTTP response.
    Transport { detail: String },
    /// The service answered with a non-success status (quota, auth, bad request).
    Api { status: u16, detail: String },
    /// The response arrived but did not have the expected shape.
    Shape { detail: String },
}

impl fmt::Display for AssistantDispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential { variable } => {
                write!(f, "assistant credential missing (set {variable})")
            }
            Self::Transport { detail } => write!(f, "assistant request failed: {detail}"),
            Self::Api { status, detail } => {
                write!(f, "assistant API error (status={status}): {detail}")
            }
            Self::Shape { detail } => write!(f, "unexpected assistant response: {detail}"),
        }
    }
}

impl Error for AssistantDispatchError {}
