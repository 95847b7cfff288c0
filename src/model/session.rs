// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One logical conversation with the external assistant, scoped to one document set.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    role: Role,
    text: String,
}

impl Exchange {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self { role, text: text.into() }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Whether the full document context is still owed to the assistant.
///
/// Transitions `Pending` → `Sent` exactly once per session, and only through
/// [`crate::context::ConversationContextManager::prepare_outgoing_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Pending,
    Sent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    transcript: Vec<Exchange>,
    context_state: ContextState,
    cached_diagram_source: Option<String>,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            context_state: ContextState::Pending,
            cached_diagram_source: None,
        }
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    pub fn context_state(&self) -> ContextState {
        self.context_state
    }

    pub fn context_sent(&self) -> bool {
        self.context_state == ContextState::Sent
    }

    pub(crate) fn mark_context_sent(&mut self) {
        self.context_state = ContextState::Sent;
    }

    pub(crate) fn record(&mut self, role: Role, text: String) {
        self.transcript.push(Exchange::new(role, text));
    }

    pub fn cached_diagram_source(&self) -> Option<&str> {
        self.cached_diagram_source.as_deref()
    }

    pub(crate) fn set_cached_diagram_source(&mut self, source: Option<String>) {
        self.cached_diagram_source = source;
    }
}
