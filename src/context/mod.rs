// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Conversation context management.
//!
//! The assistant keeps its own multi-turn history once a session exists, so the one non-trivial
//! job here is deciding whether to prepend the full document contents to an outgoing message.
//! That happens exactly once per session; replacing the document set must recreate the session
//! so stale context never silently persists across a swap.

use std::error::Error;
use std::fmt;

use crate::model::{ConversationSession, DocumentSet, Role};
use crate::prompt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContextManager {
    session: ConversationSession,
}

impl ConversationContextManager {
    pub fn new() -> Self {
        Self { session: ConversationSession::new() }
    }

    /// Replaces the current session with a fresh one.
    ///
    /// Called on startup and whenever the document set is replaced; drops the transcript, the
    /// cached diagram source, and the context-sent flag in one move.
    pub fn start_session(&mut self) {
        self.session = ConversationSession::new();
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Builds the payload to dispatch for `user_text`.
    ///
    /// On the first message of a session this is the composite payload (document dump, optional
    /// cached diagram block, literal user text) and the session flips to `ContextSent`; on every
    /// later message it is the literal user text unchanged. Whitespace-only input is rejected
    /// before any state changes.
    pub fn prepare_outgoing_message(
        &mut self,
        user_text: &str,
        documents: &DocumentSet,
        cached_diagram_source: Option<&str>,
    ) -> Result<String, EmptyMessageError> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(EmptyMessageError);
        }

        if self.session.context_sent() {
            return Ok(user_text.to_owned());
        }

        let payload = prompt::context_payload(documents, cached_diagram_source, user_text);
        self.session.mark_context_sent();
        Ok(payload)
    }

    /// Appends a `(role, text)` pair to the transcript. Display/audit only; the transcript is
    /// never sent back to the assistant verbatim.
    pub fn record_exchange(&mut self, role: Role, text: impl Into<String>) {
        self.session.record(role, text.into());
    }

    /// Caches the Mermaid source of a successfully generated diagram on the current session.
    pub fn note_diagram_generated(&mut self, source: impl Into<String>) {
        self.session.set_cached_diagram_source(Some(source.into()));
    }
}

/// The outgoing text was empty; nothing was sent and no state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyMessageError;

impl fmt::Display for EmptyMessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "outgoing message is empty")
    }
}

impl Error for EmptyMessageError {}
