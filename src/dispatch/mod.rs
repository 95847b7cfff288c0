// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bridge between the synchronous TUI thread and the async assistant.
//!
//! The TUI enqueues at most one request at a time and tags it with the current session
//! generation; the worker answers with the same tag. A reply whose generation no longer matches
//! belongs to a replaced session and is dropped by the receiver, never an error. There is no
//! cancellation of an in-flight request.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::assistant::{Assistant, AssistantDispatchError, SessionHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerRequest {
    Chat {
        generation: u64,
        handle: SessionHandle,
        payload: String,
    },
    Diagram {
        generation: u64,
        diagram_prompt: String,
        dependency_prompt: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    ChatReply {
        generation: u64,
        result: Result<String, AssistantDispatchError>,
    },
    DiagramReady {
        generation: u64,
        graph: Result<String, AssistantDispatchError>,
        dependencies: Result<String, AssistantDispatchError>,
    },
}

impl WorkerEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::ChatReply { generation, .. } | Self::DiagramReady { generation, .. } => {
                *generation
            }
        }
    }
}

/// Serves requests until the TUI side hangs up. Requests are handled one at a time, which is
/// all the UI ever sends.
pub async fn run_worker<A: Assistant>(
    assistant: A,
    mut requests: UnboundedReceiver<WorkerRequest>,
    events: UnboundedSender<WorkerEvent>,
) {
    while let Some(request) = requests.recv().await {
        let event = match request {
            WorkerRequest::Chat { generation, handle, payload } => {
                let result = assistant.send_message(handle, &payload).await;
                WorkerEvent::ChatReply { generation, result }
            }
            WorkerRequest::Diagram { generation, diagram_prompt, dependency_prompt } => {
                let (graph, dependencies) = tokio::join!(
                    assistant.generate(&diagram_prompt, false),
                    assistant.generate(&dependency_prompt, true),
                );
                WorkerEvent::DiagramReady { generation, graph, dependencies }
            }
        };

        if events.send(event).is_err() {
            break;
        }
    }
}
