// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea — terminal code-analysis chat with Mermaid class diagrams.
//!
//! Load a source tree, chat about it with a Gemini-backed assistant, and pan/zoom the
//! generated class diagram without leaving the terminal.

pub mod assistant;
pub mod context;
pub mod dispatch;
pub mod model;
pub mod prompt;
pub mod source;
pub mod tui;
pub mod viewport;
