// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Documents are the uploaded source files, a session is one conversation scoped to one document
//! set, and the transform is the pan/zoom state of the diagram viewport.

pub mod document;
pub mod session;
pub mod transform;

pub use document::{Document, DocumentSet};
pub use session::{ContextState, ConversationSession, Exchange, Role};
pub use transform::{Transform, BUTTON_ZOOM_STEP, MAX_SCALE, MIN_SCALE, WHEEL_ZOOM_STEP};
