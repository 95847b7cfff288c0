// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Prompt construction for the external assistant.
//!
//! All document content sent to the assistant flows through [`files_block`] so every prompt
//! labels files the same way. Diagram replies come back as fenced ` ```mermaid ` blocks and the
//! dependency analysis as a JSON array of [`DependencyInfo`] records.

use regex::Regex;
use serde::Deserialize;

use crate::model::DocumentSet;

/// System instruction for the chat session.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert code analysis assistant. Analyze the \
provided files to answer user questions. Be concise and clear. When asked to generate a graph, \
provide a Mermaid.js graph definition in a 'mermaid' code block.";

const MERMAID_FENCE_PATTERN: &str = r"(?s)```mermaid\n(.*?)\n```";

/// Labeled dump of every document's path and content.
pub fn files_block(documents: &DocumentSet) -> String {
    let mut block = String::new();
    for document in documents.iter() {
        block.push_str("\n--- File: ");
        block.push_str(document.path());
        block.push_str(" ---\n");
        block.push_str(document.content());
    }
    block
}

/// Composite first-message payload: document dump, optional cached diagram, literal user text.
pub fn context_payload(
    documents: &DocumentSet,
    cached_diagram_source: Option<&str>,
    user_text: &str,
) -> String {
    let mut payload = format!("Analyzing the following files:\n{}", files_block(documents));

    if let Some(source) = cached_diagram_source {
        payload.push_str(
            "\n\nA Mermaid.js graph has already been generated with the following code. \
             Use it as context if the user asks about the graph.\n```mermaid\n",
        );
        payload.push_str(source);
        payload.push_str("\n```");
    }

    payload.push_str("\n\nUser query: ");
    payload.push_str(user_text);
    payload
}

/// One-shot prompt asking for a level-styled Mermaid class diagram of the documents.
pub fn diagram_prompt(documents: &DocumentSet) -> String {
    format!(
        "Analyze the following files and generate a detailed Mermaid.js class diagram. The \
         diagram should represent classes, their most important variables and methods, and the \
         relationships between them.\n\
         \n\
         Styling instructions:\n\
         1. Determine the dependency level of each class. Level 1 classes are top-level entry \
         points (e.g. containing 'main'). Level 2 are classes directly used by Level 1, and so \
         on.\n\
         2. After defining all classes and relationships, add a `style` directive for EACH class \
         to color it by level:\n\
         - Level 1: `style [ClassName] fill:#e8f5e9,stroke:#2e7d32,stroke-width:2`\n\
         - Level 2: `style [ClassName] fill:#e0f7fa,stroke:#0097a7,stroke-width:2`\n\
         - Level 3: `style [ClassName] fill:#e3f2fd,stroke:#1565c0,stroke-width:2`\n\
         - Other levels: `style [ClassName] fill:#e8eaf6,stroke:#283593,stroke-width:2`\n\
         \n\
         Formatting rules:\n\
         - Use `+String myVar` for public variables and `+void myMethod()` for public methods.\n\
         - Use a dotted arrow `..>` for a \"uses\" relationship.\n\
         - Use a solid arrow `-->` for \"creates and uses\" or similar direct relationships.\n\
         - Add labels to the relationships.\n\
         \n\
         Only output the Mermaid code inside a ```mermaid block. Do not add any other text or \
         explanation.\n{}",
        files_block(documents)
    )
}

/// One-shot prompt asking for the JSON dependency report.
pub fn dependency_prompt(documents: &DocumentSet) -> String {
    format!(
        "Analyze the provided code files and identify all imported modules or files. This \
         includes both external libraries and local file imports (e.g. './utils.js').\n\
         \n\
         For each imported item, create a JSON object with the following properties:\n\
         - \"name\": the name or path of the imported module as it appears in the code.\n\
         - \"version\": the version number for an external library, the string \"local\" for a \
         local file, or \"N/A\" when unknown.\n\
         - \"description\": a brief, one-sentence description of what the import provides.\n\
         \n\
         Return the result as a single JSON array of these objects. If no imports are found, \
         return an empty JSON array [].\n{}",
        files_block(documents)
    )
}

/// Extracts the first fenced ` ```mermaid ` block from an assistant reply.
pub fn extract_mermaid_block(text: &str) -> Option<String> {
    let fence = Regex::new(MERMAID_FENCE_PATTERN).ok()?;
    fence
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str().to_owned())
}

/// One entry of the assistant's dependency report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyInfo {
    pub name: String,
    #[serde(default = "unknown_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

fn unknown_version() -> String {
    "N/A".to_owned()
}

/// Parses the JSON array the dependency prompt asks for.
pub fn parse_dependency_report(text: &str) -> Result<Vec<DependencyInfo>, serde_json::Error> {
    serde_json::from_str(text.trim())
}
