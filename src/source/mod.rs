// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document sources.
//!
//! Produces whole [`DocumentSet`]s, either from a project directory on disk or from the bundled
//! demo project. Loading never partially mutates an existing set; callers swap the returned set
//! in as one unit and restart the conversation session.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::{Document, DocumentSet};

/// Walks `dir` recursively and loads every UTF-8 text file into a document set.
///
/// Hidden entries (leading `.`) are skipped, as are files that do not decode as UTF-8. Paths in
/// the returned set are relative to `dir`, with `/` separators.
pub fn load_dir(dir: &Path) -> Result<DocumentSet, SourceError> {
    let mut documents = Vec::new();
    collect_documents(dir, dir, &mut documents)
        .map_err(|source| SourceError::Io { path: dir.to_path_buf(), source })?;

    if documents.is_empty() {
        return Err(SourceError::NoDocuments { dir: dir.to_path_buf() });
    }

    Ok(DocumentSet::new(documents))
}

fn collect_documents(root: &Path, dir: &Path, out: &mut Vec<Document>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_documents(root, &path, out)?;
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let bytes = fs::read(&path)?;
        let Ok(content) = String::from_utf8(bytes) else {
            // Binary file; not chat material.
            continue;
        };

        let relative = path.strip_prefix(root).unwrap_or(&path);
        let label = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        out.push(Document::new(label, content));
    }
    Ok(())
}

/// The bundled three-file demo project.
pub fn demo_documents() -> DocumentSet {
    DocumentSet::new([
        Document::new(
            "demo/main.js",
            "import { calculate } from './utils.js';\nconsole.log('Result:', calculate(5, 3));",
        ),
        Document::new(
            "demo/utils.js",
            "import { add } from './math.js';\nexport function calculate(a, b) {\n  return add(a, b) * 2;\n}",
        ),
        Document::new(
            "demo/math.js",
            "export function add(a, b) {\n  return a + b;\n}\nexport function subtract(a, b) {\n    return a-b;\n}",
        ),
    ])
}

#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: io::Error },
    NoDocuments { dir: PathBuf },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::NoDocuments { dir } => {
                write!(f, "no readable text files under {}", dir.display())
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NoDocuments { .. } => None,
        }
    }
}
