// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Uploaded source documents.
//!
//! A [`DocumentSet`] is only ever replaced as a whole unit; there is no partial mutation. Paths
//! are unique within the set and iteration order is stable (sorted by path).

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: String,
    content: String,
}

impl Document {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    documents: BTreeMap<String, Document>,
}

impl DocumentSet {
    pub fn new(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents = documents
            .into_iter()
            .map(|document| (document.path.clone(), document))
            .collect();
        Self { documents }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentSet};

    #[test]
    fn paths_are_unique_and_sorted() {
        let documents = DocumentSet::new([
            Document::new("b.js", "two"),
            Document::new("a.js", "one"),
            Document::new("b.js", "latest"),
        ]);

        assert_eq!(documents.len(), 2);
        assert_eq!(documents.paths().collect::<Vec<_>>(), ["a.js", "b.js"]);
        assert_eq!(documents.get("b.js").map(Document::content), Some("latest"));
    }

    #[test]
    fn empty_set_reports_empty() {
        let documents = DocumentSet::default();
        assert!(documents.is_empty());
        assert_eq!(documents.len(), 0);
        assert!(documents.get("a.js").is_none());
    }
}
