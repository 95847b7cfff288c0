// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text surface the diagram viewport attaches to.
//!
//! The external renderer owns real diagram layout; this surface shows the textual diagram
//! description and projects the viewport transform onto it. Translate maps to an offset in
//! cells and uniform scale is approximated by sampling rows and columns at `1/scale`.

use crate::model::Transform;
use crate::viewport::RenderSurface;

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSurface {
    grid: Vec<Vec<char>>,
    transform: Transform,
}

impl RenderSurface for DiagramSurface {
    fn apply_transform(&mut self, transform: &Transform) {
        self.transform = *transform;
    }
}

impl DiagramSurface {
    /// Builds a surface from a textual diagram description; `None` when there is nothing to
    /// show, so the caller can report a failed attach.
    pub fn from_source(source: &str) -> Option<Self> {
        if source.trim().is_empty() {
            return None;
        }
        let grid = source.lines().map(|line| line.chars().collect()).collect();
        Some(Self { grid, transform: Transform::identity() })
    }

    pub fn line_count(&self) -> usize {
        self.grid.len()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Renders the viewport window: display cell `(col, row)` samples source cell
    /// `((col - translate_x) / scale, (row - translate_y) / scale)`.
    pub fn visible_lines(&self, width: u16, height: u16) -> Vec<String> {
        let scale = self.transform.scale();
        let translate_x = self.transform.translate_x();
        let translate_y = self.transform.translate_y();

        (0..height)
            .map(|row| {
                let source_row = (f64::from(row) - translate_y) / scale;
                if source_row < 0.0 {
                    return " ".repeat(width as usize);
                }
                let Some(line) = self.grid.get(source_row as usize) else {
                    return " ".repeat(width as usize);
                };

                (0..width)
                    .map(|col| {
                        let source_col = (f64::from(col) - translate_x) / scale;
                        if source_col < 0.0 {
                            return ' ';
                        }
                        line.get(source_col as usize).copied().unwrap_or(' ')
                    })
                    .collect()
            })
            .collect()
    }
}
