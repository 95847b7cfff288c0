// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pan/zoom transform applied to a rendered diagram surface.
//!
//! The transform is renderer-agnostic: translate is expressed in surface cells and scale is a
//! uniform factor. Out-of-range scale requests are clamped, never rejected.

/// Lower bound for the uniform scale factor.
pub const MIN_SCALE: f64 = 0.2;
/// Upper bound for the uniform scale factor.
pub const MAX_SCALE: f64 = 3.0;
/// Scale delta applied per wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;
/// Scale delta applied per explicit zoom-in/zoom-out request.
pub const BUTTON_ZOOM_STEP: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    translate_x: f64,
    translate_y: f64,
    scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0 }
    }

    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    pub fn translate_y(&self) -> f64 {
        self.translate_y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_translate(&mut self, translate_x: f64, translate_y: f64) {
        self.translate_x = translate_x;
        self.translate_y = translate_y;
    }

    /// Adds `delta` to the scale, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn zoom_by(&mut self, delta: f64) {
        self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Transform, MAX_SCALE, MIN_SCALE};

    #[test]
    fn identity_starts_at_origin_with_unit_scale() {
        let transform = Transform::identity();
        assert_eq!(transform.translate_x(), 0.0);
        assert_eq!(transform.translate_y(), 0.0);
        assert_eq!(transform.scale(), 1.0);
        assert!(transform.is_identity());
    }

    #[rstest]
    #[case(&[0.1, 0.1, 0.1], 1.3)]
    #[case(&[-0.5, -0.5], MIN_SCALE)]
    #[case(&[5.0], MAX_SCALE)]
    #[case(&[5.0, -0.2], 2.8)]
    #[case(&[-10.0, 0.1], 0.3)]
    fn zoom_by_clamps_scale(#[case] deltas: &[f64], #[case] expected: f64) {
        let mut transform = Transform::identity();
        for delta in deltas {
            transform.zoom_by(*delta);
        }
        assert!((transform.scale() - expected).abs() < 1e-9);
    }

    #[test]
    fn scale_stays_in_range_for_arbitrary_sequences() {
        let mut transform = Transform::identity();
        let deltas = [0.7, -3.4, 11.0, -0.1, 0.25, -99.0, 42.0];
        for delta in deltas {
            transform.zoom_by(delta);
            assert!(transform.scale() >= MIN_SCALE);
            assert!(transform.scale() <= MAX_SCALE);
        }
    }

    #[test]
    fn reset_restores_identity_regardless_of_prior_state() {
        let mut transform = Transform::identity();
        transform.set_translate(-12.5, 88.0);
        transform.zoom_by(1.7);
        transform.reset();
        assert!(transform.is_identity());
    }
}
