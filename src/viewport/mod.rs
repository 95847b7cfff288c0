// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Viewport controller for a rendered diagram surface.
//!
//! The controller owns the pan/zoom [`Transform`] and translates pointer/wheel input into
//! transform updates, independent of what is rendered. Whatever produced the surface must
//! re-attach it here whenever it is replaced; attaching resets the transform to identity.
//!
//! Two states, `Idle` and `Panning`. Zoom operations are valid in either state and do not
//! change it. No operation fails: out-of-range scale requests are clamped silently.

use std::error::Error;
use std::fmt;

use crate::model::{Transform, BUTTON_ZOOM_STEP, WHEEL_ZOOM_STEP};

/// A pointer position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPoint {
    pub x: f64,
    pub y: f64,
}

impl PointerPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Anything the controller can project its transform onto.
pub trait RenderSurface {
    fn apply_transform(&mut self, transform: &Transform);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PanState {
    Idle,
    Panning { grab_x: f64, grab_y: f64 },
}

#[derive(Debug)]
pub struct ViewportController<S> {
    transform: Transform,
    pan: PanState,
    surface: Option<S>,
}

impl<S: RenderSurface> Default for ViewportController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> ViewportController<S> {
    pub fn new() -> Self {
        Self { transform: Transform::identity(), pan: PanState::Idle, surface: None }
    }

    /// Attaches a freshly rendered surface and resets the transform to identity.
    ///
    /// `None` means the renderer produced nothing to attach to; the controller stays on its
    /// previous surface (if any) and the caller gets a [`RenderAttachError`] to report.
    pub fn attach(&mut self, surface: Option<S>) -> Result<(), RenderAttachError> {
        let Some(mut surface) = surface else {
            return Err(RenderAttachError);
        };

        self.transform.reset();
        self.pan = PanState::Idle;
        surface.apply_transform(&self.transform);
        self.surface = Some(surface);
        Ok(())
    }

    pub fn detach(&mut self) {
        self.surface = None;
        self.transform.reset();
        self.pan = PanState::Idle;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.pan, PanState::Panning { .. })
    }

    /// Records the pointer offset against the current translate and enters `Panning`.
    /// No-op if a pan is already in progress.
    pub fn begin_pan(&mut self, pointer: PointerPoint) {
        if self.is_panning() {
            return;
        }
        self.pan = PanState::Panning {
            grab_x: pointer.x - self.transform.translate_x(),
            grab_y: pointer.y - self.transform.translate_y(),
        };
    }

    /// While panning, sets translate to `pointer - recorded offset` and applies the transform.
    /// Ignored outside the `Panning` state.
    pub fn update_pan(&mut self, pointer: PointerPoint) {
        let PanState::Panning { grab_x, grab_y } = self.pan else {
            return;
        };
        self.transform.set_translate(pointer.x - grab_x, pointer.y - grab_y);
        self.apply();
    }

    /// Leaves the `Panning` state. Idempotent, and also used when the pointer leaves the
    /// tracked surface so a missed pointer-up event cannot leave the pan stuck.
    pub fn end_pan(&mut self) {
        self.pan = PanState::Idle;
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.transform.zoom_by(delta);
        self.apply();
    }

    /// Maps a single wheel tick to a zoom step; scroll down zooms out.
    pub fn zoom_at_wheel(&mut self, direction: WheelDirection) {
        let delta = match direction {
            WheelDirection::Up => WHEEL_ZOOM_STEP,
            WheelDirection::Down => -WHEEL_ZOOM_STEP,
        };
        self.zoom_by(delta);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-BUTTON_ZOOM_STEP);
    }

    pub fn reset(&mut self) {
        self.transform.reset();
        self.apply();
    }

    fn apply(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.apply_transform(&self.transform);
        }
    }
}

/// The controller was handed nothing to attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderAttachError;

impl fmt::Display for RenderAttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no rendered surface to attach to")
    }
}

impl Error for RenderAttachError {}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::model::{Transform, MAX_SCALE, MIN_SCALE};

    use super::{PointerPoint, RenderSurface, ViewportController, WheelDirection};

    /// Test surface that remembers every transform applied to it.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        applied: Vec<Transform>,
    }

    impl RenderSurface for RecordingSurface {
        fn apply_transform(&mut self, transform: &Transform) {
            self.applied.push(*transform);
        }
    }

    fn attached_controller() -> ViewportController<RecordingSurface> {
        let mut controller = ViewportController::new();
        controller.attach(Some(RecordingSurface::default())).expect("attach");
        controller
    }

    #[test]
    fn attach_none_reports_error_and_keeps_prior_surface() {
        let mut controller = attached_controller();
        controller.zoom_in();

        controller.attach(None).unwrap_err();
        assert!(controller.surface().is_some());
        assert!((controller.transform().scale() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn attach_resets_transform_to_identity() {
        let mut controller = attached_controller();
        controller.zoom_by(1.0);
        controller.begin_pan(PointerPoint::new(4.0, 4.0));
        controller.update_pan(PointerPoint::new(9.0, 1.0));

        controller.attach(Some(RecordingSurface::default())).expect("attach");
        assert!(controller.transform().is_identity());
        assert!(!controller.is_panning());
    }

    #[test]
    fn pan_back_to_start_leaves_no_net_translate() {
        let mut controller = attached_controller();
        let start = PointerPoint::new(17.0, -3.0);
        controller.begin_pan(start);
        controller.update_pan(PointerPoint::new(40.0, 12.0));
        controller.update_pan(start);

        assert_eq!(controller.transform().translate_x(), 0.0);
        assert_eq!(controller.transform().translate_y(), 0.0);
    }

    #[test]
    fn pan_moves_translate_by_pointer_delta() {
        let mut controller = attached_controller();
        controller.begin_pan(PointerPoint::new(10.0, 10.0));
        controller.update_pan(PointerPoint::new(13.0, 6.0));
        controller.end_pan();

        assert_eq!(controller.transform().translate_x(), 3.0);
        assert_eq!(controller.transform().translate_y(), -4.0);

        // A second pan continues from the current translate.
        controller.begin_pan(PointerPoint::new(0.0, 0.0));
        controller.update_pan(PointerPoint::new(1.0, 1.0));
        assert_eq!(controller.transform().translate_x(), 4.0);
        assert_eq!(controller.transform().translate_y(), -3.0);
    }

    #[test]
    fn begin_pan_is_a_no_op_while_already_panning() {
        let mut controller = attached_controller();
        controller.begin_pan(PointerPoint::new(5.0, 5.0));
        controller.begin_pan(PointerPoint::new(100.0, 100.0));
        controller.update_pan(PointerPoint::new(6.0, 5.0));

        // The second begin_pan did not re-anchor the grab point.
        assert_eq!(controller.transform().translate_x(), 1.0);
        assert_eq!(controller.transform().translate_y(), 0.0);
    }

    #[test]
    fn end_pan_is_idempotent_and_update_is_ignored_when_idle() {
        let mut controller = attached_controller();
        controller.end_pan();
        controller.end_pan();
        controller.update_pan(PointerPoint::new(50.0, 50.0));

        assert!(!controller.is_panning());
        assert!(controller.transform().is_identity());
    }

    #[test]
    fn zoom_does_not_change_pan_state() {
        let mut controller = attached_controller();
        controller.zoom_in();
        assert!(!controller.is_panning());

        controller.begin_pan(PointerPoint::new(0.0, 0.0));
        controller.zoom_out();
        controller.zoom_at_wheel(WheelDirection::Up);
        assert!(controller.is_panning());
    }

    #[rstest]
    #[case(WheelDirection::Up, 1.1)]
    #[case(WheelDirection::Down, 0.9)]
    fn wheel_tick_maps_to_tenth_steps(#[case] direction: WheelDirection, #[case] expected: f64) {
        let mut controller = attached_controller();
        controller.zoom_at_wheel(direction);
        assert!((controller.transform().scale() - expected).abs() < 1e-9);
    }

    #[test]
    fn zoom_clamps_without_failing() {
        let mut controller = attached_controller();
        for _ in 0..40 {
            controller.zoom_in();
        }
        assert_eq!(controller.transform().scale(), MAX_SCALE);

        for _ in 0..80 {
            controller.zoom_at_wheel(WheelDirection::Down);
        }
        assert_eq!(controller.transform().scale(), MIN_SCALE);
    }

    #[test]
    fn reset_applies_identity_to_the_surface() {
        let mut controller = attached_controller();
        controller.zoom_in();
        controller.begin_pan(PointerPoint::new(0.0, 0.0));
        controller.update_pan(PointerPoint::new(8.0, 8.0));
        controller.reset();

        assert!(controller.transform().is_identity());
        let surface = controller.surface().expect("surface");
        assert!(surface.applied.last().expect("applied").is_identity());
    }

    #[test]
    fn transform_updates_apply_even_without_a_surface() {
        let mut controller: ViewportController<RecordingSurface> = ViewportController::new();
        controller.zoom_in();
        controller.begin_pan(PointerPoint::new(0.0, 0.0));
        controller.update_pan(PointerPoint::new(2.0, 2.0));

        assert!((controller.transform().scale() - 1.2).abs() < 1e-9);
        assert_eq!(controller.transform().translate_x(), 2.0);
    }
}
