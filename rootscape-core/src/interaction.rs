//! Pointer gesture state machine.
//!
//! A pointer-down either grabs a handle (`Dragging`) or starts a pan
//! (`Panning`). Moves are debounced against the last accepted update and
//! mutate either the grabbed root or the view offset. Wheel events zoom
//! around the cursor independently of the current gesture.

use crate::handles::HandleRegistry;
use crate::points::{Root, UvPoint};
use crate::transforms::css_to_uv;
use crate::view::ViewInfo;
use serde::{Deserialize, Serialize};

/// Monotonic millisecond clock, injected so tests can drive time by hand.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// A pointer, touch or wheel position reduced to what the state machine needs.
///
/// `x`/`y` are in CSS pixels; the state machine scales them by the view's
/// pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInput {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

impl GestureInput {
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    /// Stamp a position with the current time of `clock`.
    pub fn now(x: f64, y: f64, clock: &impl Clock) -> Self {
        Self::new(x, y, clock.now_ms())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        handle: usize,
    },
    /// Panning relative to the UV point under the initial pointer-down.
    Panning {
        anchor: UvPoint,
    },
}

/// What a handled event changed, so the caller knows what to push and redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    Unchanged,
    ViewMoved,
    RootMoved(usize),
}

impl Update {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Update::Unchanged)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Minimum time between two accepted move updates.
    pub update_interval_ms: u64,
    /// Wheel delta that changes the scale by a factor of two.
    pub zoom_delta_divisor: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: 5,
            zoom_delta_divisor: 1000.0,
        }
    }
}

/// Scale factor for a wheel delta. Negative deltas zoom in.
///
/// Always positive, so repeated zooming can never flip the sign of the scale.
pub fn zoom_factor(delta_y: f64, divisor: f64) -> f64 {
    if delta_y < 0.0 {
        1.0 + (-delta_y / divisor)
    } else {
        1.0 / (1.0 + delta_y / divisor)
    }
}

#[derive(Clone, Debug, Default)]
pub struct InteractionMachine {
    gesture: Gesture,
    last_update_ms: u64,
    settings: InteractionSettings,
}

impl InteractionMachine {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            gesture: Gesture::Idle,
            last_update_ms: 0,
            settings,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Start a gesture. Grabs a handle if the pointer is inside one, pans otherwise.
    ///
    /// `handles` must have been refreshed against `view`.
    pub fn pointer_down(&mut self, input: GestureInput, view: &ViewInfo, handles: &HandleRegistry) {
        let anchor = css_to_uv(input.x, input.y, view);
        let pointer = view.to_device_pixels(input.x, input.y);

        self.gesture = match handles.hit_test(&pointer) {
            Some(handle) => {
                self.last_update_ms = input.timestamp_ms;
                Gesture::Dragging { handle }
            }
            None => Gesture::Panning { anchor },
        };
        log::debug!("pointer down at {pointer:?}: {:?}", self.gesture);
    }

    /// Apply a pointer move to the active gesture.
    ///
    /// Ignored while idle, and ignored (not queued) when it arrives within the
    /// update interval of the previous accepted update.
    pub fn pointer_move(
        &mut self,
        input: GestureInput,
        view: &mut ViewInfo,
        roots: &mut [Root],
    ) -> Update {
        if self.gesture == Gesture::Idle {
            return Update::Unchanged;
        }
        let elapsed = input.timestamp_ms.saturating_sub(self.last_update_ms);
        if elapsed < self.settings.update_interval_ms {
            return Update::Unchanged;
        }

        let cursor = css_to_uv(input.x, input.y, view);
        self.last_update_ms = input.timestamp_ms;

        match self.gesture {
            Gesture::Idle => Update::Unchanged,
            Gesture::Dragging { handle } => {
                roots[handle] = cursor;
                Update::RootMoved(handle)
            }
            Gesture::Panning { anchor } => {
                // The anchor is never re-sampled: each move measures the cursor
                // against the point grabbed at pointer-down, under the moved view.
                view.offset = view.offset.sub(&cursor.sub(&anchor));
                Update::ViewMoved
            }
        }
    }

    /// End any gesture. Safe to call when already idle.
    pub fn pointer_up(&mut self) {
        if self.gesture != Gesture::Idle {
            log::debug!("pointer up: ending {:?}", self.gesture);
        }
        self.gesture = Gesture::Idle;
    }

    /// Zoom around the cursor, keeping the UV point under it fixed on screen.
    ///
    /// Does not touch the current gesture.
    pub fn wheel(&mut self, input: GestureInput, delta_y: f64, view: &mut ViewInfo) -> Update {
        let factor = zoom_factor(delta_y, self.settings.zoom_delta_divisor);
        view.scale *= factor;

        // Sampled after rescaling: the cursor now sits factor times closer to
        // the offset, and moving the offset by (factor - 1) of that distance
        // puts the previously hovered point back under it.
        let cursor = css_to_uv(input.x, input.y, view);
        view.offset = view
            .offset
            .add(&cursor.sub(&view.offset).mul_scalar(&(factor - 1.0)));

        log::debug!("wheel {delta_y}: scale {} offset {:?}", view.scale, view.offset);
        Update::ViewMoved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handles::HandleStyle;
    use crate::points::Point;
    use std::cell::Cell;

    const EPSILON: f64 = 1e-12;

    struct ManualClock(Cell<u64>);

    impl Clock for ManualClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    fn test_view() -> ViewInfo {
        ViewInfo::new(0.5, Point::new(0.0, 0.0), 1.0, (800, 600), 10)
    }

    fn registry_for(view: &ViewInfo, roots: &[Root]) -> HandleRegistry {
        let mut registry = HandleRegistry::new(HandleStyle::default());
        registry.refresh(view, roots);
        registry
    }

    #[test]
    fn gesture_input_now_reads_clock() {
        let clock = ManualClock(Cell::new(1234));
        assert_eq!(
            GestureInput::now(1.0, 2.0, &clock),
            GestureInput::new(1.0, 2.0, 1234)
        );
    }

    #[test]
    fn zoom_factor_directions() {
        assert!((zoom_factor(-100.0, 1000.0) - 1.1).abs() < EPSILON);
        assert!((zoom_factor(100.0, 1000.0) - 1.0 / 1.1).abs() < EPSILON);
        assert_eq!(zoom_factor(0.0, 1000.0), 1.0);
        assert!(zoom_factor(1e9, 1000.0) > 0.0);
    }

    #[test]
    fn update_is_changed() {
        assert!(!Update::Unchanged.is_changed());
        assert!(Update::ViewMoved.is_changed());
        assert!(Update::RootMoved(3).is_changed());
    }

    #[test]
    fn pointer_down_away_from_handles_pans_from_cursor_uv() {
        let view = test_view();
        let roots = [Point::new(0.0, 1.0)];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        machine.pointer_down(GestureInput::new(400.0, 300.0, 0), &view, &handles);

        match machine.gesture() {
            Gesture::Panning { anchor } => {
                assert!(anchor.x().abs() < EPSILON);
                assert!(anchor.y().abs() < EPSILON);
            }
            other => panic!("expected panning, got {other:?}"),
        }
    }

    #[test]
    fn pointer_down_on_handle_drags_it() {
        let view = test_view();
        let roots = [Point::new(0.0, 1.0), Point::new(0.0, -1.0)];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        // Handle 1 sits at (400, 450)
        machine.pointer_down(GestureInput::new(410.0, 440.0, 7), &view, &handles);

        assert_eq!(machine.gesture(), Gesture::Dragging { handle: 1 });
    }

    #[test]
    fn pointer_down_scales_by_pixel_ratio_before_hit_test() {
        let mut view = test_view();
        view.pixel_ratio = 2.0;
        let roots = [Point::new(0.0, 1.0)];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        // CSS (200, 75) is device (400, 150), the handle centre
        machine.pointer_down(GestureInput::new(200.0, 75.0, 0), &view, &handles);
        assert_eq!(machine.gesture(), Gesture::Dragging { handle: 0 });

        // CSS (400, 150) is device (800, 300), far from the handle
        machine.pointer_down(GestureInput::new(400.0, 150.0, 0), &view, &handles);
        assert!(matches!(machine.gesture(), Gesture::Panning { .. }));
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut view = test_view();
        let mut roots = [Point::new(0.0, 1.0)];
        let mut machine = InteractionMachine::default();

        let update = machine.pointer_move(GestureInput::new(10.0, 10.0, 1000), &mut view, &mut roots);

        assert_eq!(update, Update::Unchanged);
        assert_eq!(view, test_view());
        assert_eq!(roots, [Point::new(0.0, 1.0)]);
    }

    #[test]
    fn drag_replaces_root_with_cursor_uv() {
        let mut view = test_view();
        let mut roots = [Point::new(0.0, 1.0)];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        machine.pointer_down(GestureInput::new(400.0, 150.0, 100), &view, &handles);
        let update = machine.pointer_move(GestureInput::new(600.0, 300.0, 110), &mut view, &mut roots);

        assert_eq!(update, Update::RootMoved(0));
        assert!((roots[0].x() - 4.0 / 3.0).abs() < EPSILON);
        assert!(roots[0].y().abs() < EPSILON);
        assert_eq!(view, test_view());
    }

    #[test]
    fn drag_moves_within_debounce_window_are_dropped() {
        let mut view = test_view();
        let mut roots = [Point::new(0.0, 1.0)];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        machine.pointer_down(GestureInput::new(400.0, 150.0, 100), &view, &handles);

        let early = machine.pointer_move(GestureInput::new(600.0, 300.0, 104), &mut view, &mut roots);
        assert_eq!(early, Update::Unchanged);
        assert_eq!(roots[0], Point::new(0.0, 1.0));

        let accepted = machine.pointer_move(GestureInput::new(600.0, 300.0, 105), &mut view, &mut roots);
        assert_eq!(accepted, Update::RootMoved(0));

        let burst = machine.pointer_move(GestureInput::new(0.0, 0.0, 109), &mut view, &mut roots);
        assert_eq!(burst, Update::Unchanged);
    }

    #[test]
    fn pan_measures_against_pointer_down_anchor() {
        let mut view = test_view();
        let mut roots: [Root; 0] = [];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        machine.pointer_down(GestureInput::new(400.0, 300.0, 0), &view, &handles);

        // 150 px right is 1.0 UV at this zoom
        let update = machine.pointer_move(GestureInput::new(550.0, 300.0, 10), &mut view, &mut roots);
        assert_eq!(update, Update::ViewMoved);
        assert!((view.offset.x() + 1.0).abs() < EPSILON);
        assert!(view.offset.y().abs() < EPSILON);

        // The anchor now sits under the cursor, so the same pixel is a no-op
        machine.pointer_move(GestureInput::new(550.0, 300.0, 20), &mut view, &mut roots);
        assert!((view.offset.x() + 1.0).abs() < EPSILON);

        machine.pointer_move(GestureInput::new(400.0, 300.0, 30), &mut view, &mut roots);
        assert!(view.offset.x().abs() < EPSILON);
    }

    #[test]
    fn pan_moves_are_debounced_from_last_accepted_move() {
        let mut view = test_view();
        let mut roots: [Root; 0] = [];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        machine.pointer_down(GestureInput::new(400.0, 300.0, 50), &view, &handles);
        let first = machine.pointer_move(GestureInput::new(550.0, 300.0, 50), &mut view, &mut roots);
        let second = machine.pointer_move(GestureInput::new(400.0, 300.0, 52), &mut view, &mut roots);

        assert_eq!(first, Update::ViewMoved);
        assert_eq!(second, Update::Unchanged);
        assert!((view.offset.x() + 1.0).abs() < EPSILON);
    }

    #[test]
    fn pointer_up_is_idempotent() {
        let view = test_view();
        let handles = registry_for(&view, &[]);
        let mut machine = InteractionMachine::default();

        machine.pointer_down(GestureInput::new(1.0, 1.0, 0), &view, &handles);
        machine.pointer_up();
        assert_eq!(machine.gesture(), Gesture::Idle);
        machine.pointer_up();
        assert_eq!(machine.gesture(), Gesture::Idle);
    }

    #[test]
    fn wheel_keeps_cursor_point_fixed() {
        let deltas = [-120.0, -3.0, 0.0, 53.0, 400.0];
        let cursors = [(0.0, 0.0), (400.0, 300.0), (123.0, 456.0), (799.0, 1.0)];
        for delta in deltas {
            for (cx, cy) in cursors {
                let mut view = test_view();
                view.offset = Point::new(0.3, -0.2);
                let mut machine = InteractionMachine::default();

                let before = css_to_uv(cx, cy, &view);
                let update = machine.wheel(GestureInput::new(cx, cy, 0), delta, &mut view);
                let after = css_to_uv(cx, cy, &view);

                assert_eq!(update, Update::ViewMoved);
                assert!(
                    before.distance_squared(&after).sqrt() < 1e-9,
                    "delta {delta} at ({cx}, {cy}) moved {before:?} to {after:?}"
                );
            }
        }
    }

    #[test]
    fn wheel_up_zooms_in_and_down_zooms_out() {
        let mut view = test_view();
        let mut machine = InteractionMachine::default();

        machine.wheel(GestureInput::new(400.0, 300.0, 0), -100.0, &mut view);
        assert!((view.scale - 0.55).abs() < EPSILON);

        machine.wheel(GestureInput::new(400.0, 300.0, 0), 100.0, &mut view);
        assert!((view.scale - 0.5).abs() < EPSILON);
    }

    #[test]
    fn wheel_does_not_change_gesture() {
        let mut view = test_view();
        let roots = [Point::new(0.0, 1.0)];
        let handles = registry_for(&view, &roots);
        let mut machine = InteractionMachine::default();

        machine.pointer_down(GestureInput::new(400.0, 150.0, 0), &view, &handles);
        machine.wheel(GestureInput::new(400.0, 150.0, 1), -50.0, &mut view);

        assert_eq!(machine.gesture(), Gesture::Dragging { handle: 0 });
    }
}
