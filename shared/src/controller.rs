//! Dual-handle drag controller for the sleep window dial
//!
//! Owns the selected sleep window (bedtime angle plus clockwise arc to the
//! wake handle) and resolves pointer gestures against it: dragging either
//! handle, tapping the ring to move the wake handle, and the minimum-arc
//! constraint that keeps the two handles from colliding or crossing.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::dial_math::{
    angle_from_time_string, angle_length_between, duration_label, grid_step, normalize_angle,
    snap_to_step, time_from_angle, ParseTimeError, TimeOfDay,
};

/// Default minimum arc between the two handles (10 degrees, about 40 minutes)
pub const MIN_ARC_LENGTH: f32 = PI / 18.0;

/// One of the two draggable points on the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Bedtime handle
    Start,
    /// Wake-time handle
    End,
}

/// The selected sleep window, the dial's single source of truth
///
/// `start_angle` is the bedtime; `start_angle + angle_length` (mod 2π) is
/// the wake time. Both are kept on the 5-minute grid by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepWindow {
    /// Bedtime angle in [0, 2π)
    pub start_angle: f32,
    /// Clockwise arc to the wake handle
    pub angle_length: f32,
}

impl SleepWindow {
    /// Build a window from 24-hour "HH:MM" bedtime and wake strings
    pub fn from_time_strings(bedtime: &str, wake: &str) -> Result<Self, ParseTimeError> {
        let start_angle = angle_from_time_string(bedtime)?;
        let end_angle = angle_from_time_string(wake)?;
        Ok(Self {
            start_angle,
            angle_length: angle_length_between(start_angle, end_angle),
        })
    }

    /// Wake-handle angle in [0, 2π)
    pub fn end_angle(&self) -> f32 {
        normalize_angle(self.start_angle + self.angle_length)
    }

    /// Bedtime on the 5-minute grid
    pub fn bedtime(&self) -> TimeOfDay {
        time_from_angle(self.start_angle)
    }

    /// Wake time on the 5-minute grid
    pub fn wake_time(&self) -> TimeOfDay {
        time_from_angle(self.end_angle())
    }

    /// Sleep duration label, e.g. "9 hours" or "8 hours 30 min"
    pub fn duration_label(&self) -> String {
        duration_label(self.angle_length)
    }
}

/// Screen-space placement of the dial ring, in y-up window coordinates
///
/// Established once the dial is laid out; required to turn a pointer
/// position into a clock angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

impl DialGeometry {
    /// Bearing from the dial center to a point, as a clock angle
    ///
    /// 12 o'clock is straight above the center; the angle grows clockwise.
    pub fn angle_at(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        normalize_angle(dx.atan2(dy))
    }

    /// Point on the ring at the given clock angle
    pub fn point_at(&self, angle: f32) -> (f32, f32) {
        (
            self.center_x + self.radius * angle.sin(),
            self.center_y + self.radius * angle.cos(),
        )
    }
}

/// Tunable behavior for the drag controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialConfig {
    /// Minimum arc between the handles, radians
    pub min_arc_length: f32,
    /// Grid resolution for committed angles, minutes
    pub grid_minutes: u32,
    /// Whether tapping the ring moves the wake handle
    pub tap_to_update: bool,
    /// Taps closer than this to the start handle are ignored, pixels
    pub tap_guard_radius: f32,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            min_arc_length: MIN_ARC_LENGTH,
            grid_minutes: 5,
            tap_to_update: true,
            tap_guard_radius: 40.0,
        }
    }
}

/// Stateful controller owning the sleep window and the active gesture
///
/// Every mutating call runs synchronously to completion; a committed move
/// returns the new window so the owner can re-derive its display text.
#[derive(Debug, Clone)]
pub struct DragController {
    window: SleepWindow,
    session: Option<Handle>,
    geometry: Option<DialGeometry>,
    config: DialConfig,
}

impl DragController {
    pub fn new(window: SleepWindow, config: DialConfig) -> Self {
        Self {
            window,
            session: None,
            geometry: None,
            config,
        }
    }

    /// The current sleep window
    pub fn window(&self) -> SleepWindow {
        self.window
    }

    /// The handle currently being dragged, if any
    pub fn active_handle(&self) -> Option<Handle> {
        self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> DialConfig {
        self.config
    }

    pub fn set_config(&mut self, config: DialConfig) {
        self.config = config;
    }

    /// Update the dial's screen geometry; takes effect on the next
    /// `update_drag` or `handle_tap`
    pub fn set_dial_geometry(&mut self, geometry: DialGeometry) {
        self.geometry = Some(geometry);
    }

    pub fn geometry(&self) -> Option<DialGeometry> {
        self.geometry
    }

    /// Replace the window unconditionally, bypassing constraints
    ///
    /// For initialization and programmatic resets; the caller is
    /// responsible for passing a valid window.
    pub fn set_window(&mut self, window: SleepWindow) {
        self.window = window;
    }

    /// Begin dragging a handle
    ///
    /// A session that is already active is implicitly ended: only one
    /// physical pointer is tracked at a time.
    pub fn begin_drag(&mut self, handle: Handle) {
        self.session = Some(handle);
    }

    /// Feed a pointer sample into the active drag
    ///
    /// Returns the new window on a commit. A candidate arc outside the
    /// minimum-arc bounds is a silent no-op, as is a sample arriving
    /// before any geometry has been set.
    pub fn update_drag(&mut self, x: f32, y: f32) -> Option<SleepWindow> {
        debug_assert!(
            self.session.is_some(),
            "update_drag called with no active drag"
        );
        let handle = self.session?;
        let geometry = self.geometry?;
        let new_angle = geometry.angle_at(x, y);

        match handle {
            Handle::Start => {
                // Moving the bedtime handle keeps the wake angle fixed
                let candidate = (TAU + self.window.angle_length
                    - (new_angle - self.window.start_angle))
                    .rem_euclid(TAU);
                if !self.arc_allowed(candidate) {
                    return None;
                }
                self.commit(SleepWindow {
                    start_angle: new_angle,
                    angle_length: candidate,
                })
            }
            Handle::End => {
                let candidate = angle_length_between(self.window.start_angle, new_angle);
                if !self.arc_allowed(candidate) {
                    return None;
                }
                self.commit(SleepWindow {
                    start_angle: self.window.start_angle,
                    angle_length: candidate,
                })
            }
        }
    }

    /// End the active drag, keeping the committed window
    pub fn end_drag(&mut self) {
        self.session = None;
    }

    /// Cancel the active drag
    ///
    /// Identical to `end_drag` in effect: every successful move commits
    /// immediately, so there is no uncommitted state to discard.
    pub fn cancel_drag(&mut self) {
        self.session = None;
    }

    /// Move the wake handle to a tapped point on the ring
    ///
    /// Only meaningful when tap-to-update is enabled and no drag is in
    /// progress. Taps landing within `tap_guard_radius` of the start
    /// handle are ignored so grabbing the bedtime handle never teleports
    /// the wake handle.
    pub fn handle_tap(&mut self, x: f32, y: f32) -> Option<SleepWindow> {
        if !self.config.tap_to_update || self.session.is_some() {
            return None;
        }
        let geometry = self.geometry?;

        let (start_x, start_y) = geometry.point_at(self.window.start_angle);
        if (x - start_x).hypot(y - start_y) < self.config.tap_guard_radius {
            return None;
        }

        let new_angle = geometry.angle_at(x, y);
        let candidate = angle_length_between(self.window.start_angle, new_angle);
        if !self.arc_allowed(candidate) {
            return None;
        }
        self.commit(SleepWindow {
            start_angle: self.window.start_angle,
            angle_length: candidate,
        })
    }

    fn arc_allowed(&self, angle_length: f32) -> bool {
        angle_length >= self.config.min_arc_length
            && angle_length <= TAU - self.config.min_arc_length
    }

    fn commit(&mut self, window: SleepWindow) -> Option<SleepWindow> {
        let step = grid_step(self.config.grid_minutes);
        self.window = SleepWindow {
            start_angle: normalize_angle(snap_to_step(window.start_angle, step)),
            angle_length: snap_to_step(window.angle_length, step),
        };
        Some(self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial_math::angle_from_time_string;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-3;

    fn test_geometry() -> DialGeometry {
        DialGeometry {
            center_x: 0.0,
            center_y: 0.0,
            radius: 145.0,
        }
    }

    fn default_controller() -> DragController {
        let window = SleepWindow::from_time_strings("23:00", "08:00").unwrap();
        let mut controller = DragController::new(window, DialConfig::default());
        controller.set_dial_geometry(test_geometry());
        controller
    }

    #[test]
    fn test_initial_window_from_time_strings() {
        let window = SleepWindow::from_time_strings("23:00", "08:00").unwrap();
        assert!((window.angle_length - 9.0 / 24.0 * TAU).abs() < EPS);
        assert_eq!(window.bedtime(), TimeOfDay { hour: 23, minute: 0 });
        assert_eq!(window.wake_time(), TimeOfDay { hour: 8, minute: 0 });
        assert_eq!(window.duration_label(), "9 hours");
    }

    #[test]
    fn test_bearing_at_cardinal_points() {
        let geometry = test_geometry();
        assert!((geometry.angle_at(0.0, 100.0) - 0.0).abs() < EPS);
        assert!((geometry.angle_at(100.0, 0.0) - FRAC_PI_2).abs() < EPS);
        assert!((geometry.angle_at(0.0, -100.0) - PI).abs() < EPS);
        assert!((geometry.angle_at(-100.0, 0.0) - 3.0 * FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_point_at_round_trips_through_bearing() {
        let geometry = test_geometry();
        for slot in [0, 17, 96, 144, 203, 287] {
            let angle = slot as f32 * crate::dial_math::FIVE_MINUTE_STEP;
            let (x, y) = geometry.point_at(angle);
            assert!((geometry.angle_at(x, y) - angle).abs() < EPS);
        }
    }

    #[test]
    fn test_drag_start_handle_keeps_wake_fixed() {
        let mut controller = default_controller();
        let geometry = test_geometry();

        controller.begin_drag(Handle::Start);
        let target = angle_from_time_string("22:00").unwrap();
        let (x, y) = geometry.point_at(target);
        let committed = controller.update_drag(x, y).expect("move should commit");

        assert!((committed.start_angle - target).abs() < EPS);
        assert!((committed.angle_length - 10.0 / 24.0 * TAU).abs() < EPS);
        assert_eq!(committed.bedtime(), TimeOfDay { hour: 22, minute: 0 });
        assert_eq!(committed.wake_time(), TimeOfDay { hour: 8, minute: 0 });
    }

    #[test]
    fn test_drag_end_handle_past_minimum_is_rejected() {
        let mut controller = default_controller();
        let geometry = test_geometry();
        let before = controller.window();

        // "23:05" is only 5 minutes past the bedtime handle, inside the
        // 10-degree minimum arc
        controller.begin_drag(Handle::End);
        let (x, y) = geometry.point_at(angle_from_time_string("23:05").unwrap());
        assert!(controller.update_drag(x, y).is_none());
        assert_eq!(controller.window(), before);
    }

    #[test]
    fn test_drag_end_handle_wraps_past_midnight() {
        let mut controller = default_controller();
        let geometry = test_geometry();

        controller.begin_drag(Handle::End);
        let (x, y) = geometry.point_at(angle_from_time_string("01:00").unwrap());
        let committed = controller.update_drag(x, y).expect("move should commit");

        assert!((committed.angle_length - 2.0 / 24.0 * TAU).abs() < EPS);
        assert_eq!(committed.wake_time(), TimeOfDay { hour: 1, minute: 0 });
    }

    #[test]
    fn test_minimum_arc_boundary_is_inclusive() {
        // A quarter-turn minimum makes the boundary bearings exact: the
        // pointer samples below hit pi/2 and pi/4 without rounding.
        let config = DialConfig {
            min_arc_length: FRAC_PI_2,
            ..DialConfig::default()
        };
        let window = SleepWindow {
            start_angle: 0.0,
            angle_length: PI,
        };
        let mut controller = DragController::new(window, config);
        controller.set_dial_geometry(test_geometry());

        // Exactly the minimum arc: accepted
        controller.begin_drag(Handle::End);
        let committed = controller.update_drag(145.0, 0.0);
        assert!(committed.is_some());
        assert!((controller.window().angle_length - FRAC_PI_2).abs() < EPS);

        // Below the minimum arc: rejected, state unchanged
        let before = controller.window();
        assert!(controller.update_drag(100.0, 100.0).is_none());
        assert_eq!(controller.window(), before);
    }

    #[test]
    fn test_committed_angles_land_on_grid() {
        let mut controller = default_controller();
        let geometry = test_geometry();

        controller.begin_drag(Handle::End);
        // A bearing partway between two slots still commits on the grid
        let raw = angle_from_time_string("06:00").unwrap() + 0.009;
        let (x, y) = geometry.point_at(raw);
        let committed = controller.update_drag(x, y).expect("move should commit");

        let step = crate::dial_math::FIVE_MINUTE_STEP;
        let slots = committed.angle_length / step;
        assert!((slots - slots.round()).abs() < EPS);
        assert_eq!(committed.wake_time().minute % 5, 0);
    }

    #[test]
    fn test_update_before_geometry_is_dropped() {
        let window = SleepWindow::from_time_strings("23:00", "08:00").unwrap();
        let mut controller = DragController::new(window, DialConfig::default());

        controller.begin_drag(Handle::End);
        assert!(controller.update_drag(50.0, 50.0).is_none());
        assert_eq!(controller.window(), window);
    }

    #[test]
    fn test_second_begin_drag_replaces_session() {
        let mut controller = default_controller();
        controller.begin_drag(Handle::Start);
        controller.begin_drag(Handle::End);
        assert_eq!(controller.active_handle(), Some(Handle::End));
    }

    #[test]
    fn test_end_and_cancel_clear_session() {
        let mut controller = default_controller();
        controller.begin_drag(Handle::Start);
        controller.end_drag();
        assert!(!controller.is_dragging());

        controller.begin_drag(Handle::End);
        controller.cancel_drag();
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_tap_moves_wake_handle() {
        let mut controller = default_controller();
        let geometry = test_geometry();

        let (x, y) = geometry.point_at(angle_from_time_string("06:00").unwrap());
        let committed = controller.handle_tap(x, y).expect("tap should commit");
        assert_eq!(committed.wake_time(), TimeOfDay { hour: 6, minute: 0 });
        assert_eq!(committed.bedtime(), TimeOfDay { hour: 23, minute: 0 });
    }

    #[test]
    fn test_tap_near_start_handle_is_ignored() {
        let mut controller = default_controller();
        let geometry = test_geometry();
        let before = controller.window();

        let (x, y) = geometry.point_at(before.start_angle);
        assert!(controller.handle_tap(x + 5.0, y - 5.0).is_none());
        assert_eq!(controller.window(), before);
    }

    #[test]
    fn test_tap_disabled_by_config() {
        let mut controller = default_controller();
        let mut config = controller.config();
        config.tap_to_update = false;
        controller.set_config(config);

        let geometry = test_geometry();
        let (x, y) = geometry.point_at(angle_from_time_string("06:00").unwrap());
        assert!(controller.handle_tap(x, y).is_none());
    }

    #[test]
    fn test_tap_during_drag_is_ignored() {
        let mut controller = default_controller();
        let geometry = test_geometry();

        controller.begin_drag(Handle::Start);
        let (x, y) = geometry.point_at(angle_from_time_string("06:00").unwrap());
        assert!(controller.handle_tap(x, y).is_none());
    }

    #[test]
    fn test_set_window_bypasses_constraints() {
        let mut controller = default_controller();
        let tiny = SleepWindow {
            start_angle: 0.0,
            angle_length: 0.01,
        };
        controller.set_window(tiny);
        assert_eq!(controller.window(), tiny);
    }
}
