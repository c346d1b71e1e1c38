//! Dial layout calculations
//!
//! Positions the ring, clock face, and handles within the window, and hit
//! tests pointer positions against the two handles.

use nannou::prelude::*;
use shared::{DialGeometry, Handle, SleepWindow};

/// Vertical space reserved above the dial for the time readout
pub const READOUT_HEIGHT: f32 = 120.0;

/// Minimum handle hit radius for accessibility (~40px diameter)
const MIN_HIT_RADIUS: f32 = 20.0;

/// Screen-space layout of the dial for the current window size
#[derive(Debug, Clone, Copy)]
pub struct DialLayout {
    /// Ring center
    pub center: Point2,
    /// Ring radius, measured to the middle of the stroke
    pub radius: f32,
    /// Width of the ring stroke
    pub stroke_width: f32,
}

impl DialLayout {
    /// Calculate layout from window dimensions
    ///
    /// The stage is the largest square that fits between the readout at the
    /// top and the settings panel at the bottom; the ring and stroke scale
    /// with it.
    pub fn calculate(window_rect: Rect, panel_height: f32) -> Self {
        let available_width = window_rect.w();
        let available_height = window_rect.h() - panel_height - READOUT_HEIGHT;
        let stage_size = available_width.min(available_height).max(0.0);

        // Center between readout (top) and panel (bottom)
        let cx = window_rect.x();
        let cy = window_rect.y() + (panel_height - READOUT_HEIGHT) / 2.0;

        Self {
            center: pt2(cx, cy),
            radius: 0.37 * stage_size,
            stroke_width: 0.14 * stage_size,
        }
    }

    /// Radius of the clock face drawn inside the ring stroke
    pub fn face_radius(&self) -> f32 {
        self.radius - self.stroke_width / 2.0
    }

    /// Handle radius as drawn
    pub fn handle_radius(&self) -> f32 {
        (self.stroke_width - 1.0) / 2.0
    }

    /// Handle hit radius, never below the accessibility minimum
    pub fn hit_radius(&self) -> f32 {
        self.handle_radius().max(MIN_HIT_RADIUS)
    }

    /// Screen position of a handle at the given clock angle
    pub fn handle_position(&self, angle: f32) -> Point2 {
        pt2(
            self.center.x + self.radius * angle.sin(),
            self.center.y + self.radius * angle.cos(),
        )
    }

    /// The controller-facing geometry for this layout
    pub fn geometry(&self) -> DialGeometry {
        DialGeometry {
            center_x: self.center.x,
            center_y: self.center.y,
            radius: self.radius,
        }
    }

    /// Hit test for the two handles
    ///
    /// The start handle is drawn on top, so it wins when the hit areas
    /// overlap.
    pub fn hit_test_handle(&self, window: &SleepWindow, x: f32, y: f32) -> Option<Handle> {
        let hit_radius = self.hit_radius();
        let hit_sq = hit_radius * hit_radius;

        let start = self.handle_position(window.start_angle);
        let dx = x - start.x;
        let dy = y - start.y;
        if dx * dx + dy * dy <= hit_sq {
            return Some(Handle::Start);
        }

        let end = self.handle_position(window.end_angle());
        let dx = x - end.x;
        let dy = y - end.y;
        if dx * dx + dy * dy <= hit_sq {
            return Some(Handle::End);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_layout() -> DialLayout {
        DialLayout::calculate(Rect::from_w_h(900.0, 900.0), 96.0)
    }

    fn test_window() -> SleepWindow {
        SleepWindow::from_time_strings("23:00", "08:00").unwrap()
    }

    #[test]
    fn test_stage_fits_between_readout_and_panel() {
        let layout = test_layout();
        let stage = 900.0 - 96.0 - READOUT_HEIGHT;
        assert!((layout.radius - 0.37 * stage).abs() < 0.01);
        assert!((layout.stroke_width - 0.14 * stage).abs() < 0.01);
    }

    #[test]
    fn test_hit_test_resolves_each_handle() {
        let layout = test_layout();
        let window = test_window();

        let start = layout.handle_position(window.start_angle);
        assert_eq!(
            layout.hit_test_handle(&window, start.x, start.y),
            Some(Handle::Start)
        );

        let end = layout.handle_position(window.end_angle());
        assert_eq!(
            layout.hit_test_handle(&window, end.x + 3.0, end.y - 3.0),
            Some(Handle::End)
        );
    }

    #[test]
    fn test_hit_test_misses_ring_center() {
        let layout = test_layout();
        let window = test_window();
        assert_eq!(
            layout.hit_test_handle(&window, layout.center.x, layout.center.y),
            None
        );
    }

    #[test]
    fn test_hit_radius_has_accessibility_floor() {
        let layout = DialLayout::calculate(Rect::from_w_h(300.0, 300.0), 96.0);
        assert!(layout.hit_radius() >= 20.0);
    }
}
