//! Drawing module - ring, sleep arc, clock face, handles, and readout
//!
//! Renders the bedtime dial's visual elements using nannou's Draw API.

use nannou::prelude::*;
use shared::SleepWindow;

use crate::dial::DialLayout;

/// Color palette for the bedtime dial theme
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 10,
        green: 1,
        blue: 20,
        standard: std::marker::PhantomData,
    };
    pub const TRACK: Srgb<u8> = Srgb {
        red: 23,
        green: 23,
        blue: 23,
        standard: std::marker::PhantomData,
    };
    pub const ARC_FROM: Srgb<u8> = Srgb {
        red: 59,
        green: 56,
        blue: 168,
        standard: std::marker::PhantomData,
    };
    pub const ARC_TO: Srgb<u8> = Srgb {
        red: 49,
        green: 72,
        blue: 185,
        standard: std::marker::PhantomData,
    };
    pub const HANDLE_FILL: Srgb<u8> = Srgb {
        red: 24,
        green: 18,
        blue: 43,
        standard: std::marker::PhantomData,
    };
    pub const CLOCK_FACE: Srgb<u8> = Srgb {
        red: 157,
        green: 157,
        blue: 157,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 240,
        green: 240,
        blue: 240,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 160,
        green: 160,
        blue: 160,
        standard: std::marker::PhantomData,
    };
}

/// Number of gradient segments in the sleep arc
const ARC_SEGMENTS: usize = 24;

/// Point on the ring at a clock angle (0 at top, clockwise)
fn ring_point(layout: &DialLayout, angle: f32) -> Point2 {
    pt2(
        layout.center.x + layout.radius * angle.sin(),
        layout.center.y + layout.radius * angle.cos(),
    )
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Gradient color along the sleep arc; fades out toward the wake handle
fn arc_color(t: f32) -> Srgba<u8> {
    srgba(
        lerp_channel(colors::ARC_FROM.red, colors::ARC_TO.red, t),
        lerp_channel(colors::ARC_FROM.green, colors::ARC_TO.green, t),
        lerp_channel(colors::ARC_FROM.blue, colors::ARC_TO.blue, t),
        lerp_channel(255, 18, t),
    )
}

/// Draw the background track ring
pub fn draw_track(draw: &Draw, layout: &DialLayout) {
    let segments = 120;
    let points: Vec<Point2> = (0..=segments)
        .map(|i| ring_point(layout, i as f32 / segments as f32 * TAU))
        .collect();

    draw.polyline()
        .weight(layout.stroke_width)
        .color(colors::TRACK)
        .points(points);
}

/// Draw the gradient sleep arc from the bedtime handle to the wake handle
pub fn draw_sleep_arc(draw: &Draw, layout: &DialLayout, window: &SleepWindow) {
    let samples_per_segment = 8;

    for i in 0..ARC_SEGMENTS {
        let from = window.start_angle + window.angle_length * i as f32 / ARC_SEGMENTS as f32;
        let to = window.start_angle + window.angle_length * (i + 1) as f32 / ARC_SEGMENTS as f32;

        let points: Vec<Point2> = (0..=samples_per_segment)
            .map(|s| {
                let angle = from + (to - from) * s as f32 / samples_per_segment as f32;
                ring_point(layout, angle)
            })
            .collect();

        let t = (i as f32 + 0.5) / ARC_SEGMENTS as f32;
        draw.polyline()
            .weight(layout.stroke_width)
            .color(arc_color(t))
            .points(points);
    }
}

/// Draw the 24-hour clock face inside the ring
///
/// 48 tick marks (one per 30 minutes, longer on the hour) and the four
/// quarter-day labels.
pub fn draw_clock_face(draw: &Draw, layout: &DialLayout) {
    let face_radius = layout.face_radius() - 5.0;
    let num_ticks = 48;

    for i in 0..num_ticks {
        let angle = i as f32 / num_ticks as f32 * TAU;
        let is_hour_tick = i % 2 == 0;

        let tick_length = if is_hour_tick {
            0.074 * face_radius
        } else {
            0.037 * face_radius
        };
        let dir = vec2(angle.sin(), angle.cos());
        let outer = layout.center + dir * face_radius;
        let inner = layout.center + dir * (face_radius - tick_length);

        draw.line()
            .start(inner)
            .end(outer)
            .color(colors::ARC_FROM)
            .weight(if is_hour_tick { 2.0 } else { 1.0 });
    }

    let text_radius = face_radius - 26.0;
    let labels = [(0, "12 AM"), (6, "6 AM"), (12, "12 PM"), (18, "6 PM")];
    for (hour, label) in labels {
        let angle = hour as f32 / 24.0 * TAU;
        let pos = layout.center + vec2(angle.sin(), angle.cos()) * text_radius;

        draw.text(label)
            .xy(pos)
            .color(colors::CLOCK_FACE)
            .font_size(12)
            .w(60.0);
    }
}

/// Draw the bedtime and wake handles
///
/// The wake handle is drawn first so the bedtime handle wins visually when
/// the two are close, matching hit-test precedence.
pub fn draw_handles(draw: &Draw, layout: &DialLayout, window: &SleepWindow) {
    let end_pos = ring_point(layout, window.end_angle());
    draw_handle(draw, end_pos, layout.handle_radius(), colors::ARC_TO);
    draw_sun_mark(draw, end_pos, layout.handle_radius());

    let start_pos = ring_point(layout, window.start_angle);
    draw_handle(draw, start_pos, layout.handle_radius(), colors::ARC_FROM);
    draw_moon_mark(draw, start_pos, layout.handle_radius());
}

fn draw_handle(draw: &Draw, pos: Point2, radius: f32, ring_color: Srgb<u8>) {
    draw.ellipse()
        .xy(pos)
        .radius(radius)
        .color(colors::HANDLE_FILL)
        .stroke(ring_color)
        .stroke_weight(1.5);
}

/// Crescent moon mark for the bedtime handle
fn draw_moon_mark(draw: &Draw, pos: Point2, handle_radius: f32) {
    let moon_radius = handle_radius * 0.42;
    draw.ellipse()
        .xy(pos)
        .radius(moon_radius)
        .color(colors::TEXT_PRIMARY);
    // Overlap a fill-colored disc to carve the crescent
    draw.ellipse()
        .xy(pos + vec2(moon_radius * 0.45, moon_radius * 0.25))
        .radius(moon_radius * 0.9)
        .color(colors::HANDLE_FILL);
}

/// Sun mark for the wake handle
fn draw_sun_mark(draw: &Draw, pos: Point2, handle_radius: f32) {
    let core_radius = handle_radius * 0.22;
    draw.ellipse()
        .xy(pos)
        .radius(core_radius)
        .color(colors::TEXT_PRIMARY);

    for i in 0..8 {
        let angle = i as f32 / 8.0 * TAU;
        let dir = vec2(angle.cos(), angle.sin());
        draw.line()
            .start(pos + dir * core_radius * 1.5)
            .end(pos + dir * core_radius * 2.3)
            .color(colors::TEXT_PRIMARY)
            .weight(1.5);
    }
}

/// Draw the bedtime / wake-up readout above the dial and the duration
/// line below it
pub fn draw_readout(draw: &Draw, window_rect: Rect, layout: &DialLayout, window: &SleepWindow) {
    let label_y = window_rect.top() - 42.0;
    let time_y = label_y - 30.0;
    let block_offset = 110.0;

    let blocks = [
        (-block_offset, "BEDTIME", window.bedtime().format_12h()),
        (block_offset, "WAKE UP", window.wake_time().format_12h()),
    ];
    for (x_offset, label, time_text) in blocks {
        draw.text(label)
            .x_y(window_rect.x() + x_offset, label_y)
            .color(colors::TEXT_SECONDARY)
            .font_size(14)
            .w(160.0);
        draw.text(&time_text)
            .x_y(window_rect.x() + x_offset, time_y)
            .color(colors::TEXT_PRIMARY)
            .font_size(24)
            .w(160.0);
    }

    let duration_y = layout.center.y - layout.radius - layout.stroke_width / 2.0 - 28.0;
    draw.text(&window.duration_label())
        .x_y(layout.center.x, duration_y)
        .color(colors::TEXT_PRIMARY)
        .font_size(20)
        .w(320.0);
}

/// Draw the error banner for startup configuration problems
pub fn draw_error_banner(draw: &Draw, message: &str, rect: Rect) {
    let banner_height = 36.0;
    let banner_y = rect.top() - banner_height / 2.0;

    draw.rect()
        .x_y(rect.x(), banner_y)
        .w_h(rect.w(), banner_height)
        .color(srgb(80u8, 20u8, 20u8));

    draw.text(message)
        .x_y(rect.x(), banner_y)
        .color(colors::TEXT_PRIMARY)
        .font_size(14)
        .w(rect.w() - 20.0);
}
