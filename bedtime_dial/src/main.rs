//! Bedtime Dial
//!
//! A sleep-schedule picker built as a circular 24-hour dial: drag the
//! bedtime and wake handles around the ring and the bedtime, wake-up, and
//! duration readouts follow. The angle/time math and gesture resolution
//! live in the `shared` crate; this crate owns the window, rendering, and
//! settings.

mod config;
mod dial;
mod drawing;
mod ui;

use nannou::prelude::*;
use nannou_egui::{self, Egui};
use shared::{DragController, SleepWindow};

use crate::config::AppConfig;
use crate::dial::DialLayout;

const SETTINGS_PANEL_HEIGHT: f32 = 96.0;
const DEFAULT_BEDTIME: &str = "23:00";
const DEFAULT_WAKE: &str = "08:00";

/// A press drifting farther than this is a drag attempt, not a tap
const TAP_SLOP: f32 = 6.0;

fn main() {
    nannou::app(model).update(update).run();
}

/// Application state
struct Model {
    /// Sleep window state and gesture resolution
    controller: DragController,
    /// Show the 24-hour tick marks and labels
    show_clock_face: bool,
    /// Configured default schedule, used by reset
    default_bedtime: String,
    default_wake: String,
    /// Press position of a candidate tap, cleared once it drifts
    pending_tap: Option<Point2>,
    /// Error message to display (if any)
    error_message: Option<String>,
    /// egui integration
    egui: Egui,
}

impl Model {
    /// The schedule the reset action returns to
    fn default_window(&self) -> SleepWindow {
        SleepWindow::from_time_strings(&self.default_bedtime, &self.default_wake)
            .unwrap_or_else(|_| {
                SleepWindow::from_time_strings(DEFAULT_BEDTIME, DEFAULT_WAKE)
                    .expect("built-in default schedule parses")
            })
    }

    fn pointer_pressed(&mut self, pos: Point2, layout: &DialLayout) {
        self.controller.set_dial_geometry(layout.geometry());
        match layout.hit_test_handle(&self.controller.window(), pos.x, pos.y) {
            Some(handle) => {
                self.pending_tap = None;
                self.controller.begin_drag(handle);
            }
            None => {
                // Arm a tap; it commits on release unless the pointer drifts
                self.pending_tap = Some(pos);
            }
        }
    }

    fn pointer_moved(&mut self, pos: Point2) {
        if self.controller.is_dragging() {
            self.controller.update_drag(pos.x, pos.y);
        } else if let Some(origin) = self.pending_tap {
            if origin.distance(pos) > TAP_SLOP {
                self.pending_tap = None;
            }
        }
    }

    fn pointer_released(&mut self, pos: Point2) {
        if self.controller.is_dragging() {
            self.controller.end_drag();
        } else if self.pending_tap.take().is_some() {
            self.controller.handle_tap(pos.x, pos.y);
        }
    }

    fn pointer_cancelled(&mut self) {
        self.pending_tap = None;
        self.controller.cancel_drag();
    }

    fn toggle_tap_to_update(&mut self) {
        let mut dial_config = self.controller.config();
        dial_config.tap_to_update = !dial_config.tap_to_update;
        self.controller.set_config(dial_config);
        save_settings(self);
    }

    fn toggle_clock_face(&mut self) {
        self.show_clock_face = !self.show_clock_face;
        save_settings(self);
    }

    fn reset_schedule(&mut self) {
        let window = self.default_window();
        self.controller.set_window(window);
    }
}

fn save_settings(model: &Model) {
    let config = AppConfig {
        show_clock_face: model.show_clock_face,
        default_bedtime: model.default_bedtime.clone(),
        default_wake: model.default_wake.clone(),
        dial: model.controller.config(),
    };
    if let Err(e) = config::save_config(&config) {
        eprintln!("Failed to save settings: {}", e);
    }
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Bedtime Dial")
        .size(520, 700)
        .min_size(360, 520)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load settings
    let config: AppConfig = config::load_config().ok().flatten().unwrap_or_default();

    // Build the initial window from the configured default schedule
    let (window_state, error_message) =
        match SleepWindow::from_time_strings(&config.default_bedtime, &config.default_wake) {
            Ok(window) => (window, None),
            Err(e) => {
                let fallback = SleepWindow::from_time_strings(DEFAULT_BEDTIME, DEFAULT_WAKE)
                    .expect("built-in default schedule parses");
                (
                    fallback,
                    Some(format!(
                        "Invalid default schedule in settings: {}. Using 11:00 PM - 8:00 AM.",
                        e
                    )),
                )
            }
        };

    Model {
        controller: DragController::new(window_state, config.dial),
        show_clock_face: config.show_clock_face,
        default_bedtime: config.default_bedtime,
        default_wake: config.default_wake,
        pending_tap: None,
        error_message,
        egui,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    // Keep the controller's geometry current across resizes; a drag in
    // progress keeps using whatever geometry each sample sees
    let layout = DialLayout::calculate(app.window_rect(), SETTINGS_PANEL_HEIGHT);
    model.controller.set_dial_geometry(layout.geometry());

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let window = model.controller.window();
    let mut dial_config = model.controller.config();

    let panel_result = ui::draw_settings_panel(
        &ctx,
        &mut dial_config.tap_to_update,
        &mut model.show_clock_face,
        &window.bedtime().format_12h(),
        &window.wake_time().format_12h(),
        &window.duration_label(),
    );

    drop(ctx);

    // Apply UI results
    if panel_result.tap_to_update_changed {
        model.controller.set_config(dial_config);
        save_settings(model);
    }
    if panel_result.clock_face_changed {
        save_settings(model);
    }
    if panel_result.reset_schedule {
        model.reset_schedule();
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let layout = DialLayout::calculate(window_rect, SETTINGS_PANEL_HEIGHT);
    let window = model.controller.window();

    draw.background().color(drawing::colors::BACKGROUND);

    drawing::draw_readout(&draw, window_rect, &layout, &window);
    drawing::draw_track(&draw, &layout);
    if model.show_clock_face {
        drawing::draw_clock_face(&draw, &layout);
    }
    drawing::draw_sleep_arc(&draw, &layout, &window);
    drawing::draw_handles(&draw, &layout, &window);

    if let Some(ref message) = model.error_message {
        drawing::draw_error_banner(&draw, message, window_rect);
    }

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // T toggles tap-to-update
        Key::T => {
            model.toggle_tap_to_update();
        }
        // C toggles the clock face
        Key::C => {
            model.toggle_clock_face();
        }
        // R resets the schedule to the configured default
        Key::R => {
            model.reset_schedule();
        }
        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        let layout = DialLayout::calculate(app.window_rect(), SETTINGS_PANEL_HEIGHT);
        model.pointer_pressed(app.mouse.position(), &layout);
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.pointer_moved(pos);
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.pointer_released(app.mouse.position());
    }
}

fn raw_window_event(app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);

    // Handle touch events (map to mouse-like behavior)
    if let nannou::winit::event::WindowEvent::Touch(touch) = event {
        let window_rect = app.window_rect();
        let layout = DialLayout::calculate(window_rect, SETTINGS_PANEL_HEIGHT);

        // Convert touch position to nannou coordinates
        let pos = pt2(
            touch.location.x as f32 - window_rect.w() / 2.0,
            window_rect.h() / 2.0 - touch.location.y as f32,
        );

        match touch.phase {
            nannou::winit::event::TouchPhase::Started => model.pointer_pressed(pos, &layout),
            nannou::winit::event::TouchPhase::Moved => model.pointer_moved(pos),
            nannou::winit::event::TouchPhase::Ended => model.pointer_released(pos),
            nannou::winit::event::TouchPhase::Cancelled => model.pointer_cancelled(),
        }
    }
}
