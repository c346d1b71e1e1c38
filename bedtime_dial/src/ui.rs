//! Settings panel for the bedtime dial
//!
//! A bottom egui panel with the schedule summary, tap-to-update and
//! clock-face toggles, and a reset action.

use nannou_egui::egui;

/// Result of settings panel interactions
#[derive(Default)]
pub struct SettingsPanelResult {
    /// Tap-to-update toggle changed
    pub tap_to_update_changed: bool,
    /// Clock-face toggle changed
    pub clock_face_changed: bool,
    /// Reset the window to the configured default schedule
    pub reset_schedule: bool,
}

/// Draw the settings panel (bottom)
pub fn draw_settings_panel(
    ctx: &egui::Context,
    tap_to_update: &mut bool,
    show_clock_face: &mut bool,
    bedtime_text: &str,
    wake_text: &str,
    duration_text: &str,
) -> SettingsPanelResult {
    let mut result = SettingsPanelResult::default();

    egui::TopBottomPanel::bottom("settings_panel")
        .resizable(false)
        .min_height(80.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                // Left section: schedule summary
                ui.vertical(|ui| {
                    ui.heading("Schedule");
                    ui.label(
                        egui::RichText::new(format!("{} → {}", bedtime_text, wake_text))
                            .size(14.0),
                    );
                    ui.label(
                        egui::RichText::new(duration_text)
                            .size(12.0)
                            .color(egui::Color32::from_rgb(140, 150, 170)),
                    );
                });

                ui.separator();

                // Right section: controls
                ui.vertical(|ui| {
                    ui.heading("Controls");

                    let tap_response = ui
                        .checkbox(tap_to_update, "Tap ring to set wake time (T)")
                        .on_hover_text("Tapping the ring moves the wake handle. Keyboard: T");
                    if tap_response.changed() {
                        result.tap_to_update_changed = true;
                    }

                    let face_response = ui
                        .checkbox(show_clock_face, "Show clock face (C)")
                        .on_hover_text("Show the 24-hour tick marks and labels. Keyboard: C");
                    if face_response.changed() {
                        result.clock_face_changed = true;
                    }

                    if ui
                        .button("Reset schedule (R)")
                        .on_hover_text("Return to the default bedtime and wake time. Keyboard: R")
                        .clicked()
                    {
                        result.reset_schedule = true;
                    }
                });
            });
        });

    result
}
