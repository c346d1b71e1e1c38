//! Shared core for the bedtime dial
//!
//! The angle/time codec and the dual-handle drag controller, free of any
//! rendering dependencies. The app crate feeds pointer events in and draws
//! whatever window comes back.

pub mod controller;
pub mod dial_math;

pub use controller::{
    DialConfig, DialGeometry, DragController, Handle, SleepWindow, MIN_ARC_LENGTH,
};
pub use dial_math::{
    angle_from_time_string, angle_length_between, duration_label, grid_step, minutes_from_angle,
    normalize_angle, snap_to_grid, snap_to_step, time_from_angle, Meridiem, ParseTimeError,
    TimeOfDay, FIVE_MINUTE_STEP, MINUTES_PER_DAY, SLOTS_PER_DAY,
};
