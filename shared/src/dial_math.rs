//! Dial math - angle/time conversions for the 24-hour bedtime dial
//!
//! Pure functions mapping between clock angles (radians, 0 at 12 o'clock,
//! increasing clockwise), times of day on a 5-minute grid, and display text.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Number of 5-minute slots in a full turn of the dial
pub const SLOTS_PER_DAY: u32 = 288;

/// Minutes in a full turn of the dial
pub const MINUTES_PER_DAY: u32 = 1440;

/// Angular width of one 5-minute slot
pub const FIVE_MINUTE_STEP: f32 = TAU / SLOTS_PER_DAY as f32;

/// AM/PM indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    AM,
    PM,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

/// A time of day on the dial's 5-minute grid
///
/// Always derived from a clock angle; never the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour in 24-hour format (0-23)
    pub hour: u32,
    /// Minute (0-59), a multiple of 5
    pub minute: u32,
}

impl TimeOfDay {
    /// Hour in 12-hour format (1-12)
    pub fn hour12(&self) -> u32 {
        match self.hour {
            0 => 12,
            1..=12 => self.hour,
            _ => self.hour - 12,
        }
    }

    /// AM/PM indicator
    pub fn meridiem(&self) -> Meridiem {
        if self.hour < 12 {
            Meridiem::AM
        } else {
            Meridiem::PM
        }
    }

    /// Format as "H:MM AM" / "H:MM PM"
    pub fn format_12h(&self) -> String {
        format!("{}:{:02} {}", self.hour12(), self.minute, self.meridiem())
    }
}

/// Error type for "HH:MM" time string parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTimeError {
    /// Not two colon-separated integers
    Malformed(String),
    /// Hours outside 0-23
    HourOutOfRange(u32),
    /// Minutes outside 0-59
    MinuteOutOfRange(u32),
}

impl std::fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseTimeError::Malformed(s) => write!(f, "Invalid time string: {:?}", s),
            ParseTimeError::HourOutOfRange(h) => write!(f, "Hours out of range: {}", h),
            ParseTimeError::MinuteOutOfRange(m) => write!(f, "Minutes out of range: {}", m),
        }
    }
}

impl std::error::Error for ParseTimeError {}

/// Wrap an angle into [0, 2π)
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Quantize a clock angle to the nearest 5-minute slot, as minutes of day
///
/// The slot index wraps, so angles at (or float-rounded past) a full turn
/// land back on midnight rather than producing 1440.
pub fn minutes_from_angle(angle: f32) -> u32 {
    let slot = (angle / FIVE_MINUTE_STEP).round() as i64;
    slot.rem_euclid(SLOTS_PER_DAY as i64) as u32 * 5
}

/// Convert a clock angle to a time of day on the 5-minute grid
pub fn time_from_angle(angle: f32) -> TimeOfDay {
    let minutes = minutes_from_angle(angle);
    TimeOfDay {
        hour: minutes / 60,
        minute: minutes % 60,
    }
}

/// Parse a 24-hour "HH:MM" string into its clock angle
///
/// Malformed or out-of-range input is an error; nothing is clamped.
pub fn angle_from_time_string(time_str: &str) -> Result<f32, ParseTimeError> {
    let (hours_str, minutes_str) = time_str
        .split_once(':')
        .ok_or_else(|| ParseTimeError::Malformed(time_str.to_string()))?;
    let hours: u32 = hours_str
        .trim()
        .parse()
        .map_err(|_| ParseTimeError::Malformed(time_str.to_string()))?;
    let minutes: u32 = minutes_str
        .trim()
        .parse()
        .map_err(|_| ParseTimeError::Malformed(time_str.to_string()))?;

    if hours > 23 {
        return Err(ParseTimeError::HourOutOfRange(hours));
    }
    if minutes > 59 {
        return Err(ParseTimeError::MinuteOutOfRange(minutes));
    }

    let total_minutes = hours * 60 + minutes;
    Ok(total_minutes as f32 / MINUTES_PER_DAY as f32 * TAU)
}

/// Clockwise arc from `start` to `end`, in [0, 2π)
///
/// Always measured clockwise, so a window that wraps past midnight
/// ("23:00" to "08:00") comes out positive.
pub fn angle_length_between(start: f32, end: f32) -> f32 {
    (end - start).rem_euclid(TAU)
}

/// Angular width of a grid slot of the given resolution in minutes
pub fn grid_step(minutes: u32) -> f32 {
    minutes as f32 / MINUTES_PER_DAY as f32 * TAU
}

/// Round an angle to the nearest multiple of `step`
pub fn snap_to_step(angle: f32, step: f32) -> f32 {
    (angle / step).round() * step
}

/// Round an angle to the nearest 5-minute tick
pub fn snap_to_grid(angle: f32) -> f32 {
    snap_to_step(angle, FIVE_MINUTE_STEP)
}

/// Human label for a sleep duration, e.g. "8 hours 30 min"
///
/// Whichever unit is zero is omitted.
pub fn duration_label(angle_length: f32) -> String {
    let total_minutes = (angle_length / TAU * MINUTES_PER_DAY as f32).round() as u32;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let hour_unit = if hours > 1 { "hours" } else { "hour" };

    if hours == 0 {
        format!("{} min", minutes)
    } else if minutes == 0 {
        format!("{} {}", hours, hour_unit)
    } else {
        format!("{} {} {} min", hours, hour_unit, minutes)
    }
}
