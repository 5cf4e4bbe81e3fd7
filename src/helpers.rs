//! Pure conversion helpers: colors, units and slide ID/index lookups.
//! Nothing here touches the network.

use crate::errors::{Result, SlidesApiError};
use crate::models::common::{Dimension, Unit};
use crate::models::requests::RgbColor;

// EMU (English Metric Unit) per Point (914400 EMU per inch / 72 pt per inch)
pub const EMU_PER_PT: i64 = 12_700;

// --- Unit Conversion ---

/// Converts points to EMU, rounding to the nearest whole EMU.
pub fn points_to_emu(points: f64) -> i64 {
    (points * EMU_PER_PT as f64).round() as i64
}

/// Converts EMU to points.
pub fn emu_to_points(emu: i64) -> f64 {
    emu as f64 / EMU_PER_PT as f64
}

/// Converts an optional `Dimension` to points (pt).
/// Returns 0.0 if the dimension is `None`, has no magnitude, or uses an unknown unit.
pub fn dimension_to_points(dim: Option<&Dimension>) -> f64 {
    match dim {
        Some(d) => {
            let magnitude = d.magnitude.unwrap_or(0.0);
            match d.unit.as_ref() {
                Some(Unit::Pt) => magnitude,
                Some(Unit::Emu) => magnitude / EMU_PER_PT as f64,
                _ => 0.0,
            }
        }
        None => 0.0,
    }
}

// --- Color Formatting ---

/// Maps one color channel to a byte. Values in `0.0..=1.0` are fractions
/// (the Slides API convention); anything larger is read as an already-scaled
/// 0-255 value. The result is clamped.
fn channel_to_byte(value: f64) -> u8 {
    let scaled = if (0.0..=1.0).contains(&value) {
        value * 255.0
    } else {
        value
    };
    scaled.round().clamp(0.0, 255.0) as u8
}

/// Converts RGB components to a `#rrggbb` hex string.
pub fn rgb_to_hex(red: f64, green: f64, blue: f64) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        channel_to_byte(red),
        channel_to_byte(green),
        channel_to_byte(blue)
    )
}

/// Parses `#rrggbb` (leading `#` optional) into fractional RGB components.
pub fn hex_to_rgb(hex_color: &str) -> Result<RgbColor> {
    let digits = hex_color.trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SlidesApiError::InvalidColor(hex_color.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f64> {
        u8::from_str_radix(&digits[range], 16)
            .map(|byte| byte as f64 / 255.0)
            .map_err(|_| SlidesApiError::InvalidColor(hex_color.to_string()))
    };

    Ok(RgbColor {
        red: channel(0..2)?,
        green: channel(2..4)?,
        blue: channel(4..6)?,
    })
}

// --- Slide lookups ---

/// Returns the zero-based position of `slide_id` within `slide_ids`.
pub fn slide_id_to_index<S: AsRef<str>>(slide_ids: &[S], slide_id: &str) -> Result<usize> {
    slide_ids
        .iter()
        .position(|id| id.as_ref() == slide_id)
        .ok_or_else(|| SlidesApiError::SlideNotFound(slide_id.to_string()))
}

/// Returns the slide ID stored at `index`.
pub fn index_to_slide_id<S: AsRef<str>>(slide_ids: &[S], index: usize) -> Result<&str> {
    slide_ids
        .get(index)
        .map(|id| id.as_ref())
        .ok_or(SlidesApiError::SlideIndexOutOfRange {
            index,
            len: slide_ids.len(),
        })
}
