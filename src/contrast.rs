//! WCAG 2.0 relative luminance and contrast ratio.

use crate::color::{Rgb, hex_to_rgb};
use crate::error::Result;

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Unrounded ratio, lighter over darker, in `[1, 21]`.
pub fn contrast_ratio_rgb(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a) + 0.05;
    let lb = relative_luminance(b) + 0.05;
    if la > lb { la / lb } else { lb / la }
}

/// Contrast ratio between two hex colors, rounded to one decimal place.
pub fn contrast_ratio(hex_a: &str, hex_b: &str) -> Result<f64> {
    let a = hex_to_rgb(hex_a)?;
    let b = hex_to_rgb(hex_b)?;
    Ok((contrast_ratio_rgb(a, b) * 10.0).round() / 10.0)
}

pub fn format_ratio(ratio: f64) -> String {
    format!("{:.1}", ratio)
}
