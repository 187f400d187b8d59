// Bitmap text for chart labels, drawn from the 8x8 glyph tables

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};

use super::put;

/// Glyph cell size in pixels at scale 1
pub const GLYPH: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Left to right
    Horizontal,
    /// Bottom to top, rotated a quarter turn counter-clockwise
    Vertical,
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Length of `text` along its reading direction
pub fn text_length(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH * scale
}

/// Keep at most as many characters as fit in `room` pixels
pub fn fit(text: &str, room: u32, scale: u32) -> String {
    let max_chars = (room / (GLYPH * scale)) as usize;
    text.chars().take(max_chars).collect()
}

/// Draw `text` with its first glyph's top-left corner at `(x, y)` for
/// horizontal text, or its first glyph's bottom-left corner at `(x, y)` for
/// vertical text.
pub fn draw_text(
    canvas: &mut RgbImage,
    x: i64,
    y: i64,
    text: &str,
    scale: u32,
    color: Rgb<u8>,
    orientation: Orientation,
) {
    let s = scale.max(1) as i64;

    for (index, c) in text.chars().enumerate() {
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..8 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                // Position in unrotated text space
                let along = (index as i64 * 8 + col) * s;
                let across = row as i64 * s;

                for dy in 0..s {
                    for dx in 0..s {
                        match orientation {
                            Orientation::Horizontal => {
                                put(canvas, x + along + dx, y + across + dy, color)
                            }
                            Orientation::Vertical => {
                                put(canvas, x + across + dy, y - along - dx, color)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Short tick label: 1.2B, 35.5M, 12K, 7.5
pub fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e4 {
        format!("{:.0}K", value / 1e3)
    } else if magnitude >= 10.0 || magnitude == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
