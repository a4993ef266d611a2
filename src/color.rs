//! Hex color parsing and interpolation
//!
//! Palette entries are `#rrggbb` strings. Parsing is memoized per input
//! string since the same handful of palette colors are blended every frame.

use std::cell::RefCell;
use std::collections::HashMap;

/// An 8-bit RGB triple
pub type Rgb = (u8, u8, u8);

thread_local! {
    static RGB_CACHE: RefCell<HashMap<String, Rgb>> = RefCell::new(HashMap::new());
}

/// Parse a 6-digit hex color (case-insensitive, optional leading `#`).
///
/// Anything else (including CSS keywords like `transparent`) parses as black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    if let Some(rgb) = RGB_CACHE.with(|cache| cache.borrow().get(hex).copied()) {
        return rgb;
    }

    let rgb = parse_hex(hex).unwrap_or((0, 0, 0));
    RGB_CACHE.with(|cache| {
        cache.borrow_mut().insert(hex.to_owned(), rgb);
    });
    rgb
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Encode an RGB triple as a lowercase `#rrggbb` string
pub fn rgb_to_hex((r, g, b): Rgb) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Linearly interpolate between two hex colors.
///
/// `t` is clamped to [0, 1]; each channel is rounded to the nearest integer.
pub fn lerp(c1: &str, c2: &str, t: f32) -> String {
    let (r1, g1, b1) = hex_to_rgb(c1);
    let (r2, g2, b2) = hex_to_rgb(c2);
    let t = t.clamp(0.0, 1.0);

    let mix = |a: u8, b: u8| -> u8 {
        let v = a as f32 + (b as f32 - a as f32) * t;
        v.round().clamp(0.0, 255.0) as u8
    };

    rgb_to_hex((mix(r1, r2), mix(g1, g2), mix(b1, b2)))
}
