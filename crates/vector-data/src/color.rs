//! 32-bit ARGB color literals (`#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB`).

use thiserror::Error;

pub const TRANSPARENT: u32 = 0x0000_0000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("color literal '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color literal '{0}' must have 3, 4, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color literal '{0}' contains a non-hex digit")]
    BadDigit(String),
}

pub fn parse_color(text: &str) -> Result<u32, ColorError> {
    let trimmed = text.trim();
    let hex = trimmed
        .strip_prefix('#')
        .ok_or_else(|| ColorError::MissingHash(trimmed.to_string()))?;

    let mut digits = Vec::with_capacity(8);
    for c in hex.chars() {
        let d = c
            .to_digit(16)
            .ok_or_else(|| ColorError::BadDigit(trimmed.to_string()))?;
        digits.push(d);
    }

    // Short forms double every digit.
    let expanded: Vec<u32> = match digits.len() {
        3 => std::iter::once(0xF)
            .chain(digits.iter().copied())
            .flat_map(|d| [d, d])
            .collect(),
        4 => digits.iter().flat_map(|&d| [d, d]).collect(),
        6 => [0xF, 0xF].into_iter().chain(digits.iter().copied()).collect(),
        8 => digits,
        _ => return Err(ColorError::BadLength(trimmed.to_string())),
    };

    Ok(expanded.iter().fold(0u32, |acc, d| (acc << 4) | d))
}

pub fn alpha(argb: u32) -> u8 {
    (argb >> 24) as u8
}

pub fn red(argb: u32) -> u8 {
    (argb >> 16) as u8
}

pub fn green(argb: u32) -> u8 {
    (argb >> 8) as u8
}

pub fn blue(argb: u32) -> u8 {
    argb as u8
}

pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Multiplies the color's alpha channel by `factor` (clamped to [0, 1]).
pub fn scale_alpha(argb: u32, factor: f32) -> u32 {
    let a = (alpha(argb) as f32 * factor.clamp(0.0, 1.0)).round() as u8;
    (argb & 0x00FF_FFFF) | (a as u32) << 24
}

/// Per-channel interpolation, as an ARGB evaluator does.
pub fn lerp_argb(from: u32, to: u32, fraction: f32) -> u32 {
    let mix = |a: u8, b: u8| -> u8 {
        let v = a as f32 + (b as f32 - a as f32) * fraction;
        v.round().clamp(0.0, 255.0) as u8
    };
    from_argb(
        mix(alpha(from), alpha(to)),
        mix(red(from), red(to)),
        mix(green(from), green(to)),
        mix(blue(from), blue(to)),
    )
}
