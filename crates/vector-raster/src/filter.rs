//! Constant-color blend filters applied when compositing the cached bitmap.
//!
//! tiny-skia has no color filters, so the filter runs over a premultiplied copy of the
//! bitmap before it is drawn.

use tiny_skia::{Pixmap, PremultipliedColorU8};
use vector_core::data::color;
use vector_core::data::model::TintMode;

/// Blends a constant color (source) over every pixel (destination).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorFilter {
    pub color: u32,
    pub mode: TintMode,
}

impl ColorFilter {
    pub fn new(color: u32, mode: TintMode) -> Self {
        Self { color, mode }
    }

    /// The tint filter for a drawable, if it has a tint.
    pub fn tint(tint: Option<u32>, mode: TintMode) -> Option<Self> {
        tint.map(|color| Self::new(color, mode))
    }

    pub fn apply(&self, pixmap: &mut Pixmap) {
        let sa = color::alpha(self.color) as f32 / 255.0;
        // Premultiplied source channels.
        let src = [
            color::red(self.color) as f32 / 255.0 * sa,
            color::green(self.color) as f32 / 255.0 * sa,
            color::blue(self.color) as f32 / 255.0 * sa,
        ];

        for pixel in pixmap.pixels_mut() {
            let da = pixel.alpha() as f32 / 255.0;
            let dst = [
                pixel.red() as f32 / 255.0,
                pixel.green() as f32 / 255.0,
                pixel.blue() as f32 / 255.0,
            ];
            let (a, c) = blend(self.mode, sa, src, da, dst);
            if let Some(out) = to_premultiplied(a, c) {
                *pixel = out;
            }
        }
    }
}

fn blend(mode: TintMode, sa: f32, s: [f32; 3], da: f32, d: [f32; 3]) -> (f32, [f32; 3]) {
    let per_channel = |f: &dyn Fn(f32, f32) -> f32| [f(s[0], d[0]), f(s[1], d[1]), f(s[2], d[2])];
    match mode {
        TintMode::SrcOver => (sa + da * (1.0 - sa), per_channel(&|s, d| s + d * (1.0 - sa))),
        TintMode::SrcIn => (sa * da, per_channel(&|s, _| s * da)),
        TintMode::SrcAtop => (da, per_channel(&|s, d| s * da + d * (1.0 - sa))),
        TintMode::Multiply => (sa * da, per_channel(&|s, d| s * d)),
        TintMode::Screen => (sa + da - sa * da, per_channel(&|s, d| s + d - s * d)),
        TintMode::Add => ((sa + da).min(1.0), per_channel(&|s, d| (s + d).min(1.0))),
    }
}

fn to_premultiplied(a: f32, c: [f32; 3]) -> Option<PremultipliedColorU8> {
    let a8 = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
    let channel = |v: f32| ((v.clamp(0.0, 1.0) * 255.0).round() as u8).min(a8);
    PremultipliedColorU8::from_rgba(channel(c[0]), channel(c[1]), channel(c[2]), a8)
}
