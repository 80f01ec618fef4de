//! tiny-skia implementation of the traversal canvas.

use kurbo::{BezPath, PathEl};
use tiny_skia::{Mask, Paint, Path, PathBuilder, PixmapMut, Stroke, Transform};
use vector_core::data::color;
use vector_core::{Canvas, Color, FillRule, LineCap, LineJoin, StrokeStyle};

/// Draws into a borrowed pixmap. Clips are kept as a coverage mask and saved by value.
pub struct PixmapCanvas<'a> {
    pixmap: PixmapMut<'a>,
    clip: Option<Mask>,
    saved: Vec<Option<Mask>>,
    anti_alias: bool,
}

impl<'a> PixmapCanvas<'a> {
    pub fn new(pixmap: PixmapMut<'a>, anti_alias: bool) -> Self {
        Self {
            pixmap,
            clip: None,
            saved: Vec::new(),
            anti_alias,
        }
    }

    fn paint(&self, argb: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(
            color::red(argb),
            color::green(argb),
            color::blue(argb),
            color::alpha(argb),
        );
        paint.anti_alias = self.anti_alias;
        paint
    }
}

impl Canvas for PixmapCanvas<'_> {
    fn save(&mut self) {
        self.saved.push(self.clip.clone());
    }

    fn restore(&mut self) {
        if let Some(clip) = self.saved.pop() {
            self.clip = clip;
        }
    }

    fn clip_path(&mut self, path: &BezPath, rule: FillRule) {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let Some(path) = to_skia_path(path) else {
            // Clipping to an empty path hides everything after it.
            self.clip = Mask::new(width, height);
            return;
        };

        match &mut self.clip {
            Some(mask) => {
                mask.intersect_path(&path, convert_fill_rule(rule), self.anti_alias, Transform::identity())
            }
            None => {
                if let Some(mut mask) = Mask::new(width, height) {
                    mask.fill_path(&path, convert_fill_rule(rule), self.anti_alias, Transform::identity());
                    self.clip = Some(mask);
                }
            }
        }
    }

    fn fill_path(&mut self, path: &BezPath, rule: FillRule, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let paint = self.paint(color);
        self.pixmap.fill_path(
            &path,
            &paint,
            convert_fill_rule(rule),
            Transform::identity(),
            self.clip.as_ref(),
        );
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let paint = self.paint(color);
        let stroke = Stroke {
            width: sanitize(style.width),
            miter_limit: style.miter_limit,
            line_cap: convert_cap(style.cap),
            line_join: convert_join(style.join),
            dash: None,
        };
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke,
            Transform::identity(),
            self.clip.as_ref(),
        );
    }
}

/// `None` for paths tiny-skia cannot represent (empty, or a lone move).
pub fn to_skia_path(bez_path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in bez_path.elements() {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        0.0
    }
}

fn convert_fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::NonZero => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
}

fn convert_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn convert_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}
