//! Trim-path extraction by arc length.

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Total arc length over every contour of the path.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(ARCLEN_ACCURACY)).sum()
}

/// Returns the visible part of `path` for the given trim window.
///
/// `start` and `end` are shifted by `offset` and wrapped into [0, 1). When the shifted start
/// lies past the shifted end the window wraps, and the result is `[start, L]` followed by
/// `[0, end]`.
pub fn trim_path(path: &BezPath, start: f32, end: f32, offset: f32) -> BezPath {
    let segments: Vec<(PathSeg, f64)> = path
        .segments()
        .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
        .collect();
    let total: f64 = segments.iter().map(|(_, len)| len).sum();

    let s = ((start + offset).rem_euclid(1.0) as f64) * total;
    let e = ((end + offset).rem_euclid(1.0) as f64) * total;

    let mut out = BezPath::new();
    if s > e {
        append_range(&segments, s, total, &mut out);
        append_range(&segments, 0.0, e, &mut out);
    } else {
        append_range(&segments, s, e, &mut out);
    }
    out
}

/// Appends the part of the segment list between two arc-length positions. The piece always
/// begins with a move; later contour breaks inside the range begin new sub-paths.
fn append_range(segments: &[(PathSeg, f64)], start: f64, end: f64, out: &mut BezPath) {
    if end <= start {
        return;
    }
    let mut cursor = 0.0;
    let mut last: Option<Point> = None;

    for &(seg, len) in segments {
        let seg_start = cursor;
        let seg_end = cursor + len;
        cursor = seg_end;

        if len <= 0.0 || seg_end <= start || seg_start >= end {
            continue;
        }

        let t0 = if start > seg_start {
            seg.inv_arclen(start - seg_start, ARCLEN_ACCURACY)
        } else {
            0.0
        };
        let t1 = if end < seg_end {
            seg.inv_arclen(end - seg_start, ARCLEN_ACCURACY)
        } else {
            1.0
        };
        let piece = seg.subsegment(t0..t1);

        if last != Some(piece.start()) {
            out.move_to(piece.start());
        }
        match piece {
            PathSeg::Line(l) => out.line_to(l.p1),
            PathSeg::Quad(q) => out.quad_to(q.p1, q.p2),
            PathSeg::Cubic(c) => out.curve_to(c.p1, c.p2, c.p3),
        }
        last = Some(piece.end());
    }
}
