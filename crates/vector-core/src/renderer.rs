use crate::node::{Color, FillRule, FullPath, LineCap, LineJoin, SceneNode};
use crate::scene::{NodeId, SceneGraph};
use crate::trim::trim_path;
use glam::{Mat3, Vec2};
use kurbo::{Affine, BezPath};
use tracing::debug;
use vector_data::color;

/// Stroke parameters in device space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Zero means a one-pixel hairline.
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
}

/// Drawing surface used by the traversal. Paths arrive already in device coordinates.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    /// Intersects the current clip with `path`. The clip lasts until the matching `restore`.
    fn clip_path(&mut self, path: &BezPath, rule: FillRule);
    fn fill_path(&mut self, path: &BezPath, rule: FillRule, color: Color);
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Color);
}

pub struct SceneRenderer;

impl SceneRenderer {
    /// Draws the scene into a `width` x `height` device area.
    pub fn draw(canvas: &mut dyn Canvas, scene: &SceneGraph, width: u32, height: u32) {
        let (viewport_width, viewport_height) = scene.viewport_size();
        let viewport_scale = Vec2::new(
            width as f32 / viewport_width,
            height as f32 / viewport_height,
        );
        draw_group(canvas, scene, scene.root(), Mat3::IDENTITY, viewport_scale);
    }
}

fn draw_group(
    canvas: &mut dyn Canvas,
    scene: &SceneGraph,
    id: NodeId,
    parent: Mat3,
    viewport_scale: Vec2,
) {
    let Some(SceneNode::Group(group)) = scene.node(id) else {
        return;
    };
    let stacked = parent * group.local_transform();

    // Clips from this group's clip paths end here.
    canvas.save();
    for &child in scene.children(id) {
        match scene.node(child) {
            Some(SceneNode::Group(_)) => draw_group(canvas, scene, child, stacked, viewport_scale),
            Some(SceneNode::ClipPath(clip)) => {
                let Some(device) = device_path(clip.geometry.path(), &stacked, viewport_scale)
                else {
                    debug!(node = child, "Skipping clip path with degenerate transform");
                    continue;
                };
                canvas.clip_path(&device, FillRule::NonZero);
            }
            Some(SceneNode::Path(path)) => draw_path(canvas, child, path, &stacked, viewport_scale),
            None => {}
        }
    }
    canvas.restore();
}

fn draw_path(
    canvas: &mut dyn Canvas,
    id: NodeId,
    path: &FullPath,
    stacked: &Mat3,
    viewport_scale: Vec2,
) {
    let scale = matrix_scale(stacked);
    if scale == 0.0 {
        debug!(node = id, "Skipping path with degenerate transform");
        return;
    }

    let local = if path.is_trimmed() {
        trim_path(
            path.geometry.path(),
            path.trim_start,
            path.trim_end,
            path.trim_offset,
        )
    } else {
        path.geometry.path().clone()
    };
    let mut device = local;
    device.apply_affine(to_affine(&(Mat3::from_scale(viewport_scale) * *stacked)));

    let fill = color::scale_alpha(path.fill_color, path.fill_alpha);
    if color::alpha(fill) != 0 {
        canvas.fill_path(&device, path.fill_rule, fill);
    }

    let stroke = color::scale_alpha(path.stroke_color, path.stroke_alpha);
    if color::alpha(stroke) != 0 {
        let style = StrokeStyle {
            width: path.stroke_width * viewport_scale.min_element() * scale,
            cap: path.line_cap,
            join: path.line_join,
            miter_limit: path.miter_limit,
        };
        canvas.stroke_path(&device, &style, stroke);
    }
}

fn device_path(path: &BezPath, stacked: &Mat3, viewport_scale: Vec2) -> Option<BezPath> {
    if matrix_scale(stacked) == 0.0 {
        return None;
    }
    let mut device = path.clone();
    device.apply_affine(to_affine(&(Mat3::from_scale(viewport_scale) * *stacked)));
    Some(device)
}

/// How much `m` scales lengths: |cross| of the mapped unit vectors over the longer of the two.
/// Zero when the transform collapses to a line or a point.
pub fn matrix_scale(m: &Mat3) -> f32 {
    let v0 = m.transform_vector2(Vec2::new(0.0, 1.0));
    let v1 = m.transform_vector2(Vec2::new(1.0, 0.0));
    let max = v0.length().max(v1.length());
    if max > 0.0 {
        v0.perp_dot(v1).abs() / max
    } else {
        0.0
    }
}

pub fn to_affine(m: &Mat3) -> Affine {
    let m = m.to_cols_array();
    Affine::new([
        m[0] as f64,
        m[1] as f64,
        m[3] as f64,
        m[4] as f64,
        m[6] as f64,
        m[7] as f64,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_scale() {
        assert_eq!(matrix_scale(&Mat3::IDENTITY), 1.0);
        assert_eq!(matrix_scale(&Mat3::from_scale(Vec2::new(2.0, 2.0))), 2.0);
        // Non-uniform: area 6 over the longer axis 3.
        assert_eq!(matrix_scale(&Mat3::from_scale(Vec2::new(2.0, 3.0))), 2.0);
        assert_eq!(matrix_scale(&Mat3::from_scale(Vec2::new(0.0, 1.0))), 0.0);
        assert_eq!(matrix_scale(&Mat3::ZERO), 0.0);
        let rotated = Mat3::from_rotation_z(0.7) * Mat3::from_scale(Vec2::splat(4.0));
        assert!((matrix_scale(&rotated) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_to_affine_matches_glam() {
        let m = Mat3::from_translation(Vec2::new(3.0, -2.0))
            * Mat3::from_rotation_z(0.3)
            * Mat3::from_scale(Vec2::new(2.0, 0.5));
        let p = m.transform_point2(Vec2::new(5.0, 7.0));
        let q = to_affine(&m) * kurbo::Point::new(5.0, 7.0);
        assert!((p.x as f64 - q.x).abs() < 1e-4);
        assert!((p.y as f64 - q.y).abs() < 1e-4);
    }
}
