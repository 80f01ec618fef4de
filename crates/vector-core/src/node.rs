use crate::geometry::build_path;
use glam::{Mat3, Vec2};
use kurbo::BezPath;
use vector_data::color;
use vector_data::{PathCommand, PathDataError};

/// 32-bit ARGB color.
pub type Color = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Parsed commands together with the geometry built from them.
///
/// The geometry is rebuilt from scratch every time the commands are replaced.
#[derive(Clone, Debug, Default)]
pub struct PathGeometry {
    commands: Vec<PathCommand>,
    path: BezPath,
}

impl PathGeometry {
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        let path = build_path(&commands);
        Self { commands, path }
    }

    pub fn from_path_data(data: &str) -> Result<Self, PathDataError> {
        Ok(Self::from_commands(vector_data::parse(data)?))
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn set_commands(&mut self, commands: Vec<PathCommand>) {
        self.path = build_path(&commands);
        self.commands = commands;
    }
}

/// A transform node. The local transform is derived from the five transform fields and is
/// recomputed on every write, so it can never drift from them.
///
/// Children and names belong to the [`SceneGraph`](crate::SceneGraph), not to the group.
#[derive(Clone, Debug)]
pub struct Group {
    rotation: f32,
    pivot: Vec2,
    scale: Vec2,
    translation: Vec2,
    local: Mat3,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            pivot: Vec2::ZERO,
            scale: Vec2::ONE,
            translation: Vec2::ZERO,
            local: Mat3::IDENTITY,
        }
    }
}

impl Group {
    /// Builder-style constructor for all transform fields at once.
    pub fn with_transform(
        mut self,
        rotation: f32,
        pivot: Vec2,
        scale: Vec2,
        translation: Vec2,
    ) -> Self {
        self.rotation = rotation;
        self.pivot = pivot;
        self.scale = scale;
        self.translation = translation;
        self.update_local();
        self
    }

    /// T(translation + pivot) · R(rotation) · S(scale) · T(-pivot)
    fn update_local(&mut self) {
        let mat_t = Mat3::from_translation(self.translation + self.pivot);
        let mat_r = Mat3::from_rotation_z(self.rotation.to_radians());
        let mat_s = Mat3::from_scale(self.scale);
        let mat_p = Mat3::from_translation(-self.pivot);
        self.local = mat_t * mat_r * mat_s * mat_p;
    }

    pub fn local_transform(&self) -> Mat3 {
        self.local
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        if self.rotation != degrees {
            self.rotation = degrees;
            self.update_local();
        }
    }

    pub fn set_pivot_x(&mut self, x: f32) {
        if self.pivot.x != x {
            self.pivot.x = x;
            self.update_local();
        }
    }

    pub fn set_pivot_y(&mut self, y: f32) {
        if self.pivot.y != y {
            self.pivot.y = y;
            self.update_local();
        }
    }

    pub fn set_scale_x(&mut self, x: f32) {
        if self.scale.x != x {
            self.scale.x = x;
            self.update_local();
        }
    }

    pub fn set_scale_y(&mut self, y: f32) {
        if self.scale.y != y {
            self.scale.y = y;
            self.update_local();
        }
    }

    pub fn set_translate_x(&mut self, x: f32) {
        if self.translation.x != x {
            self.translation.x = x;
            self.update_local();
        }
    }

    pub fn set_translate_y(&mut self, y: f32) {
        if self.translation.y != y {
            self.translation.y = y;
            self.update_local();
        }
    }
}

/// A painted path.
#[derive(Clone, Debug)]
pub struct FullPath {
    pub geometry: PathGeometry,
    pub fill_color: Color,
    pub fill_alpha: f32,
    pub fill_rule: FillRule,
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub stroke_alpha: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub trim_start: f32,
    pub trim_end: f32,
    pub trim_offset: f32,
}

impl Default for FullPath {
    fn default() -> Self {
        Self {
            geometry: PathGeometry::default(),
            fill_color: color::TRANSPARENT,
            fill_alpha: 1.0,
            fill_rule: FillRule::NonZero,
            stroke_color: color::TRANSPARENT,
            stroke_width: 0.0,
            stroke_alpha: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 4.0,
            trim_start: 0.0,
            trim_end: 1.0,
            trim_offset: 0.0,
        }
    }
}

impl FullPath {
    pub fn new(geometry: PathGeometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    pub fn is_trimmed(&self) -> bool {
        self.trim_start != 0.0 || self.trim_end != 1.0
    }
}

/// A path that only restricts drawing of later siblings and their descendants.
#[derive(Clone, Debug, Default)]
pub struct ClipPath {
    pub geometry: PathGeometry,
}

impl ClipPath {
    pub fn new(geometry: PathGeometry) -> Self {
        Self { geometry }
    }
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Group(Group),
    Path(FullPath),
    ClipPath(ClipPath),
}

impl SceneNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SceneNode::Group(_) => "group",
            SceneNode::Path(_) => "path",
            SceneNode::ClipPath(_) => "clip-path",
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            SceneNode::Group(g) => Some(g),
            _ => None,
        }
    }

    pub(crate) fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            SceneNode::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&FullPath> {
        match self {
            SceneNode::Path(p) => Some(p),
            _ => None,
        }
    }

    pub(crate) fn as_path_mut(&mut self) -> Option<&mut FullPath> {
        match self {
            SceneNode::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_clip_path(&self) -> Option<&ClipPath> {
        match self {
            SceneNode::ClipPath(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn as_clip_path_mut(&mut self) -> Option<&mut ClipPath> {
        match self {
            SceneNode::ClipPath(c) => Some(c),
            _ => None,
        }
    }
}
