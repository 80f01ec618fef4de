use serde::{Deserialize, Serialize};

/// A vector resource: root attributes plus a tree of groups, paths and clip paths.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VectorDocument {
    #[serde(default)]
    pub name: Option<String>,
    pub width: f32,
    pub height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    #[serde(default = "default_one")]
    pub alpha: f32,
    #[serde(default)]
    pub auto_mirrored: bool,
    #[serde(default)]
    pub tint: Option<String>,
    #[serde(default)]
    pub tint_mode: TintMode,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl VectorDocument {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Group(GroupElement),
    Path(PathElement),
    ClipPath(ClipPathElement),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupElement {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub pivot_x: f32,
    #[serde(default)]
    pub pivot_y: f32,
    #[serde(default = "default_one")]
    pub scale_x: f32,
    #[serde(default = "default_one")]
    pub scale_y: f32,
    #[serde(default)]
    pub translate_x: f32,
    #[serde(default)]
    pub translate_y: f32,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Default for GroupElement {
    fn default() -> Self {
        Self {
            name: None,
            rotation: 0.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PathElement {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path_data: String,
    #[serde(default)]
    pub fill_color: Option<String>,
    #[serde(default = "default_one")]
    pub fill_alpha: f32,
    #[serde(default)]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub stroke_width: f32,
    #[serde(default = "default_one")]
    pub stroke_alpha: f32,
    #[serde(default)]
    pub stroke_line_cap: LineCap,
    #[serde(default)]
    pub stroke_line_join: LineJoin,
    #[serde(default = "default_miter_limit")]
    pub stroke_miter_limit: f32,
    #[serde(default)]
    pub trim_path_start: f32,
    #[serde(default = "default_one")]
    pub trim_path_end: f32,
    #[serde(default)]
    pub trim_path_offset: f32,
    #[serde(default)]
    pub fill_type: FillType,
}

impl Default for PathElement {
    fn default() -> Self {
        Self {
            name: None,
            path_data: String::new(),
            fill_color: None,
            fill_alpha: 1.0,
            stroke_color: None,
            stroke_width: 0.0,
            stroke_alpha: 1.0,
            stroke_line_cap: LineCap::Butt,
            stroke_line_join: LineJoin::Miter,
            stroke_miter_limit: default_miter_limit(),
            trim_path_start: 0.0,
            trim_path_end: 1.0,
            trim_path_offset: 0.0,
            fill_type: FillType::NonZero,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClipPathElement {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path_data: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FillType {
    #[default]
    NonZero,
    EvenOdd,
}

/// Porter-Duff mode used to apply the tint color.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TintMode {
    SrcOver,
    #[default]
    SrcIn,
    SrcAtop,
    Multiply,
    Screen,
    Add,
}

// --- Animated vectors ---

/// A vector resource plus property animations bound to named nodes.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedVectorDocument {
    pub drawable: VectorDocument,
    #[serde(default)]
    pub targets: Vec<TargetElement>,
}

impl AnimatedVectorDocument {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TargetElement {
    pub name: String,
    #[serde(default)]
    pub animations: Vec<AnimatorElement>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnimatorElement {
    pub property_name: String,
    pub value_from: AnimatorValue,
    pub value_to: AnimatorValue,
    #[serde(default = "default_duration")]
    pub duration: u64,
    #[serde(default)]
    pub start_offset: u64,
    #[serde(default)]
    pub repeat_count: i32,
    #[serde(default)]
    pub repeat_mode: RepeatMode,
    #[serde(default)]
    pub interpolator: Interpolator,
}

/// Raw animator endpoint; text is a color literal or path data depending on the property.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AnimatorValue {
    Number(f32),
    Text(String),
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Restart,
    Reverse,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Interpolator {
    Linear,
    Accelerate,
    Decelerate,
    #[default]
    AccelerateDecelerate,
}

fn default_one() -> f32 {
    1.0
}

fn default_miter_limit() -> f32 {
    4.0
}

fn default_duration() -> u64 {
    300
}
