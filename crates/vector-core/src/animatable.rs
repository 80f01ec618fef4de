//! Property animation for animated vectors.
//!
//! A [`PropertyAnimator`] maps a play time to a value of one named property. A
//! [`TargetAnimation`] binds a set of animators to a resolved target and writes their values
//! into the scene.

use crate::errors::VectorError;
use crate::node::SceneNode;
use crate::scene::{SceneGraph, Target};
use keyframe::EasingFunction;
use std::f64::consts::PI;
use vector_data::color::{self, parse_color};
use vector_data::model::{AnimatorElement, AnimatorValue, Interpolator, RepeatMode};
use vector_data::PathCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Rotation,
    PivotX,
    PivotY,
    ScaleX,
    ScaleY,
    TranslateX,
    TranslateY,
    PathData,
    FillColor,
    StrokeColor,
    StrokeWidth,
    FillAlpha,
    StrokeAlpha,
    TrimPathStart,
    TrimPathEnd,
    TrimPathOffset,
    Alpha,
}

impl Property {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "rotation" => Self::Rotation,
            "pivotX" => Self::PivotX,
            "pivotY" => Self::PivotY,
            "scaleX" => Self::ScaleX,
            "scaleY" => Self::ScaleY,
            "translateX" => Self::TranslateX,
            "translateY" => Self::TranslateY,
            "pathData" => Self::PathData,
            "fillColor" => Self::FillColor,
            "strokeColor" => Self::StrokeColor,
            "strokeWidth" => Self::StrokeWidth,
            "fillAlpha" => Self::FillAlpha,
            "strokeAlpha" => Self::StrokeAlpha,
            "trimPathStart" => Self::TrimPathStart,
            "trimPathEnd" => Self::TrimPathEnd,
            "trimPathOffset" => Self::TrimPathOffset,
            "alpha" => Self::Alpha,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::PivotX => "pivotX",
            Self::PivotY => "pivotY",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::PathData => "pathData",
            Self::FillColor => "fillColor",
            Self::StrokeColor => "strokeColor",
            Self::StrokeWidth => "strokeWidth",
            Self::FillAlpha => "fillAlpha",
            Self::StrokeAlpha => "strokeAlpha",
            Self::TrimPathStart => "trimPathStart",
            Self::TrimPathEnd => "trimPathEnd",
            Self::TrimPathOffset => "trimPathOffset",
            Self::Alpha => "alpha",
        }
    }

    fn is_group_property(self) -> bool {
        matches!(
            self,
            Self::Rotation
                | Self::PivotX
                | Self::PivotY
                | Self::ScaleX
                | Self::ScaleY
                | Self::TranslateX
                | Self::TranslateY
        )
    }

    /// Whether this property exists on the given target.
    fn applies_to(self, target: Option<&SceneNode>) -> bool {
        match target {
            None => self == Self::Alpha,
            Some(SceneNode::Group(_)) => self.is_group_property(),
            Some(SceneNode::Path(_)) => !self.is_group_property() && self != Self::Alpha,
            Some(SceneNode::ClipPath(_)) => self == Self::PathData,
        }
    }

    /// Converts a raw animator endpoint into a typed value for this property.
    pub fn parse_value(self, raw: &AnimatorValue) -> Result<PropertyValue, VectorError> {
        let invalid = || VectorError::InvalidPropertyValue {
            property: self.name(),
        };
        match self {
            Self::PathData => match raw {
                AnimatorValue::Text(text) => Ok(PropertyValue::PathData(vector_data::parse(text)?)),
                AnimatorValue::Number(_) => Err(invalid()),
            },
            Self::FillColor | Self::StrokeColor => match raw {
                AnimatorValue::Text(text) => Ok(PropertyValue::Color(parse_color(text)?)),
                AnimatorValue::Number(_) => Err(invalid()),
            },
            _ => match raw {
                AnimatorValue::Number(n) => Ok(PropertyValue::Float(*n)),
                AnimatorValue::Text(text) => text
                    .trim()
                    .parse::<f32>()
                    .map(PropertyValue::Float)
                    .map_err(|_| invalid()),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Color(u32),
    PathData(Vec<PathCommand>),
}

impl PropertyValue {
    /// Interpolates toward `other`. Values that cannot be blended (incompatible path data or
    /// mismatched kinds) hold `self` until `t` reaches 1.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Self::Float(a + (b - a) * t),
            (Self::Color(a), Self::Color(b)) => Self::Color(color::lerp_argb(*a, *b, t)),
            (Self::PathData(a), Self::PathData(b)) => {
                match vector_data::interpolate(a, b, t) {
                    Some(commands) => Self::PathData(commands),
                    None => Self::PathData(if t < 1.0 { a.clone() } else { b.clone() }),
                }
            }
            _ => {
                if t < 1.0 {
                    self.clone()
                } else {
                    other.clone()
                }
            }
        }
    }
}

/// Interpolator curves, evaluated through `keyframe`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Accelerate,
    Decelerate,
    #[default]
    AccelerateDecelerate,
}

impl EasingFunction for Easing {
    fn y(&self, x: f64) -> f64 {
        match self {
            Easing::Linear => keyframe::functions::Linear.y(x),
            Easing::Accelerate => x * x,
            Easing::Decelerate => 1.0 - (1.0 - x) * (1.0 - x),
            Easing::AccelerateDecelerate => ((x + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

impl Easing {
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

impl From<Interpolator> for Easing {
    fn from(value: Interpolator) -> Self {
        match value {
            Interpolator::Linear => Easing::Linear,
            Interpolator::Accelerate => Easing::Accelerate,
            Interpolator::Decelerate => Easing::Decelerate,
            Interpolator::AccelerateDecelerate => Easing::AccelerateDecelerate,
        }
    }
}

/// Repeat count meaning "forever".
pub const INFINITE: i32 = -1;

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyAnimator {
    pub property: Property,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub duration_ms: u64,
    pub start_delay_ms: u64,
    pub easing: Easing,
    /// Extra plays after the first; negative repeats forever.
    pub repeat_count: i32,
    pub repeat_mode: RepeatMode,
}

impl PropertyAnimator {
    pub fn new(property: Property, from: PropertyValue, to: PropertyValue, duration_ms: u64) -> Self {
        Self {
            property,
            from,
            to,
            duration_ms,
            start_delay_ms: 0,
            easing: Easing::default(),
            repeat_count: 0,
            repeat_mode: RepeatMode::Restart,
        }
    }

    pub fn from_element(element: &AnimatorElement) -> Result<Self, VectorError> {
        let property = Property::from_name(&element.property_name)
            .ok_or_else(|| VectorError::UnknownProperty(element.property_name.clone()))?;
        Ok(Self {
            property,
            from: property.parse_value(&element.value_from)?,
            to: property.parse_value(&element.value_to)?,
            duration_ms: element.duration,
            start_delay_ms: element.start_offset,
            easing: element.interpolator.into(),
            repeat_count: element.repeat_count,
            repeat_mode: element.repeat_mode,
        })
    }

    /// Play time at which the animator stops changing, or `None` if it repeats forever.
    /// Saturates at `u64::MAX` for durations read from oversized resource values.
    pub fn total_duration_ms(&self) -> Option<u64> {
        if self.repeat_count < 0 {
            return None;
        }
        let plays = self.repeat_count as u64 + 1;
        Some(
            self.start_delay_ms
                .saturating_add(self.duration_ms.saturating_mul(plays)),
        )
    }

    /// Eased fraction at `play_time_ms`, or `None` before the start delay has elapsed.
    pub fn fraction_at(&self, play_time_ms: u64) -> Option<f32> {
        let elapsed = play_time_ms.checked_sub(self.start_delay_ms)?;

        let (iteration, raw) = if self.duration_ms == 0 {
            (self.repeat_count.max(0) as u64, 1.0)
        } else {
            let iteration = elapsed / self.duration_ms;
            if self.repeat_count >= 0 && iteration > self.repeat_count as u64 {
                (self.repeat_count as u64, 1.0)
            } else {
                let within = elapsed % self.duration_ms;
                (iteration, within as f32 / self.duration_ms as f32)
            }
        };

        let backward = self.repeat_mode == RepeatMode::Reverse && iteration % 2 == 1;
        let raw = if backward { 1.0 - raw } else { raw };
        Some(self.easing.eval(raw))
    }

    pub fn value_at(&self, play_time_ms: u64) -> Option<PropertyValue> {
        self.fraction_at(play_time_ms)
            .map(|fraction| self.from.lerp(&self.to, fraction))
    }
}

/// Writes `value` into the property of the target.
pub fn apply_property(
    scene: &mut SceneGraph,
    target: Target,
    property: Property,
    value: &PropertyValue,
) -> Result<(), VectorError> {
    let invalid = || VectorError::InvalidPropertyValue {
        property: property.name(),
    };

    let id = match target {
        Target::Vector => {
            return match (property, value) {
                (Property::Alpha, PropertyValue::Float(v)) => {
                    scene.set_root_alpha_f32(*v);
                    Ok(())
                }
                (Property::Alpha, _) => Err(invalid()),
                _ => Err(VectorError::PropertyMismatch {
                    property: property.name(),
                    node: "vector",
                }),
            };
        }
        Target::Node(id) => id,
    };

    let node = scene
        .node_mut(id)
        .ok_or_else(|| VectorError::UnresolvedAnimationTarget(format!("node #{id}")))?;
    let mismatch = VectorError::PropertyMismatch {
        property: property.name(),
        node: node.kind_name(),
    };

    match node {
        SceneNode::Group(group) => {
            if !property.is_group_property() {
                return Err(mismatch);
            }
            let PropertyValue::Float(v) = *value else {
                return Err(invalid());
            };
            match property {
                Property::Rotation => group.set_rotation(v),
                Property::PivotX => group.set_pivot_x(v),
                Property::PivotY => group.set_pivot_y(v),
                Property::ScaleX => group.set_scale_x(v),
                Property::ScaleY => group.set_scale_y(v),
                Property::TranslateX => group.set_translate_x(v),
                Property::TranslateY => group.set_translate_y(v),
                _ => return Err(mismatch),
            }
        }
        SceneNode::Path(path) => match (property, value) {
            (Property::PathData, PropertyValue::PathData(commands)) => {
                path.geometry.set_commands(commands.clone())
            }
            (Property::FillColor, PropertyValue::Color(c)) => path.fill_color = *c,
            (Property::StrokeColor, PropertyValue::Color(c)) => path.stroke_color = *c,
            (Property::StrokeWidth, PropertyValue::Float(v)) => path.stroke_width = *v,
            (Property::FillAlpha, PropertyValue::Float(v)) => path.fill_alpha = *v,
            (Property::StrokeAlpha, PropertyValue::Float(v)) => path.stroke_alpha = *v,
            (Property::TrimPathStart, PropertyValue::Float(v)) => path.trim_start = *v,
            (Property::TrimPathEnd, PropertyValue::Float(v)) => path.trim_end = *v,
            (Property::TrimPathOffset, PropertyValue::Float(v)) => path.trim_offset = *v,
            _ if property.is_group_property() || property == Property::Alpha => {
                return Err(mismatch)
            }
            _ => return Err(invalid()),
        },
        SceneNode::ClipPath(clip) => match (property, value) {
            (Property::PathData, PropertyValue::PathData(commands)) => {
                clip.geometry.set_commands(commands.clone())
            }
            (Property::PathData, _) => return Err(invalid()),
            _ => return Err(mismatch),
        },
    }
    Ok(())
}

/// Animators bound to one resolved target.
#[derive(Clone, Debug)]
pub struct TargetAnimation {
    pub name: String,
    pub target: Target,
    pub animators: Vec<PropertyAnimator>,
}

impl TargetAnimation {
    /// Resolves `name` in the scene and checks that every animated property exists on it.
    pub fn bind(
        scene: &SceneGraph,
        name: &str,
        animators: Vec<PropertyAnimator>,
    ) -> Result<Self, VectorError> {
        let target = scene.require_target(name)?;
        let node = match target {
            Target::Vector => None,
            Target::Node(id) => scene.node(id),
        };
        if let Some(bad) = animators.iter().find(|a| !a.property.applies_to(node)) {
            return Err(VectorError::PropertyMismatch {
                property: bad.property.name(),
                node: node.map_or("vector", SceneNode::kind_name),
            });
        }
        Ok(Self {
            name: name.to_string(),
            target,
            animators,
        })
    }

    /// Writes every started animator's value into the scene. Later animators on the same
    /// property win.
    pub fn apply(&self, scene: &mut SceneGraph, play_time_ms: u64) -> Result<(), VectorError> {
        for animator in &self.animators {
            if let Some(value) = animator.value_at(play_time_ms) {
                apply_property(scene, self.target, animator.property, &value)?;
            }
        }
        Ok(())
    }

    pub fn total_duration_ms(&self) -> Option<u64> {
        self.animators
            .iter()
            .map(PropertyAnimator::total_duration_ms)
            .try_fold(0, |acc, d| d.map(|d| acc.max(d)))
    }
}
