//! Builds scene graphs from the serde document model.

use crate::animatable::{PropertyAnimator, TargetAnimation};
use crate::errors::VectorError;
use crate::node::{ClipPath, FillRule, FullPath, Group, LineCap, LineJoin, PathGeometry};
use crate::scene::{SceneBuilder, SceneGraph};
use glam::Vec2;
use tracing::debug;
use vector_data::color::{self, parse_color};
use vector_data::model::{
    self, AnimatedVectorDocument, ClipPathElement, Element, GroupElement, PathElement,
    VectorDocument,
};

enum Step<'a> {
    Enter(&'a Element),
    Leave,
}

/// Inflates a vector document. Any error aborts the whole graph.
pub fn inflate(doc: &VectorDocument) -> Result<SceneGraph, VectorError> {
    let mut builder = SceneBuilder::new(
        doc.viewport_width,
        doc.viewport_height,
        doc.width,
        doc.height,
    )?
    .name(doc.name.clone())
    .alpha(doc.alpha);

    let mut steps: Vec<Step> = doc.children.iter().rev().map(Step::Enter).collect();
    while let Some(step) = steps.pop() {
        match step {
            Step::Leave => builder.end_group()?,
            Step::Enter(Element::Group(group)) => {
                builder.begin_group(group.name.clone(), inflate_group(group));
                steps.push(Step::Leave);
                steps.extend(group.children.iter().rev().map(Step::Enter));
            }
            Step::Enter(Element::Path(path)) => {
                builder.add_path(path.name.clone(), inflate_path(path)?);
            }
            Step::Enter(Element::ClipPath(clip)) => {
                builder.add_clip_path(clip.name.clone(), inflate_clip_path(clip)?);
            }
        }
    }

    let scene = builder.finish()?;
    debug!(nodes = scene.len(), name = scene.root_name(), "Inflated vector");
    Ok(scene)
}

pub fn inflate_json(text: &str) -> Result<SceneGraph, VectorError> {
    inflate(&VectorDocument::from_json(text)?)
}

/// Inflates the drawable and binds every target's animators to it.
pub fn inflate_animated(
    doc: &AnimatedVectorDocument,
) -> Result<(SceneGraph, Vec<TargetAnimation>), VectorError> {
    let scene = inflate(&doc.drawable)?;
    let mut animations = Vec::with_capacity(doc.targets.len());
    for target in &doc.targets {
        let animators = target
            .animations
            .iter()
            .map(PropertyAnimator::from_element)
            .collect::<Result<Vec<_>, _>>()?;
        animations.push(TargetAnimation::bind(&scene, &target.name, animators)?);
    }
    Ok((scene, animations))
}

fn inflate_group(group: &GroupElement) -> Group {
    Group::default().with_transform(
        group.rotation,
        Vec2::new(group.pivot_x, group.pivot_y),
        Vec2::new(group.scale_x, group.scale_y),
        Vec2::new(group.translate_x, group.translate_y),
    )
}

fn inflate_path(path: &PathElement) -> Result<FullPath, VectorError> {
    let optional_color = |text: &Option<String>| match text {
        Some(text) => parse_color(text),
        None => Ok(color::TRANSPARENT),
    };

    Ok(FullPath {
        geometry: PathGeometry::from_path_data(&path.path_data)?,
        fill_color: optional_color(&path.fill_color)?,
        fill_alpha: path.fill_alpha,
        fill_rule: path.fill_type.into(),
        stroke_color: optional_color(&path.stroke_color)?,
        stroke_width: path.stroke_width,
        stroke_alpha: path.stroke_alpha,
        line_cap: path.stroke_line_cap.into(),
        line_join: path.stroke_line_join.into(),
        miter_limit: path.stroke_miter_limit,
        trim_start: path.trim_path_start,
        trim_end: path.trim_path_end,
        trim_offset: path.trim_path_offset,
    })
}

fn inflate_clip_path(clip: &ClipPathElement) -> Result<ClipPath, VectorError> {
    Ok(ClipPath::new(PathGeometry::from_path_data(
        &clip.path_data,
    )?))
}

impl From<model::LineCap> for LineCap {
    fn from(value: model::LineCap) -> Self {
        match value {
            model::LineCap::Butt => LineCap::Butt,
            model::LineCap::Round => LineCap::Round,
            model::LineCap::Square => LineCap::Square,
        }
    }
}

impl From<model::LineJoin> for LineJoin {
    fn from(value: model::LineJoin) -> Self {
        match value {
            model::LineJoin::Miter => LineJoin::Miter,
            model::LineJoin::Round => LineJoin::Round,
            model::LineJoin::Bevel => LineJoin::Bevel,
        }
    }
}

impl From<model::FillType> for FillRule {
    fn from(value: model::FillType) -> Self {
        match value {
            model::FillType::NonZero => FillRule::NonZero,
            model::FillType::EvenOdd => FillRule::EvenOdd,
        }
    }
}
