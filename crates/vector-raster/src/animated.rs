use crate::drawable::{Bounds, VectorDrawable};
use tiny_skia::{PixmapMut, Transform};
use tracing::debug;
use vector_core::data::model::AnimatedVectorDocument;
use vector_core::{PropertyAnimator, TargetAnimation, VectorError};

/// A vector drawable driven by property animators.
///
/// Every target is resolved when the drawable is built; a missing name is a construction
/// error. Caching is disabled because animated frames invalidate it every time.
pub struct AnimatedVectorDrawable {
    drawable: VectorDrawable,
    animations: Vec<TargetAnimation>,
    play_time_ms: u64,
}

impl AnimatedVectorDrawable {
    pub fn new(
        mut drawable: VectorDrawable,
        targets: Vec<(String, Vec<PropertyAnimator>)>,
    ) -> Result<Self, VectorError> {
        let animations = targets
            .into_iter()
            .map(|(name, animators)| TargetAnimation::bind(drawable.scene(), &name, animators))
            .collect::<Result<Vec<_>, _>>()?;

        drawable.set_allow_caching(false);
        Ok(Self {
            drawable,
            animations,
            play_time_ms: 0,
        })
    }

    pub fn from_document(doc: &AnimatedVectorDocument) -> Result<Self, VectorError> {
        let drawable = VectorDrawable::from_document(&doc.drawable)?;
        let mut targets = Vec::with_capacity(doc.targets.len());
        for target in &doc.targets {
            let animators = target
                .animations
                .iter()
                .map(PropertyAnimator::from_element)
                .collect::<Result<Vec<_>, _>>()?;
            targets.push((target.name.clone(), animators));
        }
        Self::new(drawable, targets)
    }

    pub fn from_json(text: &str) -> Result<Self, VectorError> {
        Self::from_document(&AnimatedVectorDocument::from_json(text)?)
    }

    pub fn drawable(&self) -> &VectorDrawable {
        &self.drawable
    }

    pub fn drawable_mut(&mut self) -> &mut VectorDrawable {
        &mut self.drawable
    }

    pub fn animations(&self) -> &[TargetAnimation] {
        &self.animations
    }

    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }

    /// Longest animator end time, or `None` when something repeats forever.
    pub fn total_duration_ms(&self) -> Option<u64> {
        self.animations
            .iter()
            .map(TargetAnimation::total_duration_ms)
            .try_fold(0, |acc, d| d.map(|d| acc.max(d)))
    }

    /// Seeks every animator to `play_time_ms` and writes the values into the scene.
    pub fn set_current_play_time(&mut self, play_time_ms: u64) -> Result<(), VectorError> {
        self.play_time_ms = play_time_ms;
        let scene = self.drawable.scene_mut();
        for animation in &self.animations {
            animation.apply(scene, play_time_ms)?;
        }
        debug!(play_time_ms, "Applied animated vector frame");
        Ok(())
    }

    pub fn draw(&mut self, target: &mut PixmapMut, bounds: Bounds, transform: Transform) {
        self.drawable.draw(target, bounds, transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vector_core::{Property, PropertyValue, Target};

    const SPINNER: &str = r##"{ "name": "spinner", "width": 24, "height": 24,
        "viewportWidth": 24, "viewportHeight": 24,
        "children": [ { "type": "group", "name": "arm", "pivotX": 12, "pivotY": 12,
            "children": [ { "type": "path", "pathData": "M12 2 V12", "strokeColor": "#FF000000",
                            "strokeWidth": 2 } ] } ] }"##;

    #[test]
    fn test_new_rejects_missing_target() {
        let drawable = VectorDrawable::from_json(SPINNER).unwrap();
        let result = AnimatedVectorDrawable::new(drawable, vec![("gear_rotate".into(), Vec::new())]);
        assert!(matches!(
            result,
            Err(VectorError::UnresolvedAnimationTarget(name)) if name == "gear_rotate"
        ));
    }

    #[test]
    fn test_play_time_drives_scene() {
        let drawable = VectorDrawable::from_json(SPINNER).unwrap();
        let mut rotate = PropertyAnimator::new(
            Property::Rotation,
            PropertyValue::Float(0.0),
            PropertyValue::Float(180.0),
            400,
        );
        rotate.easing = vector_core::Easing::Linear;
        let fade = PropertyAnimator::new(
            Property::Alpha,
            PropertyValue::Float(1.0),
            PropertyValue::Float(0.0),
            800,
        );
        let mut avd = AnimatedVectorDrawable::new(
            drawable,
            vec![("arm".into(), vec![rotate]), ("spinner".into(), vec![fade])],
        )
        .unwrap();
        assert_eq!(avd.total_duration_ms(), Some(800));

        avd.set_current_play_time(200).unwrap();
        let Some(Target::Node(arm)) = avd.drawable().resolve_target("arm") else {
            panic!("arm should resolve");
        };
        let rotation = avd
            .drawable()
            .scene()
            .node(arm)
            .and_then(|n| n.as_group())
            .map(|g| g.rotation());
        assert_eq!(rotation, Some(90.0));

        avd.set_current_play_time(800).unwrap();
        assert_eq!(avd.drawable().alpha(), 0);
    }
}
