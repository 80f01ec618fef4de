use crate::cache::{CacheKey, CacheStats, RasterCache};
use crate::config::RasterConfig;
use crate::filter::ColorFilter;
use std::sync::Arc;
use tiny_skia::{FilterQuality, PixmapMut, PixmapPaint, Transform};
use tracing::{debug, instrument};
use vector_core::data::color::parse_color;
use vector_core::data::model::{TintMode, VectorDocument};
use vector_core::{inflate, ClipPath, FullPath, Group, NodeId, SceneGraph, Target, VectorError};

/// Destination rectangle in the caller's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// State shared between drawables created from the same resource until one of them mutates.
#[derive(Clone, Debug)]
pub struct VectorState {
    pub scene: SceneGraph,
    pub tint: Option<u32>,
    pub tint_mode: TintMode,
    pub auto_mirrored: bool,
}

/// A scene graph plus its raster cache and compositing state.
///
/// Cloning shares the scene until the first write through either copy.
pub struct VectorDrawable {
    state: Arc<VectorState>,
    cache: RasterCache,
    config: RasterConfig,
    color_filter: Option<ColorFilter>,
    allow_caching: bool,
    layout_direction: LayoutDirection,
}

impl Clone for VectorDrawable {
    /// The clone starts with an empty cache.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            cache: RasterCache::new(),
            config: self.config.clone(),
            color_filter: self.color_filter,
            allow_caching: self.allow_caching,
            layout_direction: self.layout_direction,
        }
    }
}

impl VectorDrawable {
    pub fn new(scene: SceneGraph) -> Self {
        Self::from_state(VectorState {
            scene,
            tint: None,
            tint_mode: TintMode::default(),
            auto_mirrored: false,
        })
    }

    pub fn from_state(state: VectorState) -> Self {
        Self {
            state: Arc::new(state),
            cache: RasterCache::new(),
            config: RasterConfig::default(),
            color_filter: None,
            allow_caching: true,
            layout_direction: LayoutDirection::Ltr,
        }
    }

    pub fn from_document(doc: &VectorDocument) -> Result<Self, VectorError> {
        let scene = inflate(doc)?;
        let tint = doc.tint.as_deref().map(parse_color).transpose()?;
        Ok(Self::from_state(VectorState {
            scene,
            tint,
            tint_mode: doc.tint_mode,
            auto_mirrored: doc.auto_mirrored,
        }))
    }

    pub fn from_json(text: &str) -> Result<Self, VectorError> {
        Self::from_document(&VectorDocument::from_json(text)?)
    }

    pub fn with_config(mut self, config: RasterConfig) -> Self {
        self.config = config;
        self.cache.mark_dirty();
        self
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    pub fn intrinsic_size(&self) -> (f32, f32) {
        self.state.scene.intrinsic_size()
    }

    pub fn intrinsic_width(&self) -> f32 {
        self.intrinsic_size().0
    }

    pub fn intrinsic_height(&self) -> f32 {
        self.intrinsic_size().1
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.state.scene
    }

    /// Detaches this drawable from any clones sharing its state.
    pub fn mutate(&mut self) -> &mut Self {
        Arc::make_mut(&mut self.state);
        self
    }

    fn state_mut(&mut self) -> &mut VectorState {
        self.cache.mark_dirty();
        Arc::make_mut(&mut self.state)
    }

    /// Mutable scene access. Marks the cache dirty.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.state_mut().scene
    }

    pub fn resolve_target(&self, name: &str) -> Option<Target> {
        self.state.scene.resolve(name)
    }

    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut Group> {
        self.scene_mut().group_mut(id)
    }

    pub fn path_mut(&mut self, id: NodeId) -> Option<&mut FullPath> {
        self.scene_mut().path_mut(id)
    }

    pub fn clip_path_mut(&mut self, id: NodeId) -> Option<&mut ClipPath> {
        self.scene_mut().clip_path_mut(id)
    }

    pub fn alpha(&self) -> u8 {
        self.state.scene.root_alpha()
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        if self.alpha() != alpha {
            self.scene_mut().set_root_alpha(alpha);
        }
    }

    pub fn tint(&self) -> Option<u32> {
        self.state.tint
    }

    pub fn set_tint(&mut self, tint: Option<u32>) {
        if self.state.tint != tint {
            self.state_mut().tint = tint;
        }
    }

    pub fn tint_mode(&self) -> TintMode {
        self.state.tint_mode
    }

    pub fn set_tint_mode(&mut self, mode: TintMode) {
        if self.state.tint_mode != mode {
            self.state_mut().tint_mode = mode;
        }
    }

    pub fn is_auto_mirrored(&self) -> bool {
        self.state.auto_mirrored
    }

    pub fn set_auto_mirrored(&mut self, mirrored: bool) {
        if self.state.auto_mirrored != mirrored {
            self.state_mut().auto_mirrored = mirrored;
        }
    }

    /// An explicit filter replaces the tint filter while set.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.color_filter = filter;
    }

    pub fn set_allow_caching(&mut self, allow: bool) {
        self.allow_caching = allow;
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.layout_direction = direction;
    }

    pub fn cache(&self) -> &RasterCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn cache_key(&self) -> CacheKey {
        CacheKey {
            tint: self.state.tint,
            tint_mode: self.state.tint_mode,
            auto_mirrored: self.state.auto_mirrored,
            root_alpha: self.state.scene.root_alpha(),
        }
    }

    fn needs_mirroring(&self) -> bool {
        self.state.auto_mirrored && self.layout_direction == LayoutDirection::Rtl
    }

    /// Bitmap size for `bounds` under `transform`: bounds scaled by the absolute canvas
    /// scale (1 when the transform skews), truncated, then clamped to the configured maximum.
    pub fn raster_size(&self, bounds: Bounds, transform: Transform) -> (i64, i64) {
        let (mut scale_x, mut scale_y) = (transform.sx.abs(), transform.sy.abs());
        if transform.kx != 0.0 || transform.ky != 0.0 {
            scale_x = 1.0;
            scale_y = 1.0;
        }
        let cap = self.config.max_cached_bitmap_size as i64;
        let width = ((bounds.width * scale_x) as i64).min(cap);
        let height = ((bounds.height * scale_y) as i64).min(cap);
        (width, height)
    }

    /// Renders (or reuses) the cached bitmap and composites it into `bounds` of `target`.
    #[instrument(level = "trace", skip(self, target), fields(width = bounds.width, height = bounds.height))]
    pub fn draw(&mut self, target: &mut PixmapMut, bounds: Bounds, transform: Transform) {
        if !(bounds.width > 0.0) || !(bounds.height > 0.0) {
            return;
        }
        let (width, height) = self.raster_size(bounds, transform);
        if width <= 0 || height <= 0 {
            debug!(width, height, "Skipping draw with empty raster size");
            return;
        }
        let (width, height) = (width as u32, height as u32);

        let key = self.cache_key();
        let filter = self
            .color_filter
            .or_else(|| ColorFilter::tint(self.state.tint, self.state.tint_mode));
        let root_alpha = self.state.scene.root_alpha();
        let mirror = self.needs_mirroring();

        let Some(bitmap) = self.cache.prepare(
            &self.state.scene,
            width,
            height,
            key,
            self.allow_caching,
            self.config.anti_alias,
        ) else {
            return;
        };

        // Bitmap pixels map onto the bounds, which the canvas transform maps onto the device.
        let mut blit = transform.pre_translate(bounds.x, bounds.y);
        if mirror {
            blit = blit.pre_translate(bounds.width, 0.0).pre_scale(-1.0, 1.0);
        }
        blit = blit.pre_scale(bounds.width / width as f32, bounds.height / height as f32);

        // Opaque and translucent blits sample the same way; only the opacity differs.
        let paint = PixmapPaint {
            opacity: root_alpha as f32 / 255.0,
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };

        match filter {
            Some(filter) => {
                let mut filtered = bitmap.clone();
                filter.apply(&mut filtered);
                target.draw_pixmap(0, 0, filtered.as_ref(), &paint, blit, None);
            }
            None => target.draw_pixmap(0, 0, bitmap.as_ref(), &paint, blit, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vector_core::SceneNode;

    const ICON: &str = r##"{ "name": "icon", "width": 24, "height": 24,
        "viewportWidth": 24, "viewportHeight": 24,
        "children": [ { "type": "path", "name": "body", "pathData": "M0 0 H24 V24 H0 Z",
                        "fillColor": "#FF000000" } ] }"##;

    #[test]
    fn test_raster_size() {
        let drawable = VectorDrawable::from_json(ICON).unwrap();
        let bounds = Bounds::from_size(24.0, 24.0);
        assert_eq!(drawable.raster_size(bounds, Transform::identity()), (24, 24));
        assert_eq!(drawable.raster_size(bounds, Transform::from_scale(-2.0, 1.5)), (48, 36));
        // Skew falls back to unit scale.
        assert_eq!(
            drawable.raster_size(bounds, Transform::from_row(3.0, 0.5, 0.0, 3.0, 0.0, 0.0)),
            (24, 24)
        );
        assert_eq!(
            drawable.raster_size(Bounds::from_size(5000.0, 10.0), Transform::identity()),
            (2048, 10)
        );
        assert_eq!(drawable.raster_size(Bounds::from_size(0.5, 10.0), Transform::identity()).0, 0);
    }

    #[test]
    fn test_clone_shares_until_write() {
        let original = VectorDrawable::from_json(ICON).unwrap();
        let mut copy = original.clone();
        assert!(Arc::ptr_eq(&original.state, &copy.state));

        let Some(Target::Node(body)) = copy.resolve_target("body") else {
            panic!("body should resolve");
        };
        if let Some(path) = copy.path_mut(body) {
            path.fill_color = 0xFFFF0000;
        }
        assert!(!Arc::ptr_eq(&original.state, &copy.state));
        let fill = |d: &VectorDrawable| d.scene().node(body).and_then(SceneNode::as_path).map(|p| p.fill_color);
        assert_eq!(fill(&original), Some(0xFF000000));
        assert_eq!(fill(&copy), Some(0xFFFF0000));
    }

    #[test]
    fn test_mutate_detaches_before_writes() {
        let original = VectorDrawable::from_json(ICON).unwrap();
        let mut copy = original.clone();
        assert!(Arc::ptr_eq(&original.state, &copy.state));

        copy.mutate();
        assert!(!Arc::ptr_eq(&original.state, &copy.state));
        assert_eq!(Arc::strong_count(&original.state), 1);

        // Writes after the detach stay on the copy.
        let Some(Target::Node(body)) = copy.resolve_target("body") else {
            panic!("body should resolve");
        };
        if let Some(path) = copy.mutate().path_mut(body) {
            path.fill_alpha = 0.5;
        }
        assert!(copy.group_mut(body).is_none());
        let fill_alpha = |d: &VectorDrawable| d.scene().node(body).and_then(SceneNode::as_path).map(|p| p.fill_alpha);
        assert_eq!(fill_alpha(&original), Some(1.0));
        assert_eq!(fill_alpha(&copy), Some(0.5));

        // A detached drawable mutates in place.
        let before = Arc::as_ptr(&copy.state);
        copy.mutate();
        assert_eq!(Arc::as_ptr(&copy.state), before);
    }

    #[test]
    fn test_writes_mark_cache_dirty() {
        let mut drawable = VectorDrawable::from_json(ICON).unwrap();
        let mut pixmap = tiny_skia::Pixmap::new(24, 24).unwrap();
        drawable.draw(&mut pixmap.as_mut(), Bounds::from_size(24.0, 24.0), Transform::identity());
        assert!(!drawable.cache().is_dirty());

        drawable.set_tint(Some(0xFFFF0000));
        assert!(drawable.cache().is_dirty());
    }
}
