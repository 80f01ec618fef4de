use crate::canvas::PixmapCanvas;
use tiny_skia::{Color, Pixmap};
use tracing::debug;
use vector_core::data::model::TintMode;
use vector_core::{SceneGraph, SceneRenderer};

/// Drawable state that a cached bitmap depends on besides the scene itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheKey {
    pub tint: Option<u32>,
    pub tint_mode: TintMode,
    pub auto_mirrored: bool,
    pub root_alpha: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Scene traversals into the backing bitmap.
    pub renders: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Backing bitmap for a drawable plus the state it was rendered with.
#[derive(Default)]
pub struct RasterCache {
    pixmap: Option<Pixmap>,
    snapshot: Option<CacheKey>,
    dirty: bool,
    stats: CacheStats,
}

impl RasterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.pixmap.as_ref().map(|p| (p.width(), p.height()))
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Reallocates the bitmap when the size changes. A fresh bitmap is always dirty.
    fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if self.size() == Some((width, height)) {
            return true;
        }
        self.pixmap = Pixmap::new(width, height);
        self.dirty = true;
        if self.pixmap.is_none() {
            debug!(width, height, "Failed to allocate cache bitmap");
        }
        self.pixmap.is_some()
    }

    fn can_reuse(&self, key: &CacheKey) -> bool {
        !self.dirty && self.snapshot.as_ref() == Some(key)
    }

    /// Returns a bitmap holding the scene rendered at `width` x `height`, re-rendering only
    /// when needed. With `allow_caching` off the scene is always re-rendered.
    pub fn prepare(
        &mut self,
        scene: &SceneGraph,
        width: u32,
        height: u32,
        key: CacheKey,
        allow_caching: bool,
        anti_alias: bool,
    ) -> Option<&Pixmap> {
        if !self.ensure_size(width, height) {
            return None;
        }

        if allow_caching && self.can_reuse(&key) {
            self.stats.hits += 1;
        } else {
            if allow_caching {
                self.stats.misses += 1;
                debug!(width, height, dirty = self.dirty, "Raster cache miss");
            }
            self.render(scene, anti_alias);
            if allow_caching {
                self.snapshot = Some(key);
                self.dirty = false;
            }
        }
        self.pixmap.as_ref()
    }

    fn render(&mut self, scene: &SceneGraph, anti_alias: bool) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        pixmap.fill(Color::TRANSPARENT);
        let (width, height) = (pixmap.width(), pixmap.height());
        let mut canvas = PixmapCanvas::new(pixmap.as_mut(), anti_alias);
        SceneRenderer::draw(&mut canvas, scene, width, height);
        self.stats.renders += 1;
    }
}
