//! # Vector Compat
//!
//! Renders vector drawable resources: a compact SVG-style path grammar, a retained scene
//! graph of groups, paths and clip paths, and a cached tiny-skia rasterizer. Animated
//! vectors drive named nodes of the scene through property animators.
//!
//! The work is split across three crates, re-exported here:
//! * [`data`]: path-data grammar, color literals and the JSON document model.
//! * [`graph`]: geometry, scene graph, traversal, trimming and animation targets.
//! * [`raster`]: the tiny-skia canvas, bitmap cache and drawables.

pub use vector_core as graph;
pub use vector_data as data;
pub use vector_raster as raster;

pub use vector_core::{SceneGraph, Target, VectorError};
pub use vector_raster::{AnimatedVectorDrawable, Bounds, RasterConfig, VectorDrawable};

use anyhow::{Context, Result};
use tracing::debug;

/// Source of resource bytes.
pub trait ResourceLoader: Send + Sync {
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>>;
}

/// Reads resources straight from the file system.
pub struct FileLoader;

impl ResourceLoader for FileLoader {
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }
}

fn load_text(loader: &dyn ResourceLoader, path: &str) -> Result<String> {
    let bytes = loader
        .load_bytes(path)
        .with_context(|| format!("Failed to read vector resource {path}"))?;
    String::from_utf8(bytes).with_context(|| format!("Vector resource {path} is not UTF-8"))
}

/// Loads and inflates a vector drawable resource.
pub fn load_vector(loader: &dyn ResourceLoader, path: &str) -> Result<VectorDrawable> {
    let text = load_text(loader, path)?;
    let drawable = VectorDrawable::from_json(&text)
        .with_context(|| format!("Failed to inflate vector {path}"))?;
    debug!(path, size = ?drawable.intrinsic_size(), "Loaded vector");
    Ok(drawable)
}

/// Loads an animated vector. Every animation target must exist in its drawable.
pub fn load_animated_vector(
    loader: &dyn ResourceLoader,
    path: &str,
) -> Result<AnimatedVectorDrawable> {
    let text = load_text(loader, path)?;
    let avd = AnimatedVectorDrawable::from_json(&text)
        .with_context(|| format!("Failed to inflate animated vector {path}"))?;
    debug!(path, targets = avd.animations().len(), "Loaded animated vector");
    Ok(avd)
}
