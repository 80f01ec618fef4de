// vector-raster: tiny-skia backend with a cached backing bitmap
pub mod animated;
pub mod cache;
pub mod canvas;
pub mod config;
pub mod drawable;
pub mod filter;

pub use animated::AnimatedVectorDrawable;
pub use cache::{CacheKey, CacheStats, RasterCache};
pub use canvas::PixmapCanvas;
pub use config::RasterConfig;
pub use drawable::{Bounds, LayoutDirection, VectorDrawable, VectorState};
pub use filter::ColorFilter;

pub use tiny_skia;
