pub mod animatable;
pub mod errors;
pub mod geometry;
pub mod inflate;
pub mod node;
pub mod renderer;
pub mod scene;
pub mod trim;

pub use animatable::{apply_property, Easing, Property, PropertyAnimator, PropertyValue, TargetAnimation};
pub use errors::VectorError;
pub use geometry::build_path;
pub use inflate::{inflate, inflate_animated, inflate_json};
pub use node::{ClipPath, Color, FillRule, FullPath, Group, LineCap, LineJoin, PathGeometry, SceneNode};
pub use renderer::{matrix_scale, Canvas, SceneRenderer, StrokeStyle};
pub use scene::{NodeId, SceneBuilder, SceneGraph, Target};

pub use vector_data as data;
