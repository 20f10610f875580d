//! Neumorph engine crate.
//!
//! CPU rendering of neumorphic ("soft UI") shapes: rounded or oval outlines
//! with raised, pressed or basin shadows, painted onto `tiny_skia::Pixmap`s.
//!
//! Entry points:
//! - [`drawable::ShapeDrawable`]: state, invalidation and the paint pipeline
//! - [`cache::RenderCache`] / [`cache::DrawableFactory`]: reuse across drawables
//! - [`shape::compute_outline`]: geometry shared by paint and hit/clip queries

pub mod blur;
pub mod cache;
pub mod coords;
pub mod drawable;
pub mod image;
pub mod logging;
pub mod paint;
pub mod shadow;
pub mod shape;

pub use cache::{CacheConfig, DrawableFactory, RenderCache, ReusableParams};
pub use drawable::{ConstantState, ShapeDrawable};
pub use shadow::ShapeVariant;
pub use shape::{CornerFamily, ShapeAppearance};
