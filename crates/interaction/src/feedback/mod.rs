//! Visual feedback for the pointer ray.

mod curve;
mod fade;
mod ray_visual;

pub use curve::EasingCurve;
pub use fade::AlphaFader;
pub use ray_visual::{FeedbackSettings, RayVisual, SegmentTarget};
