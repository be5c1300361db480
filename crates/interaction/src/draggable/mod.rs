//! Drag capabilities.
//!
//! An interactable may expose one [`Draggable`] strategy. The controller
//! drives it through `on_drag_start` → `on_drag` (every frame while grabbing)
//! → `on_drag_end`, injecting a fresh [`DragContext`] on every call.
//!
//! Both strategies turn noisy hand tracking into stable motion the same way:
//! a dead zone on the input and a rate-limited approach on the output.

mod rotate;
mod translate;

pub use rotate::{RotateDraggable, RotateSettings};
pub use translate::{GrabSession, TranslateDraggable, TranslateSettings};

use glam::Vec3;
use handray_core::{EntityId, SceneGraph};
use handray_input::TrackedPose;
use handray_physics::{RaycastHit, Ray};

/// Live state handed to a draggable for one call.
pub struct DragContext<'a> {
    /// Scene the grabbed entity lives in.
    pub graph: &'a mut SceneGraph,
    /// Entity being dragged.
    pub target: EntityId,
    /// Anchor the pointer ray is cast from.
    pub ray_origin: TrackedPose,
    /// Head (camera) position.
    pub head: Vec3,
    /// Hand position.
    pub hand: Vec3,
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// Per-object manipulation strategy.
pub trait Draggable {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Grab started on `hit`.
    fn on_drag_start(&mut self, ctx: &mut DragContext<'_>, ray: &Ray, hit: &RaycastHit);

    /// One frame of dragging.
    fn on_drag(&mut self, ctx: &mut DragContext<'_>, ray: &Ray);

    /// Grab released.
    fn on_drag_end(&mut self, ctx: &mut DragContext<'_>);

    /// Current world position of the held point, if the strategy tracks one.
    fn anchor_position(&self, _graph: &SceneGraph) -> Option<Vec3> {
        None
    }
}

/// Which strategy an object uses, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// Selection only.
    #[default]
    None,
    /// Pull/push/orbit.
    Translate,
    /// Lateral-swipe spin.
    Rotate,
}

impl DragKind {
    /// Build the strategy for this kind.
    pub fn build(
        self,
        translate: TranslateSettings,
        rotate: RotateSettings,
    ) -> Option<Box<dyn Draggable>> {
        match self {
            DragKind::None => None,
            DragKind::Translate => Some(Box::new(TranslateDraggable::new(translate))),
            DragKind::Rotate => Some(Box::new(RotateDraggable::new(rotate))),
        }
    }
}
