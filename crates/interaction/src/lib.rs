#![warn(missing_docs)]
//! Hand-tracked ray pointer interaction.
//!
//! A ray cast from a tracked anchor hovers, selects and manipulates objects
//! in a [`Scene`]. Objects opt in through capabilities:
//!
//! - **Selectable**: hover/select state with notification listeners
//! - **Draggable**: translate (pull/push/orbit) or rotate (lateral swipe)
//! - **Highlight**: colour feedback driven by selectable notifications
//!
//! # Example
//!
//! ```rust,no_run
//! use handray_interaction::{Controller, Interactable, Scene};
//! use handray_physics::{Collider, CollisionWorld};
//! use handray_core::{LayerMask, Transform};
//! use handray_input::FrameInput;
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! let collider = Collider::sphere(0.5, LayerMask::INTERACTABLE).unwrap();
//! scene
//!     .spawn(
//!         "ball",
//!         Transform::from_translation(Vec3::new(0.0, 1.0, 3.0)),
//!         Interactable::selectable(collider),
//!     )
//!     .unwrap();
//!
//! let mut world = CollisionWorld::new();
//! let mut controller = Controller::new(Default::default(), Default::default());
//!
//! // Once per frame:
//! scene.sync_colliders(&mut world);
//! let report = controller.tick(&FrameInput::default(), &world, &mut scene);
//! ```

pub mod controller;
pub mod draggable;
pub mod feedback;
pub mod highlight;
pub mod locomotion;
pub mod menu;
pub mod scene;
pub mod selectable;

pub use controller::{Controller, InteractionState, RaycasterSettings, TickReport};
pub use draggable::{
    DragContext, DragKind, Draggable, RotateDraggable, RotateSettings, TranslateDraggable,
    TranslateSettings,
};
pub use feedback::{EasingCurve, FeedbackSettings, RayVisual};
pub use highlight::{Highlight, HighlightColors};
pub use locomotion::{LocomotionSettings, PointLocomotion};
pub use menu::{HandMenu, MenuSettings};
pub use scene::{Interactable, Scene};
pub use selectable::{Selectable, SelectableEvent};

/// Version of the interaction crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the crate version once at startup.
pub fn init() {
    tracing::info!("Initializing handray-interaction v{}", VERSION);
}
