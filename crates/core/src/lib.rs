#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod math;
pub mod scene;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use scene::{SceneError, SceneGraph, Transform};

/// Stable identifier for anything that lives in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic frame counter (one per controller tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame of any run.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

bitflags! {
    /// Layer filter used by raycasts. A collider is hit only when its layers
    /// intersect the query mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// Default layer for scene props.
        const DEFAULT = 1 << 0;
        /// Objects the pointer may interact with.
        const INTERACTABLE = 1 << 1;
        /// Hand menu and other UI surfaces.
        const UI = 1 << 2;
        /// Static environment geometry.
        const ENVIRONMENT = 1 << 3;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::DEFAULT
    }
}
