//! Point-to-move locomotion.
//!
//! The user never moves; the world root slides the opposite way instead.

use glam::Vec3;
use handray_core::math::ground_project;
use handray_core::{EntityId, SceneError, SceneGraph};
use handray_input::HandFrame;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tuning for [`PointLocomotion`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Metres per second while pointing.
    pub move_speed: f32,
    /// Master switch.
    pub enabled: bool,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            enabled: true,
        }
    }
}

/// Moves the world root while the hand points.
#[derive(Debug, Clone, Default)]
pub struct PointLocomotion {
    settings: LocomotionSettings,
}

impl PointLocomotion {
    /// Create with the given tuning.
    pub fn new(settings: LocomotionSettings) -> Self {
        Self { settings }
    }

    /// Tuning in use.
    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    /// Displacement applied to the world root this frame, given the hand.
    pub fn displacement(&self, hand: &HandFrame, menu_visible: bool, dt: f32) -> Option<Vec3> {
        if !self.settings.enabled || !hand.pointing || menu_visible {
            return None;
        }
        let direction = ground_project(-hand.forward)?;
        Some(direction * self.settings.move_speed * dt)
    }

    /// Move `root` for one frame. Returns the applied displacement.
    pub fn advance(
        &self,
        hand: &HandFrame,
        menu_visible: bool,
        dt: f32,
        graph: &mut SceneGraph,
        root: EntityId,
    ) -> Result<Option<Vec3>, SceneError> {
        let Some(delta) = self.displacement(hand, menu_visible, dt) else {
            return Ok(None);
        };
        let position = graph.world_position(root)?;
        graph.set_world_position(root, position + delta)?;
        trace!(dx = delta.x, dz = delta.z, "world root moved");
        Ok(Some(delta))
    }
}
