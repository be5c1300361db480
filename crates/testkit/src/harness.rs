//! Frame-by-frame interaction harness.

use anyhow::{Context, Result};
use glam::Vec3;
use handray_core::{EntityId, Transform};
use handray_input::{FrameInput, HandFrame, TrackedPose};
use handray_interaction::{
    Controller, FeedbackSettings, Interactable, RaycasterSettings, Scene, TickReport,
};
use handray_physics::CollisionWorld;

/// Scene, collision world and controller stepped together.
pub struct InteractionHarness {
    /// Objects under test.
    pub scene: Scene,
    /// Query service rebuilt from the scene before every step.
    pub world: CollisionWorld,
    /// Controller under test.
    pub controller: Controller,
}

impl Default for InteractionHarness {
    fn default() -> Self {
        Self::new(RaycasterSettings::default(), FeedbackSettings::default())
    }
}

impl InteractionHarness {
    /// Empty scene with a fresh controller.
    pub fn new(raycaster: RaycasterSettings, feedback: FeedbackSettings) -> Self {
        Self {
            scene: Scene::new(),
            world: CollisionWorld::new(),
            controller: Controller::new(raycaster, feedback),
        }
    }

    /// Spawn an object at `position` under the world root.
    pub fn spawn(
        &mut self,
        name: &str,
        position: Vec3,
        interactable: Interactable,
    ) -> Result<EntityId> {
        self.scene
            .spawn(name, Transform::from_translation(position), interactable)
            .with_context(|| format!("spawning {name}"))
    }

    /// Sync colliders and tick the controller once.
    pub fn step(&mut self, input: &FrameInput) -> TickReport {
        self.scene.sync_colliders(&mut self.world);
        self.controller.tick(input, &self.world, &mut self.scene)
    }

    /// Step `count` times with the same input, returning every report.
    pub fn repeat(&mut self, input: &FrameInput, count: usize) -> Vec<TickReport> {
        (0..count).map(|_| self.step(input)).collect()
    }

    /// Whether `entity` is hovered and whether it is selected.
    pub fn flags(&self, entity: EntityId) -> Option<(bool, bool)> {
        let selectable = self.scene.selectable(entity)?;
        Some((selectable.is_hovered(), selectable.is_selected()))
    }
}

/// Input with the head at the ray origin.
pub fn frame(origin: Vec3, forward: Vec3, hand: Vec3, pinching: bool, dt: f32) -> FrameInput {
    let ray_origin = TrackedPose::new(origin, forward);
    FrameInput {
        dt,
        head: origin,
        ray_origin,
        hand: HandFrame {
            position: hand,
            forward: ray_origin.forward,
            pinching,
            pointing: false,
        },
        gesture: None,
    }
}
