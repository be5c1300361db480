//! Lateral-swipe spin around the object's vertical axis.

use super::{DragContext, Draggable};
use glam::{Quat, Vec3};
use handray_core::math::{ground_project, ground_project_or};
use handray_physics::{RaycastHit, Ray};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tuning for [`RotateDraggable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateSettings {
    /// Spin rate once past the buffer.
    pub spin_speed_degrees: f32,
    /// Lateral offset change (unit-direction dot product, 0..2) ignored as
    /// noise.
    pub buffer_distance: f32,
}

impl Default for RotateSettings {
    fn default() -> Self {
        Self {
            spin_speed_degrees: 90.0,
            buffer_distance: 0.2,
        }
    }
}

/// Spins the grabbed object while the hand is held off to one side of where
/// it was at grab time.
#[derive(Debug, Clone, Default)]
pub struct RotateDraggable {
    settings: RotateSettings,
    right: Vec3,
    initial_lateral: f32,
    last_spin: f32,
}

impl RotateDraggable {
    /// Create with the given tuning.
    pub fn new(settings: RotateSettings) -> Self {
        Self {
            settings,
            right: Vec3::NEG_X,
            initial_lateral: 0.0,
            last_spin: 0.0,
        }
    }

    /// Angle in radians applied on the most recent drag frame.
    pub fn last_spin(&self) -> f32 {
        self.last_spin
    }

    /// Hand offset along the grab-time right axis, from the ground-projected
    /// origin-to-hand direction.
    fn lateral(&self, ctx: &DragContext<'_>) -> Option<f32> {
        ground_project(ctx.hand - ctx.ray_origin.position).map(|dir| dir.dot(self.right))
    }
}

impl Draggable for RotateDraggable {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn on_drag_start(&mut self, ctx: &mut DragContext<'_>, ray: &Ray, _hit: &RaycastHit) {
        let forward = ground_project_or(ray.direction, ctx.ray_origin.forward);
        self.right = forward.cross(Vec3::Y);
        self.initial_lateral = self.lateral(ctx).unwrap_or(0.0);
        self.last_spin = 0.0;
        debug!(
            target_entity = %ctx.target,
            lateral = self.initial_lateral,
            "rotate drag started"
        );
    }

    fn on_drag(&mut self, ctx: &mut DragContext<'_>, _ray: &Ray) {
        self.last_spin = 0.0;
        let Some(current) = self.lateral(ctx) else {
            return;
        };
        let delta = current - self.initial_lateral;
        if delta.abs() <= self.settings.buffer_distance {
            return;
        }

        let angle = self.settings.spin_speed_degrees.to_radians() * delta.signum() * ctx.dt;
        let spun = ctx.graph.world(ctx.target).and_then(|mut world| {
            world.rotation = (Quat::from_rotation_y(angle) * world.rotation).normalize();
            ctx.graph.set_world(ctx.target, world)
        });
        match spun {
            Ok(()) => self.last_spin = angle,
            Err(err) => warn!(%err, "rotate target lost during drag"),
        }
    }

    fn on_drag_end(&mut self, _ctx: &mut DragContext<'_>) {
        self.last_spin = 0.0;
    }
}
