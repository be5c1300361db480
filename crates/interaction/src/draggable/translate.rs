//! Pull/push/orbit translation.
//!
//! The held object is reparented under a temporary pivot placed at the grab
//! point. Every frame:
//!
//! 1. The planar hand-to-head distance is compared with its value at grab
//!    time. Pulling the hand in past `pull_trigger_distance` shrinks the
//!    desired radius, pushing it out past `push_trigger_distance` grows it.
//!    Inside the dead zone the radius is left alone.
//! 2. The pivot re-targets the point on the circle of that radius around the
//!    ray origin, along the ray's ground-projected forward, at the height
//!    locked at grab time. Turning the head orbits the object.
//! 3. The pivot approaches the target at no more than `approach_speed`.

use super::{DragContext, Draggable};
use glam::Vec3;
use handray_core::math::{ground_project_or, move_towards, planar_distance, with_height};
use handray_core::{EntityId, SceneError, SceneGraph, Transform};
use handray_physics::{RaycastHit, Ray};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Tuning for [`TranslateDraggable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateSettings {
    /// Hand must move this much closer (metres) before pulling starts.
    pub pull_trigger_distance: f32,
    /// Hand must move this much farther (metres) before pushing starts.
    pub push_trigger_distance: f32,
    /// Smallest planar radius the object can be pulled to.
    pub min_pull_distance: f32,
    /// Largest planar radius the object can be pushed to.
    pub max_push_distance: f32,
    /// Linear part of the per-frame radius step (metres/second).
    pub move_speed: f32,
    /// Quadratic part of the per-frame radius step (metres/second²).
    pub acceleration: f32,
    /// Maximum pivot speed toward its target (metres/second).
    pub approach_speed: f32,
}

impl Default for TranslateSettings {
    fn default() -> Self {
        Self {
            pull_trigger_distance: 0.1,
            push_trigger_distance: 0.1,
            min_pull_distance: 0.5,
            max_push_distance: 5.0,
            move_speed: 1.0,
            acceleration: 0.5,
            approach_speed: 10.0,
        }
    }
}

impl TranslateSettings {
    /// Radius change applied on a pull or push frame.
    pub fn step(&self, dt: f32) -> f32 {
        self.move_speed * dt + self.acceleration * dt * dt
    }
}

/// State of one translate grab, alive from drag start to drag end.
#[derive(Debug, Clone, PartialEq)]
pub struct GrabSession {
    /// Temporary parent of the held object.
    pub pivot: EntityId,
    /// Parent to restore on release.
    pub original_parent: Option<EntityId>,
    /// Height of the grab point, kept for the whole grab.
    pub locked_height: f32,
    /// Planar radius the pivot is steered to.
    pub desired_distance: f32,
    /// Planar head-to-hand distance at grab time.
    pub initial_hand_distance: f32,
    /// Last usable ground-projected forward.
    pub flat_direction: Vec3,
}

/// Pull/push/orbit drag strategy.
#[derive(Debug, Clone, Default)]
pub struct TranslateDraggable {
    settings: TranslateSettings,
    session: Option<GrabSession>,
}

impl TranslateDraggable {
    /// Create with the given tuning.
    pub fn new(settings: TranslateSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    /// Tuning in use.
    pub fn settings(&self) -> &TranslateSettings {
        &self.settings
    }

    /// Active grab, if any.
    pub fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }

    /// Desired planar radius of the active grab.
    pub fn desired_distance(&self) -> Option<f32> {
        self.session.as_ref().map(|s| s.desired_distance)
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.settings.min_pull_distance, self.settings.max_push_distance)
    }

    fn begin(&self, ctx: &mut DragContext<'_>, hit: &RaycastHit) -> Result<GrabSession, SceneError> {
        let anchor = hit.point;
        let origin = ctx.ray_origin.position;
        let offset = anchor - origin;

        let flat_direction = ground_project_or(offset, ctx.ray_origin.forward);
        // Far grabs start at the push limit, so the radius never exceeds it.
        let desired_distance = self.clamp_distance(planar_distance(origin, anchor));
        let initial_hand_distance = planar_distance(ctx.head, ctx.hand);

        let name = format!("{}_grab_point", ctx.graph.name(ctx.target)?);
        let pivot = ctx.graph.spawn_root(name, Transform::from_translation(anchor));
        let original_parent = ctx.graph.parent(ctx.target)?;
        ctx.graph.set_parent(ctx.target, Some(pivot))?;

        Ok(GrabSession {
            pivot,
            original_parent,
            locked_height: anchor.y,
            desired_distance,
            initial_hand_distance,
            flat_direction,
        })
    }

    fn release(
        graph: &mut SceneGraph,
        target: EntityId,
        session: &GrabSession,
    ) -> Result<(), SceneError> {
        // The original parent may have been removed while we held the object.
        let parent = session.original_parent.filter(|p| graph.contains(*p));
        if graph.contains(target) {
            graph.set_parent(target, parent)?;
        }
        if graph.contains(session.pivot) {
            graph.despawn(session.pivot)?;
        }
        Ok(())
    }
}

impl Draggable for TranslateDraggable {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn on_drag_start(&mut self, ctx: &mut DragContext<'_>, _ray: &Ray, hit: &RaycastHit) {
        if let Some(stale) = self.session.take() {
            if let Err(err) = Self::release(ctx.graph, ctx.target, &stale) {
                warn!(%err, "failed to release stale grab session");
            }
        }

        match self.begin(ctx, hit) {
            Ok(session) => {
                debug!(
                    target_entity = %ctx.target,
                    pivot = %session.pivot,
                    radius = session.desired_distance,
                    "translate drag started"
                );
                self.session = Some(session);
            }
            Err(err) => warn!(%err, target_entity = %ctx.target, "translate drag could not start"),
        }
    }

    fn on_drag(&mut self, ctx: &mut DragContext<'_>, _ray: &Ray) {
        let settings = self.settings;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let hand_distance = planar_distance(ctx.head, ctx.hand);
        let delta = session.initial_hand_distance - hand_distance;
        let step = settings.step(ctx.dt);

        if delta > settings.pull_trigger_distance {
            session.desired_distance =
                (session.desired_distance - step).max(settings.min_pull_distance);
        } else if delta < -settings.push_trigger_distance {
            session.desired_distance =
                (session.desired_distance + step).min(settings.max_push_distance);
        }

        if let Some(forward) = ctx.ray_origin.flat_forward() {
            session.flat_direction = forward;
        }
        let orbit = ctx.ray_origin.position + session.flat_direction * session.desired_distance;
        let target = with_height(orbit, session.locked_height);

        let moved = ctx.graph.world_position(session.pivot).and_then(|current| {
            let next = move_towards(current, target, settings.approach_speed * ctx.dt);
            ctx.graph.set_world_position(session.pivot, next)?;
            Ok(next)
        });

        match moved {
            Ok(pivot) => trace!(
                delta,
                radius = session.desired_distance,
                pivot_x = pivot.x,
                pivot_z = pivot.z,
                "translate drag"
            ),
            Err(err) => warn!(%err, "grab pivot lost during drag"),
        }
    }

    fn on_drag_end(&mut self, ctx: &mut DragContext<'_>) {
        let Some(session) = self.session.take() else {
            return;
        };
        match Self::release(ctx.graph, ctx.target, &session) {
            Ok(()) => debug!(target_entity = %ctx.target, "translate drag ended"),
            Err(err) => warn!(%err, target_entity = %ctx.target, "failed to restore parent after drag"),
        }
    }

    fn anchor_position(&self, graph: &SceneGraph) -> Option<Vec3> {
        let session = self.session.as_ref()?;
        graph.world_position(session.pivot).ok()
    }
}
