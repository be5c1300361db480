//! Ray pointer state machine.
//!
//! ```text
//!            hit selectable                 pinch held >= hold time
//!   Idle ───────────────────▶ Hovering ──────────────────────────▶ Grabbing
//!    ▲ ◀──────────────────────── │                                    │
//!    │   miss / other target                                          │
//!    └──────────────── pinch released (re-hover if still aimed) ◀─────┘
//! ```
//!
//! One [`Controller::tick`] per rendered frame. At most one transition
//! happens per tick.

use crate::draggable::{DragContext, Draggable};
use crate::feedback::{FeedbackSettings, RayVisual, SegmentTarget};
use crate::scene::Scene;
use crate::selectable::SelectableEvent;
use glam::Vec3;
use handray_core::{EntityId, FrameTick, LayerMask};
use handray_input::{FrameInput, PinchState};
use handray_physics::{Ray, RaycastHit, RaycastQuery, SpatialQuery};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Controller state. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// Ray is not on a selectable.
    #[default]
    Idle,
    /// Ray rests on a selectable.
    Hovering,
    /// A selectable is held by the pinch.
    Grabbing,
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InteractionState::Idle => "idle",
            InteractionState::Hovering => "hovering",
            InteractionState::Grabbing => "grabbing",
        };
        f.write_str(label)
    }
}

/// Raycast and pinch tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycasterSettings {
    /// Length of the cast ray (metres).
    pub max_distance: f32,
    /// Hits farther than this are ignored.
    pub max_hit_distance: f32,
    /// Raw [`LayerMask`] bits the ray can hit.
    pub layer_bits: u32,
    /// Seconds the pinch must be held before a grab starts.
    pub pinch_hold_time: f32,
}

impl Default for RaycasterSettings {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            max_hit_distance: 11.0,
            layer_bits: u32::MAX,
            pinch_hold_time: 0.1,
        }
    }
}

impl RaycasterSettings {
    /// Layer filter, unknown bits dropped.
    pub fn layers(&self) -> LayerMask {
        LayerMask::from_bits_truncate(self.layer_bits)
    }
}

/// What changed during one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Frame counter after this tick.
    pub tick: FrameTick,
    /// `(from, to)` if the state changed.
    pub transition: Option<(InteractionState, InteractionState)>,
    /// Selectable notifications fired, in order.
    pub events: Vec<(EntityId, SelectableEvent)>,
}

struct ActiveGrab {
    target: EntityId,
    anchor: Vec3,
    draggable: Option<Box<dyn Draggable>>,
}

/// Hand ray interaction controller.
pub struct Controller {
    settings: RaycasterSettings,
    state: InteractionState,
    pinch: PinchState,
    current: Option<EntityId>,
    grab: Option<ActiveGrab>,
    ray: Ray,
    hit: Option<RaycastHit>,
    visual: RayVisual,
    tick: FrameTick,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("current", &self.current)
            .field("grabbed", &self.grabbed())
            .field("pinch", &self.pinch)
            .field("tick", &self.tick)
            .finish()
    }
}

impl Controller {
    /// Idle controller.
    pub fn new(settings: RaycasterSettings, feedback: FeedbackSettings) -> Self {
        Self {
            settings,
            state: InteractionState::Idle,
            pinch: PinchState::new(),
            current: None,
            grab: None,
            ray: Ray::new(Vec3::ZERO, Vec3::Z),
            hit: None,
            visual: RayVisual::new(feedback),
            tick: FrameTick::ZERO,
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &RaycasterSettings {
        &self.settings
    }

    /// Current state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Hovered or grabbed entity.
    pub fn current_target(&self) -> Option<EntityId> {
        self.current
    }

    /// Entity held by the pinch.
    pub fn grabbed(&self) -> Option<EntityId> {
        self.grab.as_ref().map(|g| g.target)
    }

    /// Draggable of the held entity, while grabbing.
    pub fn active_draggable(&self) -> Option<&dyn Draggable> {
        self.grab.as_ref()?.draggable.as_deref()
    }

    /// World position of the held point while grabbing.
    pub fn grab_anchor(&self, scene: &Scene) -> Option<Vec3> {
        let grab = self.grab.as_ref()?;
        let tracked = grab
            .draggable
            .as_ref()
            .and_then(|d| d.anchor_position(scene.graph()));
        Some(tracked.unwrap_or(grab.anchor))
    }

    /// Pinch debounce state.
    pub fn pinch(&self) -> &PinchState {
        &self.pinch
    }

    /// Ray cast this frame.
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Accepted hit this frame.
    pub fn hit(&self) -> Option<&RaycastHit> {
        self.hit.as_ref()
    }

    /// Ray segment feedback.
    pub fn visual(&self) -> &RayVisual {
        &self.visual
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> FrameTick {
        self.tick
    }

    /// Run one frame.
    pub fn tick(
        &mut self,
        input: &FrameInput,
        query: &dyn SpatialQuery,
        scene: &mut Scene,
    ) -> TickReport {
        self.tick = self.tick.advance(1);
        self.ray = Ray::new(input.ray_origin.position, input.ray_origin.forward);
        self.hit = query
            .raycast(&RaycastQuery {
                ray: self.ray,
                max_distance: self.settings.max_distance,
                layers: self.settings.layers(),
            })
            .filter(|hit| hit.distance <= self.settings.max_hit_distance);
        self.pinch.update(input.hand.pinching, input.dt);
        if self.pinch.just_started() {
            trace!(tick = self.tick.0, "pinch started");
        } else if self.pinch.just_released() {
            trace!(tick = self.tick.0, "pinch released");
        }

        let mut events = Vec::new();
        let before = self.state;
        let aimed = self.hit.map(|h| h.entity).filter(|e| scene.is_selectable(*e));

        self.state = match self.state {
            InteractionState::Idle => self.on_idle(aimed, scene, &mut events),
            InteractionState::Hovering => self.on_hovering(aimed, input, scene, &mut events),
            InteractionState::Grabbing => self.on_grabbing(aimed, input, scene, &mut events),
        };

        let transition = (before != self.state).then_some((before, self.state));
        if let Some((from, to)) = transition {
            debug!(tick = self.tick.0, %from, %to, entity = ?self.current, "interaction state changed");
        }

        let segment = match self.state {
            InteractionState::Idle => SegmentTarget::Idle,
            InteractionState::Hovering => self
                .hit
                .map_or(SegmentTarget::Idle, |hit| SegmentTarget::Hover(hit.point)),
            InteractionState::Grabbing => self
                .grab_anchor(scene)
                .map_or(SegmentTarget::Idle, SegmentTarget::Grab),
        };
        self.visual.update(&self.ray, segment, input.dt);

        TickReport {
            tick: self.tick,
            transition,
            events,
        }
    }

    fn on_idle(
        &mut self,
        aimed: Option<EntityId>,
        scene: &mut Scene,
        events: &mut Vec<(EntityId, SelectableEvent)>,
    ) -> InteractionState {
        match aimed {
            Some(target) => {
                self.begin_hover(target, scene, events);
                InteractionState::Hovering
            }
            None => InteractionState::Idle,
        }
    }

    fn on_hovering(
        &mut self,
        aimed: Option<EntityId>,
        input: &FrameInput,
        scene: &mut Scene,
        events: &mut Vec<(EntityId, SelectableEvent)>,
    ) -> InteractionState {
        let Some(current) = self.current else {
            return InteractionState::Idle;
        };
        if aimed != Some(current) {
            record(events, current, scene.hover_exit(current));
            self.current = None;
            return InteractionState::Idle;
        }
        if !self.pinch.held_for(self.settings.pinch_hold_time) {
            return InteractionState::Hovering;
        }
        match self.hit {
            Some(hit) => {
                self.begin_grab(current, &hit, input, scene, events);
                InteractionState::Grabbing
            }
            None => InteractionState::Hovering,
        }
    }

    fn on_grabbing(
        &mut self,
        aimed: Option<EntityId>,
        input: &FrameInput,
        scene: &mut Scene,
        events: &mut Vec<(EntityId, SelectableEvent)>,
    ) -> InteractionState {
        let Some(mut grab) = self.grab.take() else {
            self.current = None;
            return InteractionState::Idle;
        };

        if self.pinch.active() {
            if let Some(draggable) = grab.draggable.as_mut() {
                let mut ctx = drag_context(scene, grab.target, input);
                draggable.on_drag(&mut ctx, &self.ray);
            }
            self.grab = Some(grab);
            return InteractionState::Grabbing;
        }

        if let Some(mut draggable) = grab.draggable.take() {
            let mut ctx = drag_context(scene, grab.target, input);
            draggable.on_drag_end(&mut ctx);
            scene.restore_draggable(grab.target, draggable);
        }
        record(events, grab.target, scene.unselect(grab.target));
        self.visual.fade_in();
        self.current = None;
        debug!(entity = %grab.target, "grab released");

        if aimed == Some(grab.target) {
            self.begin_hover(grab.target, scene, events);
            InteractionState::Hovering
        } else {
            InteractionState::Idle
        }
    }

    fn begin_hover(
        &mut self,
        target: EntityId,
        scene: &mut Scene,
        events: &mut Vec<(EntityId, SelectableEvent)>,
    ) {
        record(events, target, scene.hover_enter(target));
        self.current = Some(target);
        self.pinch.reset_timer();
        self.visual.restart_extend();
    }

    fn begin_grab(
        &mut self,
        target: EntityId,
        hit: &RaycastHit,
        input: &FrameInput,
        scene: &mut Scene,
        events: &mut Vec<(EntityId, SelectableEvent)>,
    ) {
        record(events, target, scene.select(target));
        let mut draggable = scene.take_draggable(target);
        if let Some(draggable) = draggable.as_mut() {
            let mut ctx = drag_context(scene, target, input);
            draggable.on_drag_start(&mut ctx, &self.ray, hit);
            debug!(entity = %target, strategy = draggable.name(), "drag started");
        } else {
            trace!(entity = %target, "grab without draggable");
        }
        self.grab = Some(ActiveGrab {
            target,
            anchor: hit.point,
            draggable,
        });
        self.visual.fade_out();
    }
}

fn drag_context<'a>(scene: &'a mut Scene, target: EntityId, input: &FrameInput) -> DragContext<'a> {
    DragContext {
        graph: scene.graph_mut(),
        target,
        ray_origin: input.ray_origin,
        head: input.head,
        hand: input.hand.position,
        dt: input.dt,
    }
}

fn record(
    events: &mut Vec<(EntityId, SelectableEvent)>,
    target: EntityId,
    event: Option<SelectableEvent>,
) {
    if let Some(event) = event {
        events.push((target, event));
    }
}
