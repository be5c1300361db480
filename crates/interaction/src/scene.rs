//! Interactable objects and capability lookup.
//!
//! Capabilities are optional per entity. The controller asks "does the hit
//! entity have a selectable / a draggable?" through this registry instead of
//! matching on concrete object types.

use crate::draggable::Draggable;
use crate::highlight::Highlight;
use crate::selectable::{Selectable, SelectableEvent};
use handray_core::{EntityId, SceneError, SceneGraph, Transform};
use handray_physics::{Collider, CollisionWorld};
use std::collections::BTreeMap;
use std::fmt;

/// Capabilities attached to one entity.
#[derive(Default)]
pub struct Interactable {
    /// Hover/select state.
    pub selectable: Option<Selectable>,
    /// Manipulation strategy.
    pub draggable: Option<Box<dyn Draggable>>,
    /// Colour feedback.
    pub highlight: Option<Highlight>,
    /// Raycast target shape.
    pub collider: Option<Collider>,
}

impl fmt::Debug for Interactable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactable")
            .field("selectable", &self.selectable)
            .field("draggable", &self.draggable.as_ref().map(|d| d.name()))
            .field("highlight", &self.highlight)
            .field("collider", &self.collider)
            .finish()
    }
}

impl Interactable {
    /// Selectable with a collider, the minimum the pointer can interact with.
    pub fn selectable(collider: Collider) -> Self {
        Self {
            selectable: Some(Selectable::new()),
            collider: Some(collider),
            ..Default::default()
        }
    }

    /// Builder: attach a drag strategy.
    pub fn with_draggable(mut self, draggable: Box<dyn Draggable>) -> Self {
        self.draggable = Some(draggable);
        self
    }

    /// Builder: attach colour feedback.
    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }
}

/// Scene graph plus the capabilities of its entities.
#[derive(Debug)]
pub struct Scene {
    graph: SceneGraph,
    root: EntityId,
    interactables: BTreeMap<EntityId, Interactable>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with a single world root entity.
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.spawn_root("world_root", Transform::IDENTITY);
        Self {
            graph,
            root,
            interactables: BTreeMap::new(),
        }
    }

    /// Entity that scene content hangs from.
    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Transform hierarchy.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable transform hierarchy.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Spawn an object under the world root and attach its capabilities.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        local: Transform,
        interactable: Interactable,
    ) -> Result<EntityId, SceneError> {
        let id = self.graph.spawn(name, local, Some(self.root))?;
        self.interactables.insert(id, interactable);
        Ok(id)
    }

    /// Remove an object and its capabilities. Its collider leaves the
    /// collision world on the next [`Scene::sync_colliders`].
    pub fn despawn(&mut self, id: EntityId) -> Result<(), SceneError> {
        self.graph.despawn(id)?;
        self.interactables.remove(&id);
        Ok(())
    }

    /// Capabilities of `id`.
    pub fn interactable(&self, id: EntityId) -> Option<&Interactable> {
        self.interactables.get(&id)
    }

    /// Selectable of `id`, if it has one.
    pub fn selectable(&self, id: EntityId) -> Option<&Selectable> {
        self.interactables.get(&id)?.selectable.as_ref()
    }

    /// Mutable selectable of `id`, e.g. to subscribe listeners.
    pub fn selectable_mut(&mut self, id: EntityId) -> Option<&mut Selectable> {
        self.interactables.get_mut(&id)?.selectable.as_mut()
    }

    /// Highlight of `id`, if it has one.
    pub fn highlight(&self, id: EntityId) -> Option<&Highlight> {
        self.interactables.get(&id)?.highlight.as_ref()
    }

    /// Whether `id` exposes a selectable.
    pub fn is_selectable(&self, id: EntityId) -> bool {
        self.selectable(id).is_some()
    }

    /// Whether `id` currently exposes a draggable.
    pub fn has_draggable(&self, id: EntityId) -> bool {
        self.interactables
            .get(&id)
            .is_some_and(|i| i.draggable.is_some())
    }

    /// Detach the draggable of `id` for the duration of a grab.
    pub fn take_draggable(&mut self, id: EntityId) -> Option<Box<dyn Draggable>> {
        self.interactables.get_mut(&id)?.draggable.take()
    }

    /// Give a draggable back after a grab. Dropped if the entity is gone.
    pub fn restore_draggable(&mut self, id: EntityId, draggable: Box<dyn Draggable>) {
        if let Some(interactable) = self.interactables.get_mut(&id) {
            interactable.draggable = Some(draggable);
        }
    }

    /// [`Selectable::hover_enter`] on `id`, routed to its highlight.
    pub fn hover_enter(&mut self, id: EntityId) -> Option<SelectableEvent> {
        self.route(id, Selectable::hover_enter)
    }

    /// [`Selectable::hover_exit`] on `id`, routed to its highlight.
    pub fn hover_exit(&mut self, id: EntityId) -> Option<SelectableEvent> {
        self.route(id, Selectable::hover_exit)
    }

    /// [`Selectable::select`] on `id`, routed to its highlight.
    pub fn select(&mut self, id: EntityId) -> Option<SelectableEvent> {
        self.route(id, Selectable::select)
    }

    /// [`Selectable::unselect`] on `id`, routed to its highlight.
    pub fn unselect(&mut self, id: EntityId) -> Option<SelectableEvent> {
        self.route(id, Selectable::unselect)
    }

    fn route(
        &mut self,
        id: EntityId,
        transition: fn(&mut Selectable) -> Option<SelectableEvent>,
    ) -> Option<SelectableEvent> {
        let interactable = self.interactables.get_mut(&id)?;
        let event = transition(interactable.selectable.as_mut()?)?;
        if let Some(highlight) = interactable.highlight.as_mut() {
            highlight.apply(event);
        }
        Some(event)
    }

    /// Push collider shapes and current world poses into `world`, dropping
    /// bodies whose entity is gone or no longer has a collider.
    pub fn sync_colliders(&self, world: &mut CollisionWorld) {
        let stale: Vec<EntityId> = world
            .entities()
            .filter(|id| {
                self.interactables
                    .get(id)
                    .map_or(true, |i| i.collider.is_none())
            })
            .collect();
        for id in stale {
            world.remove(id);
            tracing::debug!(entity = %id, "collider removed");
        }

        for (id, interactable) in &self.interactables {
            let Some(collider) = interactable.collider else {
                continue;
            };
            match self.graph.world(*id) {
                Ok(pose) => world.insert(*id, collider, pose),
                Err(err) => tracing::warn!(%err, "interactable without transform"),
            }
        }
    }
}
