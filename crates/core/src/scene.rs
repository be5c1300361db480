//! Transform hierarchy.
//!
//! Entities carry a local [`Transform`] relative to an optional parent. The
//! interaction layer reparents grabbed objects under a temporary pivot, so
//! reparenting can preserve the world transform. Storage is a `BTreeMap` to
//! keep iteration order stable between runs.

use crate::EntityId;
use glam::{Affine3A, Quat, Vec3};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors returned by scene graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The entity is not (or no longer) part of the graph.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
    /// Parenting `child` under `parent` would create a cycle.
    #[error("cannot parent {child} under {parent}: would create a cycle")]
    Cycle {
        /// Entity being reparented.
        child: EntityId,
        /// Requested parent.
        parent: EntityId,
    },
}

/// Translation, rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position.
    pub translation: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation or scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Transform placed at `translation`.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Builder: set rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to an affine matrix.
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Decompose an affine matrix.
    pub fn from_affine(affine: Affine3A) -> Self {
        let (scale, rotation, translation) = affine.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Compose `self` (parent) with `child` (local to the parent).
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform::from_affine(self.to_affine() * child.to_affine())
    }

    /// Inverse transform.
    pub fn inverse(&self) -> Transform {
        Transform::from_affine(self.to_affine().inverse())
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    local: Transform,
    parent: Option<EntityId>,
}

/// Entity transform hierarchy.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<EntityId, Node>,
    next_id: u64,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity with a transform local to `parent` (world space when
    /// `parent` is `None`).
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        local: Transform,
        parent: Option<EntityId>,
    ) -> Result<EntityId, SceneError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        Ok(self.insert(name.into(), local, parent))
    }

    /// Spawn an entity with no parent.
    pub fn spawn_root(&mut self, name: impl Into<String>, local: Transform) -> EntityId {
        self.insert(name.into(), local, None)
    }

    fn insert(&mut self, name: String, local: Transform, parent: Option<EntityId>) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.nodes.insert(id, Node { name, local, parent });
        id
    }

    /// Remove an entity. Its children are moved to the root with their world
    /// transforms preserved.
    pub fn despawn(&mut self, id: EntityId) -> Result<(), SceneError> {
        self.node(id)?;
        let children: Vec<EntityId> = self.children(id).collect();
        for child in children {
            self.set_parent(child, None)?;
        }
        self.nodes.remove(&id);
        Ok(())
    }

    /// Whether `id` is part of the graph.
    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Display name given at spawn time.
    pub fn name(&self, id: EntityId) -> Result<&str, SceneError> {
        Ok(&self.node(id)?.name)
    }

    /// Current parent.
    pub fn parent(&self, id: EntityId) -> Result<Option<EntityId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    /// Direct children of `id`, in id order.
    pub fn children(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes
            .iter()
            .filter(move |(_, node)| node.parent == Some(id))
            .map(|(child, _)| *child)
    }

    /// Transform relative to the parent.
    pub fn local(&self, id: EntityId) -> Result<Transform, SceneError> {
        Ok(self.node(id)?.local)
    }

    /// Overwrite the transform relative to the parent.
    pub fn set_local(&mut self, id: EntityId, local: Transform) -> Result<(), SceneError> {
        self.node_mut(id)?.local = local;
        Ok(())
    }

    /// World-space transform.
    pub fn world(&self, id: EntityId) -> Result<Transform, SceneError> {
        let node = self.node(id)?;
        match node.parent {
            Some(parent) => Ok(self.world(parent)?.mul_transform(&node.local)),
            None => Ok(node.local),
        }
    }

    /// World-space position.
    pub fn world_position(&self, id: EntityId) -> Result<Vec3, SceneError> {
        Ok(self.world(id)?.translation)
    }

    /// Place the entity at `world` regardless of its parent.
    pub fn set_world(&mut self, id: EntityId, world: Transform) -> Result<(), SceneError> {
        let local = match self.node(id)?.parent {
            Some(parent) => self.world(parent)?.inverse().mul_transform(&world),
            None => world,
        };
        self.set_local(id, local)
    }

    /// Move the entity to `position` in world space, keeping rotation and scale.
    pub fn set_world_position(&mut self, id: EntityId, position: Vec3) -> Result<(), SceneError> {
        let mut world = self.world(id)?;
        world.translation = position;
        self.set_world(id, world)
    }

    /// Reparent `id` under `parent` (root when `None`) keeping its world
    /// transform.
    pub fn set_parent(&mut self, id: EntityId, parent: Option<EntityId>) -> Result<(), SceneError> {
        let world = self.world(id)?;
        if let Some(parent) = parent {
            self.node(parent)?;
            let mut cursor = Some(parent);
            while let Some(ancestor) = cursor {
                if ancestor == id {
                    return Err(SceneError::Cycle { child: id, parent });
                }
                cursor = self.node(ancestor)?.parent;
            }
        }
        self.node_mut(id)?.parent = parent;
        self.set_world(id, world)
    }

    fn node(&self, id: EntityId) -> Result<&Node, SceneError> {
        self.nodes.get(&id).ok_or(SceneError::UnknownEntity(id))
    }

    fn node_mut(&mut self, id: EntityId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::UnknownEntity(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn child_world_follows_parent() {
        let mut graph = SceneGraph::new();
        let parent = graph
            .spawn("parent", Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)), None)
            .unwrap();
        let child = graph
            .spawn("child", Transform::from_translation(Vec3::new(0.0, 2.0, 0.0)), Some(parent))
            .unwrap();

        assert!(approx(graph.world_position(child).unwrap(), Vec3::new(1.0, 2.0, 0.0)));

        graph
            .set_world_position(parent, Vec3::new(5.0, 0.0, 5.0))
            .unwrap();
        assert!(approx(graph.world_position(child).unwrap(), Vec3::new(5.0, 2.0, 5.0)));
    }

    #[test]
    fn reparenting_preserves_world_transform() {
        let mut graph = SceneGraph::new();
        let object = graph
            .spawn(
                "object",
                Transform::from_translation(Vec3::new(0.0, 1.0, 3.0))
                    .with_rotation(Quat::from_rotation_y(0.5)),
                None,
            )
            .unwrap();
        let pivot = graph
            .spawn("pivot", Transform::from_translation(Vec3::new(0.0, 1.0, 2.5)), None)
            .unwrap();

        let before = graph.world(object).unwrap();
        graph.set_parent(object, Some(pivot)).unwrap();
        let during = graph.world(object).unwrap();
        assert!(approx(before.translation, during.translation));
        assert!(before.rotation.dot(during.rotation).abs() > 0.9999);

        graph
            .set_world_position(pivot, Vec3::new(0.0, 1.0, 1.5))
            .unwrap();
        graph.set_parent(object, None).unwrap();
        assert!(approx(graph.world_position(object).unwrap(), Vec3::new(0.0, 1.0, 2.0)));
        assert_eq!(graph.parent(object).unwrap(), None);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn("a", Transform::IDENTITY, None).unwrap();
        let b = graph.spawn("b", Transform::IDENTITY, Some(a)).unwrap();
        assert_eq!(
            graph.set_parent(a, Some(b)),
            Err(SceneError::Cycle { child: a, parent: b })
        );
        assert!(matches!(
            graph.set_parent(a, Some(a)),
            Err(SceneError::Cycle { .. })
        ));
    }

    #[test]
    fn despawn_releases_children_in_place() {
        let mut graph = SceneGraph::new();
        let pivot = graph
            .spawn("pivot", Transform::from_translation(Vec3::new(0.0, 0.0, 4.0)), None)
            .unwrap();
        let child = graph
            .spawn("child", Transform::from_translation(Vec3::X), Some(pivot))
            .unwrap();

        graph.despawn(pivot).unwrap();
        assert!(!graph.contains(pivot));
        assert_eq!(graph.parent(child).unwrap(), None);
        assert!(approx(graph.world_position(child).unwrap(), Vec3::new(1.0, 0.0, 4.0)));
        assert_eq!(graph.world(pivot), Err(SceneError::UnknownEntity(pivot)));
    }
}
