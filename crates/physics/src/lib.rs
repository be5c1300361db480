#![warn(missing_docs)]
//! Raycasting primitives (rays, colliders, spatial queries).
//!
//! This is the only "physics" the interaction layer needs: given a ray, a
//! maximum distance and a layer filter, find the nearest collider hit.

use glam::Vec3;
use handray_core::{EntityId, LayerMask, Transform};
use std::collections::BTreeMap;
use thiserror::Error;

/// Half-line in world space. The direction is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`. A zero direction falls back to +Z.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Parameters of a single raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastQuery {
    /// Ray to cast.
    pub ray: Ray,
    /// Hits beyond this distance are ignored.
    pub max_distance: f32,
    /// Only colliders on these layers are considered.
    pub layers: LayerMask,
}

/// Nearest hit returned by a [`SpatialQuery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// World-space hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
    /// Entity owning the collider.
    pub entity: EntityId,
}

/// Opaque, synchronous nearest-hit query service.
pub trait SpatialQuery {
    /// Nearest hit within `query.max_distance` on `query.layers`, if any.
    fn raycast(&self, query: &RaycastQuery) -> Option<RaycastHit>;
}

/// Errors raised when building colliders from configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColliderError {
    /// Sphere radius must be positive and finite.
    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f32),
    /// Box half extents must all be positive and finite.
    #[error("box half extents must be positive, got {0:?}")]
    InvalidExtents([f32; 3]),
}

/// Collider geometry in the owning entity's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere centred on the entity origin.
    Sphere {
        /// Radius before scaling.
        radius: f32,
    },
    /// Box centred on the entity origin, oriented with the entity.
    Cuboid {
        /// Half size along each local axis.
        half_extents: Vec3,
    },
}

/// Shape plus the layers it lives on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Geometry.
    pub shape: Shape,
    /// Layers used for query filtering.
    pub layers: LayerMask,
}

impl Collider {
    /// Sphere collider.
    pub fn sphere(radius: f32, layers: LayerMask) -> Result<Self, ColliderError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ColliderError::InvalidRadius(radius));
        }
        Ok(Self {
            shape: Shape::Sphere { radius },
            layers,
        })
    }

    /// Box collider.
    pub fn cuboid(half_extents: Vec3, layers: LayerMask) -> Result<Self, ColliderError> {
        if !(half_extents.is_finite() && half_extents.min_element() > 0.0) {
            return Err(ColliderError::InvalidExtents(half_extents.to_array()));
        }
        Ok(Self {
            shape: Shape::Cuboid { half_extents },
            layers,
        })
    }

    /// Intersect `ray` with this collider placed at `pose`.
    /// Returns `(distance, normal)` of the entry point, or the exit point when
    /// the ray starts inside the shape.
    pub fn intersect(&self, pose: &Transform, ray: &Ray) -> Option<(f32, Vec3)> {
        match self.shape {
            Shape::Sphere { radius } => {
                let radius = radius * pose.scale.abs().max_element();
                let distance = ray_sphere(ray, pose.translation, radius)?;
                let normal = (ray.at(distance) - pose.translation)
                    .try_normalize()
                    .unwrap_or(-ray.direction);
                Some((distance, normal))
            }
            Shape::Cuboid { half_extents } => {
                let to_local = pose.to_affine().inverse();
                let local_origin = to_local.transform_point3(ray.origin);
                let local_dir = to_local.transform_vector3(ray.direction);
                let aabb = Aabb::from_center_half_extents(Vec3::ZERO, half_extents);
                let (distance, local_normal) = aabb.ray_intersection(local_origin, local_dir)?;
                let normal = (pose.rotation * local_normal)
                    .try_normalize()
                    .unwrap_or(-ray.direction);
                Some((distance, normal))
            }
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Create an AABB from its centre and half size.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Slab test. `dir` need not be normalized; the returned parameter is in
    /// units of `dir`. Returns `(t, outward face normal)`.
    pub fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_normal = Vec3::ZERO;
        let mut exit_normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < 1e-12 {
                // Parallel to this slab: miss unless already between the planes.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let mut axis_normal = Vec3::ZERO;
            axis_normal[axis] = -d.signum();

            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

            if near > t_enter {
                t_enter = near;
                enter_normal = axis_normal;
            }
            if far < t_exit {
                t_exit = far;
                exit_normal = -axis_normal;
            }
        }

        // Entire box behind the origin, or the slabs never overlap.
        if t_exit < 0.0 || t_enter > t_exit {
            return None;
        }

        if t_enter < 0.0 {
            Some((t_exit, exit_normal))
        } else {
            Some((t_enter, enter_normal))
        }
    }
}

fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Brute-force collision world: every collider is tested on each query.
///
/// Poses are pushed in by the owner of the transforms through `insert`, the
/// world never reads the scene graph itself.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    bodies: BTreeMap<EntityId, (Collider, Transform)>,
}

impl CollisionWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the collider of `entity`.
    pub fn insert(&mut self, entity: EntityId, collider: Collider, pose: Transform) {
        self.bodies.insert(entity, (collider, pose));
    }

    /// Remove the collider of `entity`.
    pub fn remove(&mut self, entity: EntityId) -> Option<Collider> {
        self.bodies.remove(&entity).map(|(collider, _)| collider)
    }

    /// Entities with a registered collider, in id order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.bodies.keys().copied()
    }

    /// Number of registered colliders.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no colliders are registered.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl SpatialQuery for CollisionWorld {
    fn raycast(&self, query: &RaycastQuery) -> Option<RaycastHit> {
        let mut closest: Option<RaycastHit> = None;

        for (entity, (collider, pose)) in &self.bodies {
            if !collider.layers.intersects(query.layers) {
                continue;
            }
            let Some((distance, normal)) = collider.intersect(pose, &query.ray) else {
                continue;
            };
            if distance > query.max_distance {
                continue;
            }
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(RaycastHit {
                    point: query.ray.at(distance),
                    normal,
                    distance,
                    entity: *entity,
                });
            }
        }

        closest
    }
}
