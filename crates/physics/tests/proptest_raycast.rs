//! Property-based tests for the nearest-hit raycast
//!
//! Validates query invariants:
//! - Hits never lie beyond max_distance
//! - The hit point lies on the ray at the reported distance
//! - The reported hit is the nearest accepted collider
//! - Layer filtering excludes colliders outside the mask

use glam::Vec3;
use handray_core::{EntityId, LayerMask, Transform};
use handray_physics::{Collider, CollisionWorld, Ray, RaycastQuery, SpatialQuery};
use proptest::prelude::*;

fn vec3(range: f32) -> impl Strategy<Value = Vec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn body() -> impl Strategy<Value = (Vec3, f32, bool, bool)> {
    (vec3(8.0), 0.1f32..2.0, any::<bool>(), any::<bool>())
}

proptest! {
    /// Property: The hit is on the ray, within range and nearest
    #[test]
    fn hit_is_nearest_within_range(
        bodies in prop::collection::vec(body(), 0..12),
        origin in vec3(3.0),
        direction in vec3(1.0),
        max_distance in 0.5f32..15.0,
    ) {
        prop_assume!(direction.length_squared() > 1e-4);

        let mut world = CollisionWorld::new();
        let mut all = Vec::new();
        for (i, (center, size, cuboid, interactable)) in bodies.into_iter().enumerate() {
            let layers = if interactable { LayerMask::INTERACTABLE } else { LayerMask::ENVIRONMENT };
            let collider = if cuboid {
                Collider::cuboid(Vec3::splat(size), layers).unwrap()
            } else {
                Collider::sphere(size, layers).unwrap()
            };
            let pose = Transform::from_translation(center);
            world.insert(EntityId(i as u64), collider, pose);
            all.push((collider, pose));
        }

        let ray = Ray::new(origin, direction);
        let query = RaycastQuery { ray, max_distance, layers: LayerMask::INTERACTABLE };

        let nearest = all
            .iter()
            .filter(|(c, _)| c.layers.intersects(LayerMask::INTERACTABLE))
            .filter_map(|(c, pose)| c.intersect(pose, &ray).map(|(t, _)| t))
            .filter(|t| *t <= max_distance)
            .fold(None::<f32>, |best, t| Some(best.map_or(t, |b| b.min(t))));

        match (world.raycast(&query), nearest) {
            (Some(hit), Some(expected)) => {
                prop_assert!(hit.distance >= 0.0);
                prop_assert!(hit.distance <= max_distance);
                prop_assert!((hit.distance - expected).abs() < 1e-4);
                prop_assert!((hit.point - ray.at(hit.distance)).length() < 1e-4);
                let (collider, _) = all[hit.entity.0 as usize];
                prop_assert!(collider.layers.intersects(LayerMask::INTERACTABLE));
            }
            (None, None) => {}
            (got, expected) => prop_assert!(false, "raycast {:?} vs brute force {:?}", got, expected),
        }
    }

    /// Property: A ray aimed at a sphere's centre hits it head on
    #[test]
    fn aimed_ray_hits_sphere(
        center in vec3(5.0),
        radius in 0.1f32..1.0,
        offset in vec3(1.0),
    ) {
        prop_assume!(offset.length() > 0.2);
        let origin = center + offset.normalize() * (radius + 2.0);

        let mut world = CollisionWorld::new();
        world.insert(EntityId(7), Collider::sphere(radius, LayerMask::DEFAULT).unwrap(), Transform::from_translation(center));

        let query = RaycastQuery {
            ray: Ray::new(origin, center - origin),
            max_distance: 10.0,
            layers: LayerMask::all(),
        };
        let hit = world.raycast(&query).unwrap();
        prop_assert_eq!(hit.entity, EntityId(7));
        prop_assert!((hit.distance - 2.0).abs() < 1e-3);
        prop_assert!(hit.normal.dot(query.ray.direction) < 0.0);
    }
}
