//! Planar helpers for horizontal-only direction math.
//!
//! "Ground-projected" means the vertical (Y) component is zeroed and the
//! result renormalized. Projection of a (near) vertical vector is undefined,
//! so these helpers return `Option` instead of a NaN direction.

use glam::{Vec2, Vec3};

/// Squared length below which a planar vector counts as degenerate.
pub const DEGENERATE_EPSILON_SQ: f32 = 1e-8;

/// Drop the Y component and renormalize. `None` when the remaining XZ part is
/// too short to carry a direction.
pub fn ground_project(v: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(v.x, 0.0, v.z);
    if flat.length_squared() <= DEGENERATE_EPSILON_SQ {
        None
    } else {
        Some(flat.normalize())
    }
}

/// [`ground_project`] with a caller-provided fallback, and world +Z when the
/// fallback is degenerate as well.
pub fn ground_project_or(v: Vec3, fallback: Vec3) -> Vec3 {
    ground_project(v)
        .or_else(|| ground_project(fallback))
        .unwrap_or(Vec3::Z)
}

/// Distance between `a` and `b` measured on the XZ plane.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

/// Replace the Y component of `v`.
pub fn with_height(v: Vec3, y: f32) -> Vec3 {
    Vec3::new(v.x, y, v.z)
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + to_target / distance * max_delta
    }
}

/// Clamp `t` into `[0, 1]`.
pub fn saturate(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}
