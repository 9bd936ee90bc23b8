use glam::{Vec2, Vec3};

use crate::constants::OVERLAP_EPSILON_SQ;

/// Pushes two capsule centers apart in the XZ plane by half the overlap each.
/// Coincident centers are left alone. Returns whether anything moved.
pub fn resolve_overlap(a: &mut Vec3, radius_a: f32, b: &mut Vec3, radius_b: f32) -> bool {
    let delta = Vec2::new(a.x - b.x, a.z - b.z);
    let dist_sq = delta.length_squared();
    let min_dist = radius_a + radius_b;
    if dist_sq >= min_dist * min_dist || dist_sq <= OVERLAP_EPSILON_SQ {
        return false;
    }

    let dist = dist_sq.sqrt();
    let push = delta / dist * ((min_dist - dist) * 0.5);
    a.x += push.x;
    a.z += push.y;
    b.x -= push.x;
    b.z -= push.y;
    tracing::trace!("Separated actors by {:.3}", min_dist - dist);
    true
}
