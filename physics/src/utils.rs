use nalgebra::Vector2;

use crate::{YAW_EPS, collision::Vec3};

/// Project a world vector onto the horizontal plane as `(x, z)`.
#[inline]
pub fn to_planar(v: &Vec3) -> Vector2<f32> {
    Vector2::new(v.x, v.z)
}

/// Yaw (radians about +Y) that turns the -Z forward axis onto the planar direction `xz`.
///
/// Returns `None` if the direction is too short to define a heading.
pub fn yaw_from_xz(xz: Vector2<f32>) -> Option<f32> {
    if xz.norm_squared() > YAW_EPS {
        return Some((-xz[0]).atan2(-xz[1]));
    }

    None
}

/// Planar (XZ) distance squared between two world positions (meters^2).
#[inline]
pub fn planar_distance_sq(a: &Vec3, b: &Vec3) -> f32 {
    let x = b.x - a.x;
    let z = b.z - a.z;
    x * x + z * z
}
