use rapier3d::parry::bounding_volume::Aabb;

use super::types::{ColliderTransform, Contact, StaticCollider, Vec3};
use crate::{CapsuleCollider, settings::DIST_EPS};

/// Compute the contact between a Y-aligned capsule centered at `center` and `aabb`.
///
/// Both `center` and `aabb` must be expressed in the same frame. The returned
/// normal points from the box toward the capsule, in that frame.
///
/// - The inner segment is clamped against the box's Y extent to pick the
///   segment point closest to the box; that point is then clamped into the box.
/// - When the segment point lies inside the box (zero separation), the capsule
///   is pushed out through the nearest face instead, preferring X, then Y,
///   then Z on ties. The face is the one on the capsule center's side of the
///   box midpoint.
///
/// Returns `None` when the shapes are separated or exactly touching.
pub fn capsule_box_contact(
    center: &Vec3,
    capsule: &CapsuleCollider,
    aabb: &Aabb,
) -> Option<Contact> {
    let (probe, on_box) = closest_points(center, capsule, aabb);
    let separation = probe - on_box;
    let distance = separation.norm();

    let (normal, penetration) = if distance == 0.0 {
        let face = nearest_face(&probe, center, aabb, |_| 1.0);
        let mut normal = Vec3::zeros();
        normal[face.axis] = face.sign;
        (normal, capsule.radius + face.distance)
    } else {
        (separation / distance, capsule.radius - distance)
    };

    contact(normal, penetration)
}

/// Contact between the capsule and a static collider, in world space.
///
/// For transformed colliders the capsule center is moved into collider-local
/// space and the closest points are found there. The separation between them
/// is then measured in world space, so scaled boxes are compared against the
/// capsule's world radius. When the segment point is inside the box, face
/// distances and the face normal are converted to world space as well.
pub fn capsule_contact_against_static(
    position: &Vec3,
    capsule: &CapsuleCollider,
    collider: &StaticCollider,
) -> Option<Contact> {
    let Some(transform) = collider.transform.as_ref() else {
        return capsule_box_contact(position, capsule, &collider.aabb);
    };

    let local = transform.to_local_point(position);
    let (probe, on_box) = closest_points(&local, capsule, &collider.aabb);
    let local_separation = probe - on_box;

    if local_separation == Vec3::zeros() {
        return transformed_face_contact(transform, &probe, &local, capsule, &collider.aabb);
    }

    let separation = transform.to_world_vector(&local_separation);
    let distance = separation.norm();
    if distance <= DIST_EPS {
        return None;
    }

    contact(separation / distance, capsule.radius - distance)
}

fn transformed_face_contact(
    transform: &ColliderTransform,
    probe: &Vec3,
    local_center: &Vec3,
    capsule: &CapsuleCollider,
    aabb: &Aabb,
) -> Option<Contact> {
    // World meters per local unit across each pair of faces.
    let world_per_local = |axis: usize| {
        let gradient = transform.face_gradient(axis).norm();
        if gradient > DIST_EPS { 1.0 / gradient } else { 1.0 }
    };

    let face = nearest_face(probe, local_center, aabb, world_per_local);
    let normal = (transform.face_gradient(face.axis) * face.sign).try_normalize(DIST_EPS)?;

    contact(normal, capsule.radius + face.distance)
}

#[inline]
fn contact(normal: Vec3, penetration: f32) -> Option<Contact> {
    (penetration > 0.0).then_some(Contact {
        normal,
        penetration,
    })
}

/// Closest segment point to the box and its clamp onto the box, in the box's frame.
#[inline]
fn closest_points(center: &Vec3, capsule: &CapsuleCollider, aabb: &Aabb) -> (Vec3, Vec3) {
    let mins = aabb.mins.coords;
    let maxs = aabb.maxs.coords;

    let probe = Vec3::new(
        center.x,
        closest_segment_y(center.y, capsule.half_height, mins.y, maxs.y),
        center.z,
    );
    // Component-wise clamp; never panics on inverted boxes.
    (probe, probe.sup(&mins).inf(&maxs))
}

/// Y coordinate of the point on the vertical segment `center_y ± half_height`
/// closest to the slab `min_y..=max_y`.
#[inline]
fn closest_segment_y(center_y: f32, half_height: f32, min_y: f32, max_y: f32) -> f32 {
    let seg_min = center_y - half_height;
    let seg_max = center_y + half_height;

    if seg_max < min_y {
        seg_max
    } else if seg_min > max_y {
        seg_min
    } else {
        center_y.max(min_y).min(max_y)
    }
}

struct Face {
    axis: usize,
    sign: f32,
    distance: f32,
}

/// Box face nearest to `p` (assumed inside), facing the side `center` is on.
///
/// `scale` converts a distance along each local axis into the frame the
/// distance is reported in.
fn nearest_face(p: &Vec3, center: &Vec3, aabb: &Aabb, scale: impl Fn(usize) -> f32) -> Face {
    let mins = aabb.mins.coords;
    let maxs = aabb.maxs.coords;
    let midpoint = (mins + maxs) * 0.5;
    let axis_distance = |axis: usize| {
        let local = (p[axis] - mins[axis]).abs().min((maxs[axis] - p[axis]).abs());
        local * scale(axis)
    };

    let dist = [axis_distance(0), axis_distance(1), axis_distance(2)];
    let min_dist = dist[0].min(dist[1]).min(dist[2]);

    // First axis reaching the minimum wins, so ties resolve X, then Y, then Z.
    let axis = dist.iter().position(|&d| d == min_dist).unwrap_or(0);

    Face {
        axis,
        sign: if center[axis] > midpoint[axis] { 1.0 } else { -1.0 },
        distance: min_dist,
    }
}
