//! Static arena the sandbox character moves through.
//!
//! The arena mirrors the demo level: a floor slab, boundary walls, a raised
//! platform, a ramp leading onto it and a stretched crate placed by an affine
//! matrix. All colliders are built once; their transforms never change.

use nalgebra as na;
use physics::{ColliderTransform, Mat4, PhysicsError, Quat, StaticCollider, Vec3};

/// Half extent of the square floor (meters).
pub const ARENA_HALF: f32 = 12.0;

/// Where the character is dropped at startup (capsule center).
pub const SPAWN: Vec3 = Vec3::new(0.0, 2.0, 0.0);

const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.5;

pub struct Scene {
    pub colliders: Vec<StaticCollider>,
}

impl Scene {
    pub fn build() -> Result<Self, PhysicsError> {
        let mut colliders = Vec::new();

        // Floor: top face at y = 0.
        colliders.push(StaticCollider::world_box(
            Vec3::new(-ARENA_HALF, -1.0, -ARENA_HALF),
            Vec3::new(ARENA_HALF, 0.0, ARENA_HALF),
        ));

        // Boundary walls.
        let outer = ARENA_HALF + WALL_THICKNESS;
        colliders.extend([
            StaticCollider::world_box(
                Vec3::new(-outer, 0.0, -outer),
                Vec3::new(outer, WALL_HEIGHT, -ARENA_HALF),
            ),
            StaticCollider::world_box(
                Vec3::new(-outer, 0.0, ARENA_HALF),
                Vec3::new(outer, WALL_HEIGHT, outer),
            ),
            StaticCollider::world_box(
                Vec3::new(-outer, 0.0, -ARENA_HALF),
                Vec3::new(-ARENA_HALF, WALL_HEIGHT, ARENA_HALF),
            ),
            StaticCollider::world_box(
                Vec3::new(ARENA_HALF, 0.0, -ARENA_HALF),
                Vec3::new(outer, WALL_HEIGHT, ARENA_HALF),
            ),
        ]);

        // Raised platform in the far corner.
        colliders.push(StaticCollider::world_box(
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(10.0, 1.0, 10.0),
        ));

        // Ramp rising toward +X onto the platform.
        let ramp_angle = 15.0_f32.to_radians();
        colliders.push(StaticCollider::cuboid_from_pose(
            Vec3::new(2.0, 0.3, 1.5),
            Vec3::new(3.0, 0.23, 7.5),
            Quat::from_axis_angle(&Vec3::z_axis(), ramp_angle),
        ));

        // Crate stretched along X by a non-uniform scale.
        let crate_matrix = Mat4::new_translation(&Vec3::new(-6.0, 0.5, -4.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 1.0));
        colliders.push(StaticCollider::local_box(
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, 0.5),
            ColliderTransform::from_matrix(crate_matrix)?,
        ));

        // Pillar turned 30 degrees about Y.
        colliders.push(StaticCollider::cuboid_from_pose(
            Vec3::new(0.4, 1.5, 0.4),
            Vec3::new(-3.0, 1.5, 6.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 30.0_f32.to_radians()),
        ));

        Ok(Self { colliders })
    }

    /// World-space bounds enclosing every collider.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.colliders.iter().fold(
            (Vec3::repeat(f32::INFINITY), Vec3::repeat(f32::NEG_INFINITY)),
            |(mins, maxs), collider| {
                let aabb = collider.world_aabb();
                (mins.inf(&aabb.mins.coords), maxs.sup(&aabb.maxs.coords))
            },
        )
    }
}

/// Rotate the planar part of `v` by `angle` radians about +Y.
pub fn rotate_planar(v: Vec3, angle: f32) -> Vec3 {
    na::UnitQuaternion::from_axis_angle(&Vec3::y_axis(), angle) * Vec3::new(v.x, 0.0, v.z)
}
