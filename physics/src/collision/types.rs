/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- narrow_phase (capsule-vs-box contact generation)
- resolve (iterative push-out and velocity projection)
- the step pipeline in `movement`, which aggregates per-substep summaries

Static colliders are owned by the caller and only borrowed for the duration of
a resolver call. Their world transform is stored together with its inverse in
a single [`ColliderTransform`] value, so the pair is always consistent.
*/

use nalgebra as na;
use rapier3d::parry::bounding_volume::Aabb;

use crate::PhysicsError;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;
pub type Mat4 = na::Matrix4<f32>;

/// A world transform paired with its inverse.
///
/// Both matrices are fixed at construction. Moving a collider means building a
/// new `ColliderTransform`, never patching one half of the pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderTransform {
    world: Mat4,
    inverse: Mat4,
}

impl ColliderTransform {
    /// Rigid pose. The inverse comes straight from the isometry.
    #[inline]
    pub fn from_isometry(iso: &Iso) -> Self {
        Self {
            world: iso.to_homogeneous(),
            inverse: iso.inverse().to_homogeneous(),
        }
    }

    /// Affine pose (may include scale or shear).
    pub fn from_matrix(world: Mat4) -> Result<Self, PhysicsError> {
        let inverse = world
            .try_inverse()
            .ok_or(PhysicsError::SingularTransform)?;
        Ok(Self { world, inverse })
    }

    #[inline]
    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    #[inline]
    pub fn inverse(&self) -> &Mat4 {
        &self.inverse
    }

    /// World-space point to collider-local space.
    #[inline]
    pub fn to_local_point(&self, p: &Vec3) -> Vec3 {
        self.inverse.transform_point(&na::Point3::from(*p)).coords
    }

    /// Collider-local point to world space.
    #[inline]
    pub fn to_world_point(&self, p: &Vec3) -> Vec3 {
        self.world.transform_point(&na::Point3::from(*p)).coords
    }

    /// Apply only the linear part of the world matrix (no translation).
    #[inline]
    pub fn to_world_vector(&self, v: &Vec3) -> Vec3 {
        self.world.transform_vector(v)
    }

    /// World-space gradient of the local coordinate along `axis`.
    ///
    /// This is the (unnormalized) world normal of the local faces
    /// perpendicular to `axis`; its length is local units per world meter.
    #[inline]
    pub fn face_gradient(&self, axis: usize) -> Vec3 {
        self.inverse.fixed_view::<1, 3>(axis, 0).transpose()
    }
}

/// Axis-aligned box, optionally placed in the world by a transform.
///
/// - Without a transform, `aabb` is already in world space.
/// - With a transform, `aabb` is in collider-local space and the box becomes
///   an oriented (or, for affine matrices, skewed) box in the world.
#[derive(Clone, Copy, Debug)]
pub struct StaticCollider {
    pub aabb: Aabb,
    pub transform: Option<ColliderTransform>,
}

impl StaticCollider {
    /// World-space box spanning `mins..maxs`.
    #[inline]
    pub fn world_box(mins: Vec3, maxs: Vec3) -> Self {
        Self {
            aabb: Aabb::new(na::Point3::from(mins), na::Point3::from(maxs)),
            transform: None,
        }
    }

    /// Local-space box placed by an explicit transform.
    #[inline]
    pub fn local_box(mins: Vec3, maxs: Vec3, transform: ColliderTransform) -> Self {
        Self {
            aabb: Aabb::new(na::Point3::from(mins), na::Point3::from(maxs)),
            transform: Some(transform),
        }
    }

    /// Oriented cuboid with given half extents and pose.
    #[inline]
    pub fn cuboid_from_pose(half_extents: Vec3, translation: Vec3, rotation: Quat) -> Self {
        let iso = Iso::from_parts(na::Translation3::from(translation), rotation);
        Self::local_box(
            -half_extents,
            half_extents,
            ColliderTransform::from_isometry(&iso),
        )
    }

    /// World-space bounds of the box (the AABB of its eight transformed corners).
    pub fn world_aabb(&self) -> Aabb {
        let Some(transform) = self.transform.as_ref() else {
            return self.aabb;
        };

        let lo = self.aabb.mins.coords;
        let hi = self.aabb.maxs.coords;
        let mut mins = Vec3::repeat(f32::INFINITY);
        let mut maxs = Vec3::repeat(f32::NEG_INFINITY);

        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            let w = transform.to_world_point(&corner);
            mins = mins.inf(&w);
            maxs = maxs.sup(&w);
        }

        Aabb::new(na::Point3::from(mins), na::Point3::from(maxs))
    }
}

/// Contact between the capsule and one box, in the box's local frame.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Unit normal pointing from the box surface toward the capsule.
    pub normal: Vec3,
    /// Overlap depth along `normal` (meters, > 0).
    pub penetration: f32,
}

/// A contact the resolver has applied, as reported to observers.
#[derive(Clone, Copy, Debug)]
pub struct ContactRecord {
    /// Index of the collider in the slice passed to the resolver.
    pub collider_index: usize,
    /// Resolver pass that produced the contact (0-based).
    pub iteration: u32,
    /// Depth the body was pushed out by (meters).
    pub penetration: f32,
    /// World-space contact normal.
    pub normal: Vec3,
    /// Whether the contact counted as ground support.
    pub grounding: bool,
}

/// Aggregate result of one or more resolver calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSummary {
    /// Number of contacts resolved.
    pub contacts: usize,
    /// Number of those contacts that counted as ground support.
    pub ground_contacts: usize,
    /// Deepest penetration resolved (meters, 0 if none).
    pub max_penetration: f32,
    /// Resolver passes actually run.
    pub iterations: u32,
    /// False if the last pass still found contacts, i.e. the pass budget ran out.
    pub converged: bool,
}

impl Default for ContactSummary {
    fn default() -> Self {
        Self {
            contacts: 0,
            ground_contacts: 0,
            max_penetration: 0.0,
            iterations: 0,
            converged: true,
        }
    }
}

impl ContactSummary {
    /// Fold another summary into this one (sums counts, keeps the deepest penetration).
    pub fn merge(&mut self, other: &ContactSummary) {
        self.contacts += other.contacts;
        self.ground_contacts += other.ground_contacts;
        self.max_penetration = self.max_penetration.max(other.max_penetration);
        self.iterations += other.iterations;
        self.converged &= other.converged;
    }
}
