/*!
Collision root module.

This module re-exports submodules that implement capsule-vs-box contact
resolution against a flat list of static colliders. The code is split for
clarity:

- types:        shared data types (StaticCollider, ColliderTransform, ContactSummary, etc.)
- narrow_phase: capsule-vs-box contact generation, including the inside-the-box fallback
- resolve:      iterative push-out, velocity projection and ground classification
*/

pub mod narrow_phase;
pub mod resolve;
pub mod types;

// Re-export commonly used types and functions.
pub use narrow_phase::{capsule_box_contact, capsule_contact_against_static};
pub use resolve::{ResolveOptions, resolve_collisions, resolve_collisions_with};
pub use types::{
    ColliderTransform, Contact, ContactRecord, ContactSummary, Iso, Mat4, Quat, StaticCollider,
    Vec3,
};
