pub mod body;
pub mod collision;
pub mod error;
pub mod ik;
pub mod movement;
pub mod settings;
pub mod utils;

pub use body::{CapsuleCollider, RigidBody, integrate_body, try_jump};
pub use collision::{
    ColliderTransform, ContactRecord, ContactSummary, Iso, Mat4, Quat, ResolveOptions,
    StaticCollider, Vec3, resolve_collisions, resolve_collisions_with,
};
pub use error::PhysicsError;
pub use ik::{IkOptions, IkReport, TwoBoneChain, solve_ik};
pub use movement::{
    InertiaConfig, StepConfig, StepReport, apply_planar_inertia, step_character,
    yaw_from_planar_delta,
};
pub use settings::{
    DEFAULT_GRAVITY, DEFAULT_JUMP_SPEED, DIST_EPS, GROUND_NORMAL_MIN_Y, MAX_FRAME_DT,
    MAX_SUBSTEP_DT, MAX_SUBSTEPS, YAW_EPS,
};
pub use utils::{planar_distance_sq, to_planar, yaw_from_xz};
