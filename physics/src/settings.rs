/*!
Simulation settings and tolerances.

These constants centralize the defaults used by the integrator, the planar
inertia model, the capsule-vs-box resolver, the two-bone IK solver and the
per-frame step pipeline. Every config struct in the crate builds its
`Default` from the values below, so tuning happens in one place.

Notes
- Distances are in meters, time in seconds.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

/// Gravity magnitude in meters per second squared (positive value).
/// The sandbox scene uses a snappier value than Earth gravity.
pub const DEFAULT_GRAVITY: f32 = 18.0;

/// Maximum planar (XZ) speed reached at full input strength (m/s).
pub const DEFAULT_MAX_SPEED: f32 = 5.0;

/// Rate at which planar velocity approaches its target while grounded (1/s).
pub const DEFAULT_GROUND_ACCELERATION: f32 = 28.0;

/// Rate at which planar velocity approaches its target while airborne (1/s).
pub const DEFAULT_AIR_ACCELERATION: f32 = 10.0;

/// Exponential decay rate of planar velocity with no input while grounded (1/s).
pub const DEFAULT_GROUND_DRAG: f32 = 14.0;

/// Exponential decay rate of planar velocity with no input while airborne (1/s).
pub const DEFAULT_AIR_DRAG: f32 = 2.5;

/// Number of resolver passes over the collider list per call.
pub const DEFAULT_RESOLVE_ITERATIONS: u32 = 3;

/// Minimum Y component of a contact normal for it to count as ground support.
/// 0.5 corresponds to surfaces tilted up to 60 degrees from horizontal.
pub const GROUND_NORMAL_MIN_Y: f32 = 0.5;

/// IK convergence threshold on the end-effector distance to the target (meters).
pub const DEFAULT_IK_TOLERANCE: f32 = 0.001;

/// Maximum number of backward/forward reaching passes per IK solve.
pub const DEFAULT_IK_ITERATIONS: u32 = 8;

/// Largest frame delta accepted by the step pipeline (seconds).
/// Longer frames (e.g. after the host was suspended) are truncated to this.
pub const MAX_FRAME_DT: f32 = 0.125;

/// Largest substep the step pipeline integrates in one go (seconds).
pub const MAX_SUBSTEP_DT: f32 = 1.0 / 60.0;

/// Upper bound on substeps per frame. Frames that would need more use longer substeps.
pub const MAX_SUBSTEPS: u32 = 64;

/// Upward speed applied by a jump (m/s).
pub const DEFAULT_JUMP_SPEED: f32 = 7.0;

/// Practical small distance for comparisons (meters).
/// Use for normalization guards and zero-length checks.
pub const DIST_EPS: f32 = 1.0e-6;

/// Minimum planar motion required to derive a facing direction.
pub const YAW_EPS: f32 = 1.0e-6;
