use nalgebra as na;

use crate::{
    CapsuleCollider, RigidBody,
    body::integrate_body,
    collision::{ContactSummary, Quat, ResolveOptions, StaticCollider, Vec3, resolve_collisions},
    settings::{
        DEFAULT_AIR_ACCELERATION, DEFAULT_AIR_DRAG, DEFAULT_GRAVITY, DEFAULT_GROUND_ACCELERATION,
        DEFAULT_GROUND_DRAG, DEFAULT_MAX_SPEED, MAX_FRAME_DT, MAX_SUBSTEP_DT, MAX_SUBSTEPS,
    },
    utils::{to_planar, yaw_from_xz},
};

/// Tuning for [`apply_planar_inertia`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaConfig {
    /// Planar speed at full input strength (m/s).
    pub max_speed: f32,
    /// Approach rate toward the target velocity while grounded (1/s).
    pub ground_acceleration: f32,
    /// Approach rate toward the target velocity while airborne (1/s).
    pub air_acceleration: f32,
    /// Decay rate of planar velocity without input while grounded (1/s).
    pub ground_drag: f32,
    /// Decay rate of planar velocity without input while airborne (1/s).
    pub air_drag: f32,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            ground_acceleration: DEFAULT_GROUND_ACCELERATION,
            air_acceleration: DEFAULT_AIR_ACCELERATION,
            ground_drag: DEFAULT_GROUND_DRAG,
            air_drag: DEFAULT_AIR_DRAG,
        }
    }
}

/// Blend the body's planar (XZ) velocity toward the movement intention.
///
/// - Only the X and Z components of `move_direction` are read. Its length is the
///   input strength, capped at 1, so analog input below full tilt walks slower.
/// - With input, velocity moves toward `direction * max_speed * strength` by a
///   fraction `min(1, acceleration * dt)` of the remaining gap. The fraction
///   saturates at 1, so the target is never overshot.
/// - Without input, velocity decays by `exp(-drag * dt)` and never changes sign.
/// - Ground or air constants are picked from `body.on_ground`.
///
/// `velocity.y` is left untouched.
pub fn apply_planar_inertia(
    body: &mut RigidBody,
    move_direction: Vec3,
    dt: f32,
    config: &InertiaConfig,
) {
    let planar = to_planar(&move_direction);
    let length = planar.norm();
    let length = if length.is_finite() { length } else { 0.0 };
    let input_strength = length.min(1.0);

    if input_strength > 0.0 {
        let target = planar / length * (config.max_speed * input_strength);
        let acceleration = if body.on_ground {
            config.ground_acceleration
        } else {
            config.air_acceleration
        };

        let step = (acceleration * dt).min(1.0);
        body.velocity.x += (target.x - body.velocity.x) * step;
        body.velocity.z += (target.y - body.velocity.z) * step;
    } else {
        let drag = if body.on_ground {
            config.ground_drag
        } else {
            config.air_drag
        };

        let decay = (-drag * dt).exp();
        body.velocity.x *= decay;
        body.velocity.z *= decay;
    }
}

/// Parameters for one [`step_character`] frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepConfig {
    /// Gravity magnitude (m/s^2, pulls toward -Y).
    pub gravity: f32,
    pub inertia: InertiaConfig,
    pub resolve: ResolveOptions,
    /// Frame deltas above this are truncated (seconds).
    pub max_frame_dt: f32,
    /// The frame is split into equal substeps no longer than this (seconds).
    pub max_substep: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            inertia: InertiaConfig::default(),
            resolve: ResolveOptions::default(),
            max_frame_dt: MAX_FRAME_DT,
            max_substep: MAX_SUBSTEP_DT,
        }
    }
}

/// Output of a single `step_character()` frame.
#[derive(Clone, Copy, Debug)]
pub struct StepReport {
    /// Simulated time after sanitizing and clamping the frame delta (seconds).
    pub dt: f32,
    /// Number of inertia/integrate/resolve substeps run.
    pub substeps: u32,
    /// Contacts accumulated over all substeps.
    pub contacts: ContactSummary,
    /// Whether the last resolver pass found walkable support.
    pub is_grounded: bool,
    /// Planar speed after the frame (m/s).
    pub planar_speed: f32,
    /// Yaw-only rotation facing the movement intention, if there was one.
    ///
    /// If `None`, callers should keep the current rotation as-is.
    pub facing: Option<Quat>,
}

/// Advance a capsule character by one frame.
///
/// Behavior
/// - Non-finite or negative `frame_dt` is treated as zero; larger than
///   `max_frame_dt` is truncated, so a long stall cannot tunnel through floors.
/// - The remaining time is split into equal substeps of at most `max_substep`.
/// - Each substep runs planar inertia, integration and collision resolution,
///   in that order.
pub fn step_character(
    body: &mut RigidBody,
    capsule: &CapsuleCollider,
    colliders: &[StaticCollider],
    intent: Vec3,
    frame_dt: f32,
    config: &StepConfig,
) -> StepReport {
    let dt = clamp_frame_dt(frame_dt, config.max_frame_dt);
    let substeps = substep_count(dt, config.max_substep);
    let mut contacts = ContactSummary::default();

    if substeps > 0 {
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            apply_planar_inertia(body, intent, h, &config.inertia);
            integrate_body(body, h, config.gravity);
            contacts.merge(&resolve_collisions(body, capsule, colliders, &config.resolve));
        }
    }

    StepReport {
        dt,
        substeps,
        contacts,
        is_grounded: body.on_ground,
        planar_speed: body.planar_speed(),
        facing: yaw_from_planar_delta(intent),
    }
}

#[inline]
fn clamp_frame_dt(frame_dt: f32, max_frame_dt: f32) -> f32 {
    if !frame_dt.is_finite() || frame_dt <= 0.0 {
        return 0.0;
    }

    if max_frame_dt > 0.0 && frame_dt > max_frame_dt {
        log::debug!("frame dt {frame_dt:.4}s clamped to {max_frame_dt:.4}s");
        return max_frame_dt;
    }

    frame_dt
}

#[inline]
fn substep_count(dt: f32, max_substep: f32) -> u32 {
    if dt <= 0.0 {
        return 0;
    }
    if !(max_substep > 0.0) {
        return 1;
    }

    // Small slack so a frame of exactly `max_substep` (plus rounding) stays one substep.
    let wanted = (dt / max_substep - 1.0e-3).ceil().max(1.0);
    if wanted > MAX_SUBSTEPS as f32 {
        log::debug!("frame dt {dt:.4}s needs {wanted} substeps, capped at {MAX_SUBSTEPS}");
        return MAX_SUBSTEPS;
    }

    let n = wanted as u32;
    if n > 1 {
        log::trace!("frame dt {dt:.4}s split into {n} substeps");
    }
    n
}

/// Compute a yaw-only rotation (about +Y) that faces `delta`'s planar part.
///
/// Returns `None` if the planar delta is too small.
#[inline]
pub fn yaw_from_planar_delta(delta: Vec3) -> Option<Quat> {
    let yaw = yaw_from_xz(to_planar(&delta))?;

    Some(na::UnitQuaternion::from_axis_angle(
        &na::Vector3::y_axis(),
        yaw,
    ))
}
