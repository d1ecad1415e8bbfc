use crate::collision::Vec3;

/// Point-mass body driven by the character controller.
///
/// Bodies carry no orientation and receive no torque. `on_ground` is derived:
/// [`crate::resolve_collisions`] clears it at the start of every call and only a
/// supporting contact from that same call sets it again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// World-space position of the capsule center (meters).
    pub position: Vec3,
    /// World-space velocity (m/s).
    pub velocity: Vec3,
    /// Acceleration accumulated for the current step (m/s^2).
    /// Cleared by [`integrate_body`].
    pub acceleration: Vec3,
    /// Reserved for force-based input; not used by the integrator.
    pub mass: f32,
    /// Multiplier on the global gravity magnitude.
    pub gravity_scale: f32,
    /// Whether the last collision pass found walkable support.
    pub on_ground: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            mass: 1.0,
            gravity_scale: 1.0,
            on_ground: false,
        }
    }
}

impl RigidBody {
    #[inline]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    #[inline]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Add to the acceleration accumulator. Consumed by the next integration step.
    #[inline]
    pub fn add_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration += acceleration;
    }

    /// Magnitude of the horizontal (XZ) velocity.
    #[inline]
    pub fn planar_speed(&self) -> f32 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }
}

/// Y-aligned capsule attached to a [`RigidBody`].
///
/// `half_height` is the half-length of the inner segment (aligned with +Y),
/// so the total capsule height is 2*half_height + 2*radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleCollider {
    pub radius: f32,
    pub half_height: f32,
}

impl CapsuleCollider {
    #[inline]
    pub const fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    #[inline]
    pub fn total_height(&self) -> f32 {
        2.0 * (self.half_height + self.radius)
    }

    /// Distance from the capsule center down to its lowest point.
    /// A capsule resting on a flat floor at `y = 0` has its center at this height.
    #[inline]
    pub fn foot_offset(&self) -> f32 {
        self.half_height + self.radius
    }
}

/// Advance `body` by `dt` seconds (semi-implicit Euler).
///
/// Order: accumulated acceleration, then gravity (scaled by `gravity_scale`,
/// pulling toward -Y), then position from the updated velocity. The
/// acceleration accumulator is zeroed afterwards.
///
/// `dt` is taken as-is; a zero or negative value yields a no-op or reversed step.
#[inline]
pub fn integrate_body(body: &mut RigidBody, dt: f32, gravity: f32) {
    body.velocity += body.acceleration * dt;
    body.velocity.y -= gravity * body.gravity_scale * dt;
    body.position += body.velocity * dt;
    body.acceleration = Vec3::zeros();
}

/// Launch the body upward if it currently has ground support.
///
/// Clears `on_ground` so the planar inertia model switches to air constants
/// until the next resolver pass finds support again.
pub fn try_jump(body: &mut RigidBody, speed: f32) -> bool {
    if !body.on_ground {
        return false;
    }

    body.velocity.y = speed;
    body.on_ground = false;
    true
}
