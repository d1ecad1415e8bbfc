//! Two-bone inverse kinematics.
//!
//! The solver works on exactly three joints (root, mid, end). Targets beyond
//! the chain's reach get the closed-form stretched pose; reachable targets are
//! approached with backward/forward reaching passes that keep both bone
//! lengths fixed and the root anchored.

use crate::{
    PhysicsError,
    collision::Vec3,
    settings::{DEFAULT_IK_ITERATIONS, DEFAULT_IK_TOLERANCE},
};

const CHAIN_JOINTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IkOptions {
    /// Stop once the end effector is this close to the target (meters).
    pub tolerance: f32,
    /// Upper bound on reaching passes.
    pub iterations: u32,
}

impl Default for IkOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_IK_TOLERANCE,
            iterations: DEFAULT_IK_ITERATIONS,
        }
    }
}

/// Result of a solve. The joints have also been written back to the caller's storage.
#[derive(Clone, Copy, Debug)]
pub struct IkReport {
    /// Solved root, mid and end positions.
    pub joints: [Vec3; 3],
    /// True when the target was at or beyond full extension.
    pub out_of_reach: bool,
    /// Reaching passes run (0 for the stretched pose).
    pub iterations: u32,
    /// Final distance from the end effector to the target (meters).
    pub error: f32,
}

/// Solve a two-bone chain stored in `joints` toward `target`, in place.
///
/// Bone lengths are measured from the incoming pose on every call, so pass the
/// previous solution (or any pose with the intended lengths).
///
/// Fails with [`PhysicsError::InvalidChain`] unless `joints` holds exactly three
/// positions; `joints` is left untouched in that case.
pub fn solve_ik(
    joints: &mut [Vec3],
    target: &Vec3,
    options: &IkOptions,
) -> Result<IkReport, PhysicsError> {
    let found = joints.len();
    let chain: &mut [Vec3; CHAIN_JOINTS] =
        joints.try_into().map_err(|_| PhysicsError::InvalidChain {
            expected: CHAIN_JOINTS,
            found,
        })?;

    Ok(solve_two_bone(chain, target, options))
}

fn solve_two_bone(joints: &mut [Vec3; 3], target: &Vec3, options: &IkOptions) -> IkReport {
    let [root, mut mid, mut end] = *joints;

    let length_a = (mid - root).norm();
    let length_b = (end - mid).norm();
    let max_reach = length_a + length_b;

    let to_target = target - root;
    if to_target.norm() >= max_reach {
        let dir = direction(to_target);
        mid = root + dir * length_a;
        end = root + dir * max_reach;
        *joints = [root, mid, end];

        return IkReport {
            joints: *joints,
            out_of_reach: true,
            iterations: 0,
            error: (end - target).norm(),
        };
    }

    let mut iterations = 0;
    for _ in 0..options.iterations {
        iterations += 1;

        // Backward: pin the end effector on the target.
        end = *target;
        mid = end + direction(mid - end) * length_b;

        // Forward: re-anchor at the root.
        mid = root + direction(mid - root) * length_a;
        end = mid + direction(end - mid) * length_b;

        if (end - target).norm() <= options.tolerance {
            break;
        }
    }

    *joints = [root, mid, end];
    IkReport {
        joints: *joints,
        out_of_reach: false,
        iterations,
        error: (end - target).norm(),
    }
}

/// Unit direction of `v`, or zero for a zero-length vector.
#[inline]
fn direction(v: Vec3) -> Vec3 {
    v.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
}

/// A root/mid/end chain with bone lengths fixed at build time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoBoneChain {
    joints: [Vec3; 3],
    length_a: f32,
    length_b: f32,
}

impl TwoBoneChain {
    /// Chain hanging straight down (-Y) from `root`.
    pub fn build(root: Vec3, length_a: f32, length_b: f32) -> Self {
        let mid = Vec3::new(root.x, root.y - length_a, root.z);
        let end = Vec3::new(root.x, root.y - (length_a + length_b), root.z);
        Self {
            joints: [root, mid, end],
            length_a,
            length_b,
        }
    }

    /// Chain from an explicit pose; bone lengths are measured from it.
    pub fn from_joints(joints: &[Vec3]) -> Result<Self, PhysicsError> {
        let joints: [Vec3; CHAIN_JOINTS] =
            joints.try_into().map_err(|_| PhysicsError::InvalidChain {
                expected: CHAIN_JOINTS,
                found: joints.len(),
            })?;

        Ok(Self {
            length_a: (joints[1] - joints[0]).norm(),
            length_b: (joints[2] - joints[1]).norm(),
            joints,
        })
    }

    #[inline]
    pub fn joints(&self) -> &[Vec3; 3] {
        &self.joints
    }

    #[inline]
    pub fn root(&self) -> Vec3 {
        self.joints[0]
    }

    #[inline]
    pub fn mid(&self) -> Vec3 {
        self.joints[1]
    }

    #[inline]
    pub fn end(&self) -> Vec3 {
        self.joints[2]
    }

    #[inline]
    pub fn length_a(&self) -> f32 {
        self.length_a
    }

    #[inline]
    pub fn length_b(&self) -> f32 {
        self.length_b
    }

    #[inline]
    pub fn max_reach(&self) -> f32 {
        self.length_a + self.length_b
    }

    /// Translate the whole chain so its root sits at `root`.
    pub fn move_root_to(&mut self, root: Vec3) {
        let delta = root - self.joints[0];
        for joint in &mut self.joints {
            *joint += delta;
        }
    }

    /// Solve toward `target`, updating the stored pose.
    pub fn solve(&mut self, target: &Vec3, options: &IkOptions) -> IkReport {
        solve_two_bone(&mut self.joints, target, options)
    }
}
