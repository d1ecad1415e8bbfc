mod scene;

use clap::Parser;
use physics::{
    CapsuleCollider, DEFAULT_GRAVITY, DEFAULT_JUMP_SPEED, IkOptions, Quat, RigidBody,
    StepConfig, StepReport, TwoBoneChain, Vec3, planar_distance_sq, step_character, try_jump,
};
use tracing::{debug, info, warn};

use crate::scene::{SPAWN, Scene, rotate_planar};

#[derive(Parser, Debug)]
#[command(name = "sandbox")]
#[command(about = "Headless character controller sandbox", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(long, env = "SANDBOX_FRAMES", default_value_t = 600)]
    frames: u32,

    /// Frame delta in seconds
    #[arg(long, env = "SANDBOX_DT", default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Downward acceleration (m/s^2)
    #[arg(long, env = "SANDBOX_GRAVITY", default_value_t = DEFAULT_GRAVITY)]
    gravity: f32,

    /// Movement intent along X
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    move_x: f32,

    /// Movement intent along Z
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    move_z: f32,

    /// Turn the intent about +Y at this rate (rad/s)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    turn_rate: f32,

    /// Frame at which to attempt a jump
    #[arg(long)]
    jump_at: Option<u32>,

    /// Replace this frame's delta with a long stall
    #[arg(long)]
    stall_at: Option<u32>,

    /// Log a status line every N frames (0 disables)
    #[arg(long, default_value_t = 30)]
    log_every: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

const CAPSULE: CapsuleCollider = CapsuleCollider::new(0.3, 0.6);
const SHOULDER_OFFSET: Vec3 = Vec3::new(0.35, 0.45, 0.0);
const UPPER_ARM: f32 = 0.32;
const FOREARM: f32 = 0.28;
const STALL_DT: f32 = 1.5;

/// One simulated character: body, collision shape and a reaching arm.
struct Character {
    body: RigidBody,
    arm: TwoBoneChain,
    facing: Quat,
}

impl Character {
    fn spawn(at: Vec3) -> Self {
        Self {
            body: RigidBody::new(at),
            arm: TwoBoneChain::build(at + SHOULDER_OFFSET, UPPER_ARM, FOREARM),
            facing: Quat::identity(),
        }
    }

    /// Hand target in front of the shoulder, swaying with time.
    fn reach_target(&self, time: f32) -> Vec3 {
        let forward = self.facing * Vec3::new(0.0, 0.0, -1.0);
        self.arm.root() + forward * 0.4 + Vec3::new(0.0, -0.15 + 0.1 * (time * 2.0).sin(), 0.0)
    }
}

#[derive(Debug, Default)]
struct RunStats {
    grounded_frames: u32,
    jumps: u32,
    contacts: usize,
    max_penetration: f32,
    unconverged_frames: u32,
    worst_ik_error: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let max_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(max_level).init();

    let scene = Scene::build()?;
    let (mins, maxs) = scene.bounds();
    info!(
        colliders = scene.colliders.len(),
        ?mins,
        ?maxs,
        "scene ready"
    );

    let stats = run(&args, &scene);

    info!(
        frames = args.frames,
        grounded_frames = stats.grounded_frames,
        jumps = stats.jumps,
        contacts = stats.contacts,
        max_penetration = stats.max_penetration,
        unconverged_frames = stats.unconverged_frames,
        worst_ik_error = stats.worst_ik_error,
        "run finished"
    );
    Ok(())
}

fn run(args: &Args, scene: &Scene) -> RunStats {
    let config = StepConfig {
        gravity: args.gravity,
        ..StepConfig::default()
    };
    let ik_options = IkOptions::default();
    let base_intent = Vec3::new(args.move_x, 0.0, args.move_z);

    let mut character = Character::spawn(SPAWN);
    let mut stats = RunStats::default();
    let mut time = 0.0_f32;

    for frame in 0..args.frames {
        let dt = if args.stall_at == Some(frame) {
            warn!(frame, dt = STALL_DT, "injecting stalled frame");
            STALL_DT
        } else {
            args.dt
        };

        if args.jump_at == Some(frame) {
            if try_jump(&mut character.body, DEFAULT_JUMP_SPEED) {
                stats.jumps += 1;
                debug!(frame, "jump");
            } else {
                debug!(frame, "jump ignored, not grounded");
            }
        }

        let intent = rotate_planar(base_intent, args.turn_rate * time);
        let report = step_character(
            &mut character.body,
            &CAPSULE,
            &scene.colliders,
            intent,
            dt,
            &config,
        );
        time += report.dt;

        if let Some(facing) = report.facing {
            character.facing = facing;
        }

        character.arm.move_root_to(character.body.position + SHOULDER_OFFSET);
        let target = character.reach_target(time);
        let ik = character.arm.solve(&target, &ik_options);

        record(&mut stats, &report, ik.error);

        if args.log_every > 0 && frame % args.log_every == 0 {
            let p = character.body.position;
            info!(
                frame,
                x = p.x,
                y = p.y,
                z = p.z,
                grounded = report.is_grounded,
                speed = report.planar_speed,
                substeps = report.substeps,
                contacts = report.contacts.contacts,
                travelled = planar_distance_sq(&SPAWN, &p).sqrt(),
                ik_error = ik.error,
                "tick"
            );
        }
    }

    stats
}

fn record(stats: &mut RunStats, report: &StepReport, ik_error: f32) {
    if report.is_grounded {
        stats.grounded_frames += 1;
    }
    if !report.contacts.converged {
        stats.unconverged_frames += 1;
    }
    stats.contacts += report.contacts.contacts;
    stats.max_penetration = stats.max_penetration.max(report.contacts.max_penetration);
    stats.worst_ik_error = stats.worst_ik_error.max(ik_error);
}
