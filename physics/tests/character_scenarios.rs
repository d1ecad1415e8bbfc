use physics::{
    CapsuleCollider, ColliderTransform, IkOptions, Mat4, Quat, ResolveOptions, RigidBody,
    StaticCollider, StepConfig, TwoBoneChain, Vec3, integrate_body, resolve_collisions,
    step_character, try_jump,
};

const CAPSULE: CapsuleCollider = CapsuleCollider::new(0.3, 0.6);
const FRAME: f32 = 1.0 / 60.0;

fn floor(half: f32) -> StaticCollider {
    StaticCollider::world_box(Vec3::new(-half, -1.0, -half), Vec3::new(half, 0.0, half))
}

fn settle(body: &mut RigidBody, colliders: &[StaticCollider]) {
    for _ in 0..60 {
        step_character(body, &CAPSULE, colliders, Vec3::zeros(), FRAME, &StepConfig::default());
    }
}

#[test]
fn body_settles_on_floor() {
    let colliders = [floor(5.0)];
    let mut body = RigidBody::new(Vec3::new(0.0, 1.0, 0.0));

    for _ in 0..60 {
        integrate_body(&mut body, 0.016, 18.0);
        resolve_collisions(&mut body, &CAPSULE, &colliders, &ResolveOptions::default());
    }

    assert!((body.position.y - CAPSULE.foot_offset()).abs() < 1.0e-4);
    assert!(body.on_ground);
    assert_eq!(body.velocity.y, 0.0);
    assert_eq!(body.position.x, 0.0);
    assert_eq!(body.position.z, 0.0);
}

#[test]
fn step_pipeline_settles_like_manual_loop() {
    let colliders = [floor(5.0)];
    let mut body = RigidBody::new(Vec3::new(0.0, 1.0, 0.0));

    let mut last = None;
    for _ in 0..60 {
        last = Some(step_character(
            &mut body,
            &CAPSULE,
            &colliders,
            Vec3::zeros(),
            0.016,
            &StepConfig::default(),
        ));
    }

    let report = last.expect("ran frames");
    assert_eq!(report.substeps, 1);
    assert!(report.is_grounded);
    assert!(report.contacts.ground_contacts >= 1);
    assert!(report.facing.is_none());
    assert!((body.position.y - CAPSULE.foot_offset()).abs() < 1.0e-4);
}

#[test]
fn long_stall_does_not_tunnel_through_thin_floor() {
    let thin = [StaticCollider::world_box(
        Vec3::new(-5.0, -0.05, -5.0),
        Vec3::new(5.0, 0.0, 5.0),
    )];
    let mut body = RigidBody::new(Vec3::new(0.0, CAPSULE.foot_offset(), 0.0));
    settle(&mut body, &thin);

    let config = StepConfig::default();
    let report = step_character(&mut body, &CAPSULE, &thin, Vec3::zeros(), 10.0, &config);

    assert_eq!(report.dt, config.max_frame_dt);
    assert!(report.substeps > 1);
    assert!(body.on_ground);
    assert!((body.position.y - CAPSULE.foot_offset()).abs() < 1.0e-3);
}

#[test]
fn walking_into_wall_slides_along_it() {
    let wall = StaticCollider::world_box(Vec3::new(1.0, 0.0, -20.0), Vec3::new(2.0, 3.0, 20.0));
    let colliders = [floor(20.0), wall];
    let mut body = RigidBody::new(Vec3::new(0.0, CAPSULE.foot_offset(), 0.0));
    settle(&mut body, &colliders);

    let intent = Vec3::new(1.0, 0.0, 1.0);
    let mut wall_contacts = 0;
    for _ in 0..120 {
        let report =
            step_character(&mut body, &CAPSULE, &colliders, intent, FRAME, &StepConfig::default());
        wall_contacts += report.contacts.contacts - report.contacts.ground_contacts;
        assert!(body.position.x <= 1.0 - CAPSULE.radius + 1.0e-3);
    }

    assert!(wall_contacts > 0);
    assert!(body.on_ground);
    assert!(body.position.z > 3.0);
    assert!(body.velocity.x.abs() < 1.0e-3);
}

#[test]
fn jump_leaves_ground_and_lands_again() {
    let colliders = [floor(5.0)];
    let mut body = RigidBody::new(Vec3::new(0.0, CAPSULE.foot_offset(), 0.0));
    settle(&mut body, &colliders);
    assert!(body.on_ground);

    assert!(try_jump(&mut body, 7.0));

    let mut peak = body.position.y;
    let mut airborne_frames = 0;
    for _ in 0..90 {
        let report = step_character(
            &mut body,
            &CAPSULE,
            &colliders,
            Vec3::zeros(),
            FRAME,
            &StepConfig::default(),
        );
        peak = peak.max(body.position.y);
        if !report.is_grounded {
            airborne_frames += 1;
        }
    }

    // v^2 / 2g above the resting height, give or take integration error.
    assert!(peak > CAPSULE.foot_offset() + 1.2);
    assert!(airborne_frames > 30);
    assert!(body.on_ground);
    assert!((body.position.y - CAPSULE.foot_offset()).abs() < 1.0e-3);
}

#[test]
fn walking_off_a_ledge_falls_to_lower_floor() {
    let colliders = [
        StaticCollider::world_box(Vec3::new(-2.0, 1.0, -2.0), Vec3::new(2.0, 2.0, 2.0)),
        StaticCollider::world_box(Vec3::new(-20.0, -1.0, -20.0), Vec3::new(20.0, 0.0, 20.0)),
    ];
    let mut body = RigidBody::new(Vec3::new(0.0, 2.0 + CAPSULE.foot_offset(), 0.0));
    settle(&mut body, &colliders);
    assert!((body.position.y - (2.0 + CAPSULE.foot_offset())).abs() < 1.0e-3);

    for _ in 0..180 {
        step_character(&mut body, &CAPSULE, &colliders, Vec3::z(), FRAME, &StepConfig::default());
    }

    assert!(body.position.z > 2.0 + CAPSULE.radius);
    assert!(body.on_ground);
    assert!((body.position.y - CAPSULE.foot_offset()).abs() < 1.0e-3);
}

#[test]
fn rotated_ramp_supports_body() {
    let rotation = Quat::from_axis_angle(&Vec3::x_axis(), 20.0_f32.to_radians());
    let ramp = StaticCollider::cuboid_from_pose(Vec3::new(4.0, 0.5, 4.0), Vec3::zeros(), rotation);
    let up = rotation * Vec3::y();
    let mut body = RigidBody::new(up * (0.5 + CAPSULE.foot_offset() + 0.05));

    for _ in 0..30 {
        step_character(&mut body, &CAPSULE, &[ramp], Vec3::zeros(), FRAME, &StepConfig::default());
    }

    assert!(body.on_ground);
    // Resting on the ramp surface, not inside it.
    let local_height = body.position.dot(&up);
    assert!(local_height > 0.5 + CAPSULE.foot_offset() - 0.01);
}

#[test]
fn stretched_crate_stops_body_at_its_world_face() {
    // Unit crate stretched to two meters on X: world extent x 2..4.
    let matrix = Mat4::new_translation(&Vec3::new(3.0, 0.5, 0.0))
        * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 1.0));
    let crate_box = StaticCollider::local_box(
        Vec3::repeat(-0.5),
        Vec3::repeat(0.5),
        ColliderTransform::from_matrix(matrix).expect("invertible"),
    );
    let colliders = [floor(20.0), crate_box];
    let mut body = RigidBody::new(Vec3::new(0.0, CAPSULE.foot_offset(), 0.0));
    settle(&mut body, &colliders);

    for _ in 0..120 {
        step_character(&mut body, &CAPSULE, &colliders, Vec3::x(), FRAME, &StepConfig::default());
    }

    let surface = 2.0 - CAPSULE.radius;
    assert!(body.position.x <= surface + 1.0e-3);
    assert!(body.position.x > surface - 1.0e-2);
    assert!(body.on_ground);
}

#[test]
fn body_lands_on_zero_thickness_floor() {
    let sheet = [StaticCollider::world_box(
        Vec3::new(-5.0, 0.0, -5.0),
        Vec3::new(5.0, 0.0, 5.0),
    )];
    let mut body = RigidBody::new(Vec3::new(0.0, 1.5, 0.0));

    settle(&mut body, &sheet);

    assert!(body.on_ground);
    assert!((body.position.y - CAPSULE.foot_offset()).abs() < 1.0e-3);
}

#[test]
fn arm_chain_follows_body_and_reaches_target() {
    let colliders = [floor(5.0)];
    let mut body = RigidBody::new(Vec3::new(0.0, CAPSULE.foot_offset(), 0.0));
    let shoulder_offset = Vec3::new(0.3, 0.4, 0.0);
    let mut arm = TwoBoneChain::build(body.position + shoulder_offset, 0.35, 0.3);

    for frame in 0..60 {
        step_character(&mut body, &CAPSULE, &colliders, Vec3::x(), FRAME, &StepConfig::default());
        arm.move_root_to(body.position + shoulder_offset);

        let t = frame as f32 * FRAME;
        let target = arm.root() + Vec3::new(0.3, -0.2 + 0.1 * t.sin(), 0.2);
        let report = arm.solve(&target, &IkOptions::default());

        assert!(!report.out_of_reach);
        assert!(report.error <= IkOptions::default().tolerance);
        assert!(((arm.mid() - arm.root()).norm() - 0.35).abs() < 1.0e-4);
        assert!(((arm.end() - arm.mid()).norm() - 0.3).abs() < 1.0e-4);
    }
}
