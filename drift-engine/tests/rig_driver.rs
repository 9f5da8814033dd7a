use approx::assert_abs_diff_eq;
use drift_core::math::{Quat, Vec3};
use drift_engine::{Animator, CdsTween, Driver, EngineError, Pose, Rig, RigConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};

const DT: f32 = 1.0 / 60.0;

fn render(config: RigConfig, frames: usize) -> Vec<Pose> {
    let mut driver = Driver::new(Rig::new(config).unwrap());
    let mut out = Vec::with_capacity(frames);
    driver.run(frames, 60.0, |_, pose| out.push(pose));
    out
}

#[test]
fn same_config_renders_identically() {
    let mut rng = StdRng::seed_from_u64(0xD1F7);
    for _ in 0..8 {
        let config = RigConfig::default().with_seed(rng.gen());
        assert_eq!(render(config, 120), render(config, 120));
    }
}

#[test]
fn preset_roundtrips_through_json() {
    let config = RigConfig { origin: Vec3::new(0.0, 1.5, 0.0), ..RigConfig::default() }.with_seed(9);
    let json = serde_json::to_string_pretty(&config).unwrap();
    let back: RigConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn partial_preset_takes_defaults() {
    let json = r#"{ "position_spring": { "speed": 12.0 }, "rotation_smoothing": {} }"#;
    let config: RigConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.position_spring.speed, 12.0);
    assert_eq!(config.rotation_smoothing.speed, 5.0);
    assert_eq!(config.position_noise, RigConfig::default().position_noise);
}

#[test]
fn invalid_preset_is_a_config_error() {
    let json = r#"{ "position_spring": { "speed": -2.0 } }"#;
    let config: RigConfig = serde_json::from_str(json).unwrap();
    match Rig::new(config) {
        Err(EngineError::Config(msg)) => assert!(msg.contains("position_spring.speed")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn driver_clock_matches_frames() {
    let mut driver = Driver::new(Rig::new(RigConfig::default()).unwrap());
    let mut last = 0;
    driver.run(90, 30.0, |i, _| last = i);
    assert_eq!(last, 90);
    assert_abs_diff_eq!(driver.elapsed(), 3.0, epsilon = 1e-4);
}

#[test]
fn bad_frames_do_not_move_the_rig() {
    let mut driver = Driver::new(Rig::new(RigConfig::default()).unwrap());
    let rest = driver.animator().pose();
    for dt in [f32::NAN, -0.5, f32::INFINITY] {
        let p = driver.tick(dt);
        assert_eq!(p.position, rest.position);
        assert_abs_diff_eq!(p.rotation.dot(rest.rotation).abs(), 1.0, epsilon = 1e-6);
    }
    assert_eq!(driver.elapsed(), 0.0);
}

#[test]
fn silent_noise_holds_the_origin() {
    let mut config = RigConfig { origin: Vec3::new(2.0, 0.0, -1.0), ..RigConfig::default() };
    config.position_noise.octaves = 0;
    config.rotation_noise.octaves = 0;
    for pose in render(config, 60) {
        assert_abs_diff_eq!(pose.position.x, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pose.position.z, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pose.rotation.dot(Quat::IDENTITY).abs(), 1.0, epsilon = 1e-6);
    }
}

#[test]
fn spring_node_outlives_a_rig_swap() {
    let mut follower = CdsTween::<Vec3>::default();
    let mut driver = Driver::new(Rig::new(RigConfig::default()).unwrap());
    for _ in 0..30 {
        let pose = driver.tick(DT);
        follower.follow(pose.position, DT);
    }
    driver.swap(Rig::new(RigConfig::default().with_seed(5)).unwrap());
    assert_eq!(driver.ticks(), 30);
    assert!(follower.value().is_some());
    let mut fresh = driver.animator().clone();
    fresh.reset();
    assert_eq!(fresh.pose().position, Vec3::ZERO);
}
