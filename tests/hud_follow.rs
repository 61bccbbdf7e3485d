use glam::Vec3;
use vr_workbench::hud::{HudFollower, TrackingConfidence, TrackingGuard};
use vr_workbench::surface::Pose;

const DELTA: f32 = 0.1;

fn settled_follower(at: Vec3) -> (HudFollower, TrackingGuard) {
    let mut follower = HudFollower::new(1.6, 0.0);
    let mut guard = TrackingGuard::new();
    let gate = guard.gate(TrackingConfidence::High);
    follower.update(&Pose::from_position(at), gate, DELTA);
    (follower, guard)
}

fn track(follower: &mut HudFollower, guard: &mut TrackingGuard, head: Vec3) -> bool {
    let gate = guard.gate(TrackingConfidence::High);
    follower.update(&Pose::from_position(head), gate, DELTA)
}

#[test]
fn small_drift_does_not_start_motion() {
    let rest = Vec3::new(0.0, 1.6, 0.0);
    let (mut follower, mut guard) = settled_follower(rest);
    assert_eq!(follower.pivot().position, rest);

    let changed = track(&mut follower, &mut guard, rest + Vec3::new(0.15, 0.0, 0.0));
    assert!(!changed, "0.15 is inside the 0.2 start threshold");
    assert_eq!(follower.pivot().position, rest);
    assert!(!follower.is_moving());
}

#[test]
fn large_drift_starts_motion_and_settles_within_a_centimeter() {
    let rest = Vec3::new(0.0, 1.6, 0.0);
    let (mut follower, mut guard) = settled_follower(rest);

    let target = rest + Vec3::new(0.25, 0.0, 0.0);
    let changed = track(&mut follower, &mut guard, target);
    assert!(changed, "0.25 exceeds the start threshold");
    assert!(follower.is_moving());
    let first_step = follower.pivot().position;
    assert!(first_step.distance(rest) > 0.0);
    assert!(first_step.distance(target) > 0.01, "one lerp step must not teleport");

    // Keep the head still: the pivot keeps easing in even while the
    // remaining distance is far below the 0.2 start threshold.
    let mut ticks = 0;
    while follower.is_moving() {
        track(&mut follower, &mut guard, target);
        ticks += 1;
        assert!(ticks < 10_000, "pivot never settled");
    }
    assert!(follower.pivot().position.distance(target) <= 0.01 + 1e-4);

    // Once settled, sub-threshold drift is ignored again.
    let rest2 = follower.pivot().position;
    let changed = track(&mut follower, &mut guard, target + Vec3::new(0.1, 0.0, 0.0));
    assert!(!changed);
    assert_eq!(follower.pivot().position, rest2);
}

#[test]
fn tracking_loss_freezes_and_resume_snaps_exactly() {
    let start = Vec3::new(0.0, 1.6, 0.0);
    let (mut follower, mut guard) = settled_follower(start);

    // Confidence gone: the head wanders but the HUD must not.
    for _ in 0..10 {
        let gate = guard.gate(TrackingConfidence::None);
        let changed =
            follower.update(&Pose::from_position(Vec3::new(3.0, 0.3, -2.0)), gate, DELTA);
        assert!(!changed);
        assert_eq!(follower.pivot().position, start);
    }

    // First tracked tick snaps to the new anchor with no interpolation.
    let resumed = Vec3::new(0.4, 1.8, -0.2);
    let gate = guard.gate(TrackingConfidence::High);
    follower.update(&Pose::from_position(resumed), gate, DELTA);
    assert_eq!(follower.pivot().position, resumed);
    assert!(!follower.is_moving());
    assert!(!follower.is_centering());
}

#[test]
fn resume_clamps_to_minimum_height() {
    let mut follower = HudFollower::new(1.6, 0.0);
    let mut guard = TrackingGuard::new();
    let gate = guard.gate(TrackingConfidence::High);
    follower.update(&Pose::from_position(Vec3::new(0.0, 0.1, 0.0)), gate, DELTA);
    assert_eq!(follower.pivot().position, Vec3::new(0.0, 0.5, 0.0));
}

#[test]
fn vertical_offset_shifts_the_anchor() {
    let mut follower = HudFollower::new(1.6, -0.25);
    let mut guard = TrackingGuard::new();
    let gate = guard.gate(TrackingConfidence::High);
    follower.update(&Pose::from_position(Vec3::new(0.0, 1.8, 0.0)), gate, DELTA);
    assert!((follower.pivot().position.y - 1.55).abs() < 1e-6);
}
