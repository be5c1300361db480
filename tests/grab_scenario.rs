//! End-to-end pointer scenarios driven through the interaction harness.

use glam::{EulerRot, Vec3};
use handray_core::{math::planar_distance, EntityId, LayerMask};
use handray_interaction::{
    Interactable, InteractionState, RotateDraggable, RotateSettings, SelectableEvent,
    TranslateDraggable, TranslateSettings,
};
use handray_physics::Collider;
use handray_testkit::{frame, InteractionHarness, TrackingJitter};

const ORIGIN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const DT: f32 = 0.05;

fn hand_at(z: f32) -> Vec3 {
    Vec3::new(0.0, 1.0, z)
}

fn harness_with(interactable: Interactable) -> (InteractionHarness, EntityId) {
    let mut harness = InteractionHarness::default();
    let target = harness
        .spawn("target", Vec3::new(0.0, 1.0, 3.0), interactable)
        .expect("spawn target");
    (harness, target)
}

fn translate_target() -> Interactable {
    Interactable::selectable(Collider::sphere(0.5, LayerMask::INTERACTABLE).unwrap())
        .with_draggable(Box::new(TranslateDraggable::new(TranslateSettings::default())))
}

#[test]
fn hover_grab_pull_release() {
    let settings = TranslateSettings::default();
    let (mut h, target) = harness_with(translate_target());

    // One frame aimed at the target: hovering.
    h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.5), false, DT));
    assert_eq!(h.controller.state(), InteractionState::Hovering);
    assert_eq!(h.flags(target), Some((true, false)));

    // Pinch held for the hold time: grabbing.
    let hold = h.controller.settings().pinch_hold_time;
    let frames = (hold / DT).ceil() as usize;
    h.repeat(&frame(ORIGIN, Vec3::Z, hand_at(0.5), true, DT), frames);
    assert_eq!(h.controller.state(), InteractionState::Grabbing);
    assert_eq!(h.flags(target), Some((false, true)));

    let anchor = h.controller.grab_anchor(&h.scene).unwrap();
    let start = planar_distance(ORIGIN, anchor);
    assert!((start - 2.5).abs() < 1e-4);

    // Hand pulled in past the trigger: one step closer.
    h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.3), true, DT));
    let anchor = h.controller.grab_anchor(&h.scene).unwrap();
    let pulled = planar_distance(ORIGIN, anchor);
    assert!((start - pulled - settings.step(DT)).abs() < 1e-4);
    assert!((anchor.y - 1.0).abs() < 1e-5);

    // Keep pulling: clamped at the minimum.
    h.repeat(&frame(ORIGIN, Vec3::Z, hand_at(0.3), true, DT), 200);
    let anchor = h.controller.grab_anchor(&h.scene).unwrap();
    assert!((planar_distance(ORIGIN, anchor) - settings.min_pull_distance).abs() < 1e-4);

    // Release while still aimed: straight back to hovering.
    let report = h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.3), false, DT));
    assert_eq!(
        report.transition,
        Some((InteractionState::Grabbing, InteractionState::Hovering))
    );
    assert_eq!(
        report.events,
        vec![(target, SelectableEvent::Unselect), (target, SelectableEvent::HoverEnter)]
    );
    assert_eq!(h.controller.state(), InteractionState::Hovering);
    assert_eq!(h.flags(target), Some((true, false)));

    // The object kept its new place and went back under the world root.
    let root = h.scene.root();
    assert_eq!(h.scene.graph().parent(target).unwrap(), Some(root));
    let position = h.scene.graph().world_position(target).unwrap();
    assert!((position.z - 1.0).abs() < 1e-3);
}

#[test]
fn turning_the_head_orbits_the_held_object() {
    let (mut h, target) = harness_with(translate_target());
    h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.5), false, DT));
    h.repeat(&frame(ORIGIN, Vec3::Z, hand_at(0.5), true, DT), 2);
    assert_eq!(h.controller.grabbed(), Some(target));

    let turned = Vec3::new(1.0, 0.0, 1.0).normalize();
    h.repeat(&frame(ORIGIN, turned, hand_at(0.5), true, DT), 40);

    let anchor = h.controller.grab_anchor(&h.scene).unwrap();
    assert!((planar_distance(ORIGIN, anchor) - 2.5).abs() < 1e-3);
    let direction = Vec3::new(anchor.x, 0.0, anchor.z).normalize();
    assert!(direction.dot(turned) > 0.9999);
}

#[test]
fn tracking_noise_inside_dead_zone_does_not_move_object() {
    let (mut h, _target) = harness_with(translate_target());
    h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.5), false, DT));
    h.repeat(&frame(ORIGIN, Vec3::Z, hand_at(0.5), true, DT), 2);
    assert_eq!(h.controller.state(), InteractionState::Grabbing);

    let mut jitter = TrackingJitter::new(7, 0.03);
    for _ in 0..100 {
        let mut input = frame(ORIGIN, Vec3::Z, hand_at(0.5), true, DT);
        jitter.apply(&mut input);
        h.step(&input);
    }
    let anchor = h.controller.grab_anchor(&h.scene).unwrap();
    assert!((planar_distance(ORIGIN, anchor) - 2.5).abs() < 1e-4);
}

#[test]
fn lateral_swipe_spins_a_rotatable() {
    let (mut h, target) = harness_with(
        Interactable::selectable(
            Collider::cuboid(Vec3::splat(0.4), LayerMask::INTERACTABLE).unwrap(),
        )
        .with_draggable(Box::new(RotateDraggable::new(RotateSettings::default()))),
    );
    h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.5), false, DT));
    h.repeat(&frame(ORIGIN, Vec3::Z, hand_at(0.5), true, DT), 2);
    assert_eq!(h.controller.state(), InteractionState::Grabbing);

    let yaw = |h: &InteractionHarness| {
        let rotation = h.scene.graph().world(target).unwrap().rotation;
        rotation.to_euler(EulerRot::YXZ).0
    };

    // Small drift stays inside the buffer.
    h.repeat(&frame(ORIGIN, Vec3::Z, Vec3::new(-0.05, 1.0, 0.5), true, DT), 10);
    assert!(yaw(&h).abs() < 1e-5);

    // Hand well to the user's right (-X when facing +Z) spins positively.
    h.repeat(&frame(ORIGIN, Vec3::Z, Vec3::new(-0.4, 1.0, 0.5), true, DT), 10);
    let expected = 90f32.to_radians() * DT * 10.0;
    assert!((yaw(&h) - expected).abs() < 1e-3);

    // Release: rotation stays, selection clears.
    h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.5), false, DT));
    assert_eq!(h.flags(target), Some((true, false)));
    assert!((yaw(&h) - expected).abs() < 1e-3);
}

#[test]
fn release_away_from_target_goes_idle() {
    let (mut h, target) = harness_with(translate_target());
    h.step(&frame(ORIGIN, Vec3::Z, hand_at(0.5), false, DT));
    h.repeat(&frame(ORIGIN, Vec3::Z, hand_at(0.5), true, DT), 2);

    let report = h.step(&frame(ORIGIN, Vec3::NEG_Z, hand_at(0.5), false, DT));
    assert_eq!(
        report.transition,
        Some((InteractionState::Grabbing, InteractionState::Idle))
    );
    assert_eq!(h.flags(target), Some((false, false)));
}
