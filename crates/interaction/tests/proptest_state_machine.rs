//! Property-based tests for the pointer state machine and drag strategies
//!
//! Validates interaction invariants:
//! - Controller state always agrees with the target's selectable flags
//! - Pinch debounce grabs exactly once, never early
//! - Translate drag keeps its radius inside the configured clamps
//! - Rotate drag ignores lateral motion inside the buffer
//! - Selectable transitions notify once per real change

use glam::Vec3;
use handray_core::{EntityId, LayerMask, SceneGraph, Transform};
use handray_input::{FrameInput, HandFrame, TrackedPose};
use handray_interaction::{
    Controller, DragContext, Draggable, FeedbackSettings, Interactable, InteractionState,
    RaycasterSettings, RotateDraggable, RotateSettings, Scene, Selectable, SelectableEvent,
    TranslateDraggable, TranslateSettings,
};
use handray_physics::{Collider, CollisionWorld, Ray, RaycastHit};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const ORIGIN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

fn scene_with_ball() -> (Scene, EntityId) {
    let mut scene = Scene::new();
    let ball = scene
        .spawn(
            "ball",
            Transform::from_translation(Vec3::new(0.0, 1.0, 3.0)),
            Interactable::selectable(Collider::sphere(0.5, LayerMask::INTERACTABLE).unwrap())
                .with_draggable(Box::new(TranslateDraggable::new(TranslateSettings::default()))),
        )
        .unwrap();
    (scene, ball)
}

fn frame(aimed: bool, pinching: bool, dt: f32) -> FrameInput {
    let forward = if aimed { Vec3::Z } else { Vec3::NEG_Z };
    FrameInput {
        dt,
        head: ORIGIN,
        ray_origin: TrackedPose::new(ORIGIN, forward),
        hand: HandFrame {
            position: Vec3::new(0.0, 1.0, 0.4),
            forward,
            pinching,
            pointing: false,
        },
        gesture: None,
    }
}

fn drag_ctx(graph: &mut SceneGraph, target: EntityId, hand: Vec3, dt: f32) -> DragContext<'_> {
    DragContext {
        graph,
        target,
        ray_origin: TrackedPose::new(ORIGIN, Vec3::Z),
        head: ORIGIN,
        hand,
        dt,
    }
}

fn hit_at(entity: EntityId, distance: f32) -> RaycastHit {
    RaycastHit {
        point: ORIGIN + Vec3::Z * distance,
        normal: Vec3::NEG_Z,
        distance,
        entity,
    }
}

proptest! {
    /// Property: State and selectable flags never disagree
    ///
    /// Idle leaves the target untouched, Hovering means hovered only,
    /// Grabbing means selected only, for any aim/pinch sequence.
    #[test]
    fn state_matches_selectable_flags(
        frames in prop::collection::vec((any::<bool>(), any::<bool>()), 1..120),
        dt in 0.005f32..0.05,
    ) {
        let (mut scene, ball) = scene_with_ball();
        let mut world = CollisionWorld::new();
        let mut controller = Controller::new(RaycasterSettings::default(), FeedbackSettings::default());

        for (aimed, pinching) in frames {
            scene.sync_colliders(&mut world);
            controller.tick(&frame(aimed, pinching, dt), &world, &mut scene);

            let selectable = scene.selectable(ball).unwrap();
            let flags = (selectable.is_hovered(), selectable.is_selected());
            match controller.state() {
                InteractionState::Idle => {
                    prop_assert_eq!(flags, (false, false));
                    prop_assert_eq!(controller.current_target(), None);
                }
                InteractionState::Hovering => {
                    prop_assert_eq!(flags, (true, false));
                    prop_assert_eq!(controller.current_target(), Some(ball));
                }
                InteractionState::Grabbing => {
                    prop_assert_eq!(flags, (false, true));
                    prop_assert_eq!(controller.grabbed(), Some(ball));
                    prop_assert!(!scene.has_draggable(ball));
                }
            }
            if controller.state() != InteractionState::Grabbing {
                prop_assert!(scene.has_draggable(ball));
                prop_assert_eq!(scene.graph().parent(ball).unwrap(), Some(scene.root()));
            }
        }
    }

    /// Property: Pinch debounce
    ///
    /// Holding for less than the hold time never grabs; holding past it
    /// grabs exactly once.
    #[test]
    fn debounce_grabs_once(
        frames_held in 1usize..40,
        dt in 0.004f32..0.03,
    ) {
        let (mut scene, ball) = scene_with_ball();
        let mut world = CollisionWorld::new();
        let settings = RaycasterSettings::default();
        let mut controller = Controller::new(settings, FeedbackSettings::default());

        scene.sync_colliders(&mut world);
        controller.tick(&frame(true, false, dt), &world, &mut scene);
        prop_assert_eq!(controller.state(), InteractionState::Hovering);

        let mut selects = 0;
        let mut grabbed_at = None;
        for i in 1..=frames_held {
            scene.sync_colliders(&mut world);
            let report = controller.tick(&frame(true, true, dt), &world, &mut scene);
            selects += report
                .events
                .iter()
                .filter(|(e, ev)| *e == ball && *ev == SelectableEvent::Select)
                .count();
            if grabbed_at.is_none() && controller.state() == InteractionState::Grabbing {
                grabbed_at = Some(i);
            }
        }

        let held = controller.pinch().duration();
        if held < settings.pinch_hold_time {
            prop_assert_eq!(selects, 0);
            prop_assert_eq!(controller.state(), InteractionState::Hovering);
        } else {
            prop_assert_eq!(selects, 1);
            prop_assert_eq!(controller.state(), InteractionState::Grabbing);
            // Grab happens on the first frame whose accumulated hold reaches the threshold.
            let first = grabbed_at.unwrap();
            prop_assert!(first as f32 * dt >= settings.pinch_hold_time - 1e-4);
            prop_assert!((first - 1) as f32 * dt < settings.pinch_hold_time + 1e-4);
        }
    }

    /// Property: Translate radius stays within [min_pull, max_push]
    #[test]
    fn translate_radius_is_clamped(
        grab_distance in 0.1f32..9.0,
        hand_distances in prop::collection::vec(0.0f32..1.5, 1..200),
        dt in 0.005f32..0.2,
    ) {
        let settings = TranslateSettings::default();
        let mut graph = SceneGraph::new();
        let target = graph
            .spawn("crate", Transform::from_translation(ORIGIN + Vec3::Z * grab_distance), None)
            .unwrap();
        let mut drag = TranslateDraggable::new(settings);
        let ray = Ray::new(ORIGIN, Vec3::Z);

        let start_hand = ORIGIN + Vec3::Z * 0.5;
        drag.on_drag_start(&mut drag_ctx(&mut graph, target, start_hand, dt), &ray, &hit_at(target, grab_distance));

        for d in hand_distances {
            drag.on_drag(&mut drag_ctx(&mut graph, target, ORIGIN + Vec3::Z * d, dt), &ray);
            let radius = drag.desired_distance().unwrap();
            prop_assert!(radius >= settings.min_pull_distance - 1e-5);
            prop_assert!(radius <= settings.max_push_distance + 1e-5);
        }

        drag.on_drag_end(&mut drag_ctx(&mut graph, target, start_hand, dt));
        prop_assert_eq!(graph.parent(target).unwrap(), None);
        prop_assert_eq!(graph.len(), 1);
    }

    /// Property: Rotate dead zone and sign
    #[test]
    fn rotate_respects_buffer(hand_x in -2.0f32..2.0) {
        let settings = RotateSettings::default();
        let mut graph = SceneGraph::new();
        let target = graph
            .spawn("dial", Transform::from_translation(Vec3::new(0.0, 1.0, 3.0)), None)
            .unwrap();
        let mut drag = RotateDraggable::new(settings);
        let ray = Ray::new(ORIGIN, Vec3::Z);

        let start = ORIGIN + Vec3::Z * 0.5;
        drag.on_drag_start(&mut drag_ctx(&mut graph, target, start, 0.1), &ray, &hit_at(target, 2.5));

        let hand = Vec3::new(hand_x, 1.0, 0.5);
        drag.on_drag(&mut drag_ctx(&mut graph, target, hand, 0.1), &ray);

        // Right of a +Z facing user is -X.
        let lateral = -hand_x / Vec3::new(hand_x, 0.0, 0.5).length();
        if lateral.abs() <= settings.buffer_distance - 1e-4 {
            prop_assert_eq!(drag.last_spin(), 0.0);
        } else if lateral.abs() > settings.buffer_distance + 1e-4 {
            prop_assert!(drag.last_spin() != 0.0);
            prop_assert_eq!(drag.last_spin().signum(), lateral.signum());
        }
    }

    /// Property: Selectable notifies once per real transition
    #[test]
    fn selectable_is_idempotent(ops in prop::collection::vec(0u8..4, 0..64)) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);
        let mut selectable = Selectable::new().with_listener(move |event| sink.borrow_mut().push(event));

        let mut expected = Vec::new();
        for op in ops {
            let before = (selectable.is_hovered(), selectable.is_selected());
            let event = match op {
                0 => selectable.hover_enter(),
                1 => selectable.hover_exit(),
                2 => selectable.select(),
                _ => selectable.unselect(),
            };
            let after = (selectable.is_hovered(), selectable.is_selected());
            prop_assert_eq!(event.is_some(), before != after);
            expected.extend(event);
        }
        prop_assert_eq!(&*fired.borrow(), &expected);
    }
}
