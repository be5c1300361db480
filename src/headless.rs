use crate::config::AppConfig;
use crate::scripted_input::ScriptedHandPlayer;
use anyhow::{Context, Result};
use handray_input::FrameInput;
use handray_interaction::{Controller, HandMenu, InteractionState, PointLocomotion};
use handray_physics::CollisionWorld;
use handray_testkit::JsonlSink;
use std::path::PathBuf;
use tracing::{info, warn};

/// Frames run when neither a script nor `--max-ticks` bounds the run.
const DEFAULT_TICKS: u64 = 720;

pub struct HeadlessConfig {
    pub app: AppConfig,
    pub scripted_input: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub max_ticks: Option<u64>,
    pub dt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub transitions: usize,
    pub notifications: usize,
    pub final_state: InteractionState,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let (mut scene, spawned) = cfg.app.build_scene().context("building scene")?;
    info!(objects = spawned.len(), "scene ready");

    let mut player = cfg
        .scripted_input
        .as_deref()
        .map(|path| {
            ScriptedHandPlayer::from_path(path)
                .with_context(|| format!("loading scripted input {}", path.display()))
        })
        .transpose()?;
    let mut sink = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let max_ticks = match (cfg.max_ticks, player.is_some()) {
        (Some(max), _) => Some(max),
        (None, true) => None,
        (None, false) => {
            warn!("no --script or --max-ticks given; running {DEFAULT_TICKS} idle frames");
            Some(DEFAULT_TICKS)
        }
    };

    let mut world = CollisionWorld::new();
    let mut controller = Controller::new(cfg.app.raycaster, cfg.app.feedback.clone());
    let mut menu = HandMenu::new(cfg.app.menu);
    let locomotion = PointLocomotion::new(cfg.app.locomotion);
    let root = scene.root();

    let mut summary = RunSummary {
        ticks: 0,
        transitions: 0,
        notifications: 0,
        final_state: InteractionState::Idle,
    };

    loop {
        if max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }
        if player.as_ref().is_some_and(|p| p.finished()) {
            break;
        }

        let input = match player.as_mut() {
            Some(player) => player.advance(cfg.dt),
            None => FrameInput {
                dt: cfg.dt,
                ..FrameInput::default()
            },
        };

        scene.sync_colliders(&mut world);
        let report = controller.tick(&input, &world, &mut scene);

        if let Some(gesture) = input.gesture {
            menu.handle_gesture(gesture);
        }
        menu.advance(input.dt);
        if let Err(err) =
            locomotion.advance(&input.hand, menu.visible(), input.dt, scene.graph_mut(), root)
        {
            warn!(%err, "locomotion skipped");
        }

        summary.ticks += 1;
        summary.transitions += usize::from(report.transition.is_some());
        summary.notifications += report.events.len();
        if let Some(sink) = sink.as_mut() {
            sink.write_report(&report)?;
        }
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }
    summary.final_state = controller.state();
    info!(
        ticks = summary.ticks,
        transitions = summary.transitions,
        notifications = summary.notifications,
        state = %summary.final_state,
        "headless run finished"
    );
    Ok(summary)
}
