use glam::Vec3;
use handray_input::{FrameInput, HandFrame, MicroGesture, TrackedPose};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ScriptedStep {
    duration: f32,
    pinch: bool,
    point: bool,
    /// Ray origin and head position.
    origin: [f32; 3],
    hand: [f32; 3],
    yaw_degrees: f32,
    pitch_degrees: f32,
    /// Fired once, on the first frame of the step.
    gesture: Option<MicroGesture>,
}

impl Default for ScriptedStep {
    fn default() -> Self {
        Self {
            duration: 0.0,
            pinch: false,
            point: false,
            origin: [0.0, 1.0, 0.0],
            hand: [0.0, 1.0, 0.4],
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            gesture: None,
        }
    }
}

pub struct ScriptedHandPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    gesture_sent: bool,
    finished: bool,
}

impl ScriptedHandPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            gesture_sent: false,
            finished: false,
        })
    }

    /// Whether the last step has run its full duration.
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn advance(&mut self, dt: f32) -> FrameInput {
        self.time_in_step += dt;
        while self.time_in_step > self.steps[self.index].duration {
            if self.index + 1 < self.steps.len() {
                self.time_in_step -= self.steps[self.index].duration;
                self.index += 1;
                self.gesture_sent = false;
            } else {
                self.finished = true;
                break;
            }
        }

        let step = &self.steps[self.index];
        let gesture = if self.gesture_sent { None } else { step.gesture };
        self.gesture_sent = true;
        step.to_frame(dt, gesture)
    }
}

impl ScriptedStep {
    fn to_frame(&self, dt: f32, gesture: Option<MicroGesture>) -> FrameInput {
        let origin = Vec3::from_array(self.origin);
        let ray_origin = TrackedPose::from_yaw_pitch(
            origin,
            self.yaw_degrees.to_radians(),
            self.pitch_degrees.to_radians(),
        );
        FrameInput {
            dt,
            head: origin,
            ray_origin,
            hand: HandFrame {
                position: Vec3::from_array(self.hand),
                forward: ray_origin.forward,
                pinching: self.pinch,
                pointing: self.point,
            },
            gesture,
        }
    }
}
