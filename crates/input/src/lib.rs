#![warn(missing_docs)]
//! Per-frame hand-tracking input.
//!
//! The tracking runtime is an external collaborator; this crate only defines
//! what it hands over each frame and the pinch debounce built on top of it.

use glam::{Quat, Vec3};
use handray_core::math::ground_project;
use serde::{Deserialize, Serialize};

/// Position and facing of a tracked anchor (controller, hand ray, head).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPose {
    /// World-space position.
    pub position: Vec3,
    /// Unit forward direction.
    pub forward: Vec3,
}

impl Default for TrackedPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
        }
    }
}

impl TrackedPose {
    /// Pose at `position` facing `forward` (normalized, +Z when zero).
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// Pose from yaw/pitch in radians. Yaw 0 faces +Z, positive yaw turns
    /// toward +X, positive pitch looks up.
    pub fn from_yaw_pitch(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let forward = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-pitch) * Vec3::Z;
        Self::new(position, forward)
    }

    /// Forward with the vertical component removed, if it has any horizontal part.
    pub fn flat_forward(&self) -> Option<Vec3> {
        ground_project(self.forward)
    }
}

/// Hand state reported by the tracking runtime for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandFrame {
    /// Palm position in world space.
    pub position: Vec3,
    /// Direction the hand points.
    pub forward: Vec3,
    /// Index finger and thumb are in contact.
    pub pinching: bool,
    /// Hand holds the pointing pose (used by locomotion).
    pub pointing: bool,
}

/// Discrete micro-gestures recognized by the tracking runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicroGesture {
    /// Thumb swipes toward the left.
    SwipeLeft,
    /// Thumb swipes toward the right.
    SwipeRight,
    /// Thumb taps the index finger.
    ThumbTap,
}

/// Everything the interaction layer consumes in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Head (camera) position, used for hand distance measurements.
    pub head: Vec3,
    /// Anchor the pointer ray is cast from.
    pub ray_origin: TrackedPose,
    /// Tracked hand.
    pub hand: HandFrame,
    /// Gesture recognized this frame, if any.
    pub gesture: Option<MicroGesture>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            dt: 1.0 / 72.0,
            head: Vec3::ZERO,
            ray_origin: TrackedPose::default(),
            hand: HandFrame::default(),
            gesture: None,
        }
    }
}

/// Debounce state for the pinch gesture.
///
/// `duration` accumulates frame time while pinching and drops to zero the
/// instant the pinch ends, so brief tracking flicker never counts as a hold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinchState {
    active: bool,
    duration: f32,
    just_started: bool,
    just_released: bool,
}

impl PinchState {
    /// Create an inactive pinch state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of tracking.
    pub fn update(&mut self, pinching: bool, dt: f32) {
        self.just_started = pinching && !self.active;
        self.just_released = !pinching && self.active;
        self.active = pinching;
        self.duration = if pinching { self.duration + dt } else { 0.0 };
    }

    /// Reset the accumulated hold time without touching the active flag.
    pub fn reset_timer(&mut self) {
        self.duration = 0.0;
    }

    /// Whether the pinch is currently held.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Seconds the pinch has been held continuously.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether the pinch began this frame.
    pub fn just_started(&self) -> bool {
        self.just_started
    }

    /// Whether the pinch ended this frame.
    pub fn just_released(&self) -> bool {
        self.just_released
    }

    /// Whether the pinch has been held for at least `hold_time` seconds.
    pub fn held_for(&self, hold_time: f32) -> bool {
        self.active && self.duration >= hold_time
    }
}
