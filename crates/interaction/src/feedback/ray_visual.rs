//! Pointer ray segment shown to the user.
//!
//! This is a side-effect sink: the controller tells it what it is aiming at
//! and it produces the two endpoints and an alpha for whatever draws lines.

use super::{AlphaFader, EasingCurve};
use glam::Vec3;
use handray_core::math::saturate;
use handray_physics::Ray;
use serde::{Deserialize, Serialize};

/// Tuning for [`RayVisual`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    /// Segment length while nothing is hovered (metres).
    pub idle_length: f32,
    /// Seconds for the segment to reach a hovered hit point.
    pub extend_duration: f32,
    /// Easing applied while extending.
    pub extend_curve: EasingCurve,
    /// Seconds for the fade out on grab and back in on release.
    pub fade_duration: f32,
    /// RGB of the segment start.
    pub start_color: [f32; 3],
    /// RGB of the segment end.
    pub end_color: [f32; 3],
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            idle_length: 0.1,
            extend_duration: 0.5,
            extend_curve: EasingCurve::Linear,
            fade_duration: 0.2,
            start_color: [1.0, 1.0, 1.0],
            end_color: [0.6, 0.8, 1.0],
        }
    }
}

/// Where the segment should end this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentTarget {
    /// Nothing hovered: a short stub along the ray.
    Idle,
    /// Hovering: ease toward the hit point.
    Hover(Vec3),
    /// Grabbing: snap to the held anchor.
    Grab(Vec3),
}

/// Ray segment endpoints plus fade.
#[derive(Debug, Clone, PartialEq)]
pub struct RayVisual {
    settings: FeedbackSettings,
    start: Vec3,
    end: Vec3,
    extend_time: f32,
    fader: AlphaFader,
}

impl RayVisual {
    /// Create a fully visible, idle segment.
    pub fn new(settings: FeedbackSettings) -> Self {
        let fader = AlphaFader::new(settings.fade_duration);
        Self {
            settings,
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            extend_time: 0.0,
            fader,
        }
    }

    /// Segment start (the ray origin).
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// Segment end.
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Current opacity.
    pub fn alpha(&self) -> f32 {
        self.fader.alpha()
    }

    /// RGBA at the start and end of the segment.
    pub fn colors(&self) -> ([f32; 4], [f32; 4]) {
        let [sr, sg, sb] = self.settings.start_color;
        let [er, eg, eb] = self.settings.end_color;
        let a = self.alpha();
        ([sr, sg, sb, a], [er, eg, eb, a])
    }

    /// Restart the hover extension from the ray origin.
    pub fn restart_extend(&mut self) {
        self.extend_time = 0.0;
    }

    /// Fade out (grab start).
    pub fn fade_out(&mut self) {
        self.fader.fade_to(0.0);
    }

    /// Fade back in (grab end).
    pub fn fade_in(&mut self) {
        self.fader.fade_to(1.0);
    }

    /// Recompute endpoints and advance the fade.
    pub fn update(&mut self, ray: &Ray, target: SegmentTarget, dt: f32) {
        self.start = ray.origin;
        self.end = match target {
            SegmentTarget::Idle => ray.at(self.settings.idle_length),
            SegmentTarget::Hover(point) => {
                self.extend_time += dt;
                let t = if self.settings.extend_duration <= 0.0 {
                    1.0
                } else {
                    saturate(self.extend_time / self.settings.extend_duration)
                };
                ray.origin.lerp(point, self.settings.extend_curve.evaluate(t))
            }
            SegmentTarget::Grab(anchor) => anchor,
        };
        self.fader.advance(dt);
    }
}
