//! Wrist menu driven by micro-gestures.

use glam::Quat;
use handray_core::math::saturate;
use handray_input::MicroGesture;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning for [`HandMenu`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Degrees turned per swipe about the menu's local X axis.
    pub rotate_degrees: f32,
    /// Seconds one turn takes.
    pub rotate_time: f32,
    /// Whether the menu starts shown.
    pub start_visible: bool,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            rotate_degrees: 120.0,
            rotate_time: 0.5,
            start_visible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spin {
    from: Quat,
    to: Quat,
    elapsed: f32,
}

/// Menu orientation and visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct HandMenu {
    settings: MenuSettings,
    rotation: Quat,
    visible: bool,
    spin: Option<Spin>,
}

impl HandMenu {
    /// Menu at identity orientation.
    pub fn new(settings: MenuSettings) -> Self {
        Self {
            settings,
            rotation: Quat::IDENTITY,
            visible: settings.start_visible,
            spin: None,
        }
    }

    /// Local orientation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Whether the menu is shown.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether a turn is in flight.
    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// Orientation the menu is heading to.
    pub fn target_rotation(&self) -> Quat {
        self.spin.map_or(self.rotation, |spin| spin.to)
    }

    /// React to one gesture.
    pub fn handle_gesture(&mut self, gesture: MicroGesture) {
        match gesture {
            MicroGesture::ThumbTap => {
                self.visible = !self.visible;
                debug!(visible = self.visible, "hand menu toggled");
            }
            MicroGesture::SwipeLeft => self.turn(self.settings.rotate_degrees),
            MicroGesture::SwipeRight => self.turn(-self.settings.rotate_degrees),
        }
    }

    fn turn(&mut self, degrees: f32) {
        if !self.visible {
            return;
        }
        let step = Quat::from_rotation_x(degrees.to_radians());
        let to = (self.target_rotation() * step).normalize();
        self.spin = Some(Spin {
            from: self.rotation,
            to,
            elapsed: 0.0,
        });
        debug!(degrees, "hand menu turning");
    }

    /// Advance the turn by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let Some(spin) = self.spin.as_mut() else {
            return;
        };
        spin.elapsed += dt;
        let t = if self.settings.rotate_time <= 0.0 {
            1.0
        } else {
            saturate(spin.elapsed / self.settings.rotate_time)
        };
        if t >= 1.0 {
            self.rotation = spin.to;
            self.spin = None;
        } else {
            self.rotation = spin.from.slerp(spin.to, t);
        }
    }
}
