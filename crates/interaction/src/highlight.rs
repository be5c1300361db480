//! Colour feedback driven by selectable notifications.

use crate::selectable::SelectableEvent;
use serde::{Deserialize, Serialize};

/// Colour scheme for the highlight states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightColors {
    /// Resting colour.
    pub base: [f32; 4],
    /// Colour while hovered.
    pub hover: [f32; 4],
    /// Colour while grabbed.
    pub selected: [f32; 4],
}

impl Default for HighlightColors {
    fn default() -> Self {
        Self {
            base: [1.0, 1.0, 1.0, 1.0],     // White
            hover: [1.0, 0.92, 0.016, 1.0], // Yellow
            selected: [0.0, 1.0, 0.0, 1.0], // Green
        }
    }
}

/// Tint of one object. Hover changes are ignored while selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    colors: HighlightColors,
    current: [f32; 4],
    selected: bool,
}

impl Default for Highlight {
    fn default() -> Self {
        Self::new(HighlightColors::default())
    }
}

impl Highlight {
    /// Start at the base colour.
    pub fn new(colors: HighlightColors) -> Self {
        Self {
            colors,
            current: colors.base,
            selected: false,
        }
    }

    /// Colour to render with.
    pub fn color(&self) -> [f32; 4] {
        self.current
    }

    /// React to a selectable notification.
    pub fn apply(&mut self, event: SelectableEvent) {
        match event {
            SelectableEvent::HoverEnter if !self.selected => self.current = self.colors.hover,
            SelectableEvent::HoverExit if !self.selected => self.current = self.colors.base,
            SelectableEvent::Select => {
                self.selected = true;
                self.current = self.colors.selected;
            }
            SelectableEvent::Unselect => {
                self.selected = false;
                self.current = self.colors.base;
            }
            _ => {}
        }
    }
}
