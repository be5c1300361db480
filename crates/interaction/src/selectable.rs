//! Hover/select state carried by every interactable object.

use serde::Serialize;
use std::fmt;

/// Notification fired when a [`Selectable`] actually changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectableEvent {
    /// The pointer started hovering the object.
    HoverEnter,
    /// The pointer stopped hovering the object.
    HoverExit,
    /// The object was grabbed.
    Select,
    /// The object was released.
    Unselect,
}

type Listener = Box<dyn FnMut(SelectableEvent)>;

/// Per-object hover/select flags with notification listeners.
///
/// Every transition method is idempotent: calling it in the state it would
/// produce does nothing and notifies nobody, so listeners never double-fire.
#[derive(Default)]
pub struct Selectable {
    hovered: bool,
    selected: bool,
    listeners: Vec<Listener>,
}

impl fmt::Debug for Selectable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selectable")
            .field("hovered", &self.hovered)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Selectable {
    /// Create an idle selectable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener invoked on every notification.
    pub fn subscribe(&mut self, listener: impl FnMut(SelectableEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder form of [`Selectable::subscribe`].
    pub fn with_listener(mut self, listener: impl FnMut(SelectableEvent) + 'static) -> Self {
        self.subscribe(listener);
        self
    }

    /// Whether the pointer currently hovers the object.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the object is currently grabbed.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Mark hovered.
    pub fn hover_enter(&mut self) -> Option<SelectableEvent> {
        if self.hovered {
            return None;
        }
        self.hovered = true;
        Some(self.notify(SelectableEvent::HoverEnter))
    }

    /// Clear hovered.
    pub fn hover_exit(&mut self) -> Option<SelectableEvent> {
        if !self.hovered {
            return None;
        }
        self.hovered = false;
        Some(self.notify(SelectableEvent::HoverExit))
    }

    /// Mark selected. Selection suppresses hover without a hover-exit
    /// notification.
    pub fn select(&mut self) -> Option<SelectableEvent> {
        if self.selected {
            return None;
        }
        self.hovered = false;
        self.selected = true;
        Some(self.notify(SelectableEvent::Select))
    }

    /// Clear selected.
    pub fn unselect(&mut self) -> Option<SelectableEvent> {
        if !self.selected {
            return None;
        }
        self.selected = false;
        Some(self.notify(SelectableEvent::Unselect))
    }

    fn notify(&mut self, event: SelectableEvent) -> SelectableEvent {
        for listener in &mut self.listeners {
            listener(event);
        }
        event
    }
}
