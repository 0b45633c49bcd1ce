//! Typed events flowing between the bridge and concrete widgets.

use crate::display::{Coord, Gravity, Point, Region};
use crate::window::WindowHandle;
use std::fmt;

/// Event timestamp, in milliseconds.
pub type Time = i64;

/// A single key press, with the textual key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypress {
    pub key: String,
    pub time: Time,
}

/// A delayed message, delivered by the backend alarm mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub message: String,
    pub time: Time,
}

/// A mouse pointer shape change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerChange {
    pub family: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    PressLeft,
    PressMiddle,
    PressRight,
    ReleaseLeft,
    ReleaseMiddle,
    ReleaseRight,
    Move,
    Enter,
    Leave,
}

/// Bitmask of currently held mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const LEFT: ButtonMask = ButtonMask(1);
    pub const MIDDLE: ButtonMask = ButtonMask(2);
    pub const RIGHT: ButtonMask = ButtonMask(4);

    pub fn left(self) -> bool {
        self.0 & Self::LEFT.0 != 0
    }

    pub fn middle(self) -> bool {
        self.0 & Self::MIDDLE.0 != 0
    }

    pub fn right(self) -> bool {
        self.0 & Self::RIGHT.0 != 0
    }
}

/// One mouse event, with the position in screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseKind,
    pub pos: Point,
    pub buttons: ButtonMask,
    pub time: Time,
}

/// Events emitted into a concrete widget.
///
/// Repaints are not events; they are direct calls carrying a renderer
/// (see `ConcreteWidget::repaint`).
#[derive(Clone)]
pub enum WidgetEvent {
    /// Attaches (or detaches) the owning window, recursively.
    AttachWindow(Option<WindowHandle>),
    Resize,
    Move,
    Update,
    Keypress(Keypress),
    KeyboardFocus(bool),
    Mouse(MouseInput),
    MouseGrab(bool),
    /// Commits a new layout, anchored at `grav`. `x`/`y` are the top-left
    /// corner in screen units.
    Position {
        x: Coord,
        y: Coord,
        w: Coord,
        h: Coord,
        grav: Gravity,
    },
    Invalidate(Region),
    InvalidateAll,
    Alarm(Alarm),
    Destroy,
}

impl WidgetEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEvent::AttachWindow(_) => "attach-window",
            WidgetEvent::Resize => "resize",
            WidgetEvent::Move => "move",
            WidgetEvent::Update => "update",
            WidgetEvent::Keypress(_) => "keypress",
            WidgetEvent::KeyboardFocus(_) => "keyboard-focus",
            WidgetEvent::Mouse(_) => "mouse",
            WidgetEvent::MouseGrab(_) => "mouse-grab",
            WidgetEvent::Position { .. } => "position",
            WidgetEvent::Invalidate(_) => "invalidate",
            WidgetEvent::InvalidateAll => "invalidate-all",
            WidgetEvent::Alarm(_) => "alarm",
            WidgetEvent::Destroy => "destroy",
        }
    }
}

impl fmt::Debug for WidgetEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
