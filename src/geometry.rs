//! Widget geometry access.
//!
//! A window-root widget has no geometry of its own; both directions
//! delegate to the window manager. Any other widget must be the unique
//! principal child of its window, and its geometry is derived from the
//! layout committed by the last position event, never stored separately.

use crate::bridge::concrete_widget;
use crate::display::{anchor_dx, anchor_dy, Coord, Gravity};
use crate::event::WidgetEvent;
use crate::widget::ConcreteWidget;

/// Restricts geometry access to the principal child of a window.
///
/// Positions are not computed relative to parent widgets; only the unique
/// child of a window-root has well-defined coordinates. Violation is fatal.
pub fn principal_widget_check(wid: &ConcreteWidget) {
    if let Some(win) = wid.window() {
        let root = concrete_widget(win.widget());
        if *wid != root.child(0) {
            panic!("invalid geometry access: {:?} is not the principal widget", wid);
        }
    }
}

pub fn set_geometry(wid: &ConcreteWidget, x: Coord, y: Coord, w: Coord, h: Coord) {
    if wid.is_window_root() {
        let win = wid.attached_window();
        win.set_position(x, y);
        win.set_size(w, h);
    } else {
        principal_widget_check(wid);
        wid.emit(WidgetEvent::Position { x, y, w, h, grav: Gravity::NorthWest });
    }
}

pub fn get_geometry(wid: &ConcreteWidget) -> (Coord, Coord, Coord, Coord) {
    if wid.is_window_root() {
        let win = wid.attached_window();
        let (x, y) = win.position();
        let (w, h) = win.size();
        (x, y, w, h)
    } else {
        principal_widget_check(wid);
        let l = wid.layout();
        (l.ox - anchor_dx(l.grav, l.w), l.oy - anchor_dy(l.grav, l.h), l.w, l.h)
    }
}
