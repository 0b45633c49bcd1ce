//! Window manager capability.
//!
//! The bridge never owns a window; it drives one through this narrow
//! interface. Position, size, visibility, focus and grab authority live on
//! the window-manager side.

use crate::display::{Coord, RendererHandle};
use crate::widget::AbstractWidget;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub trait Window {
    fn id(&self) -> i32;

    fn set_position(&self, x: Coord, y: Coord);
    fn position(&self) -> (Coord, Coord);
    fn set_size(&self, w: Coord, h: Coord);
    fn size(&self) -> (Coord, Coord);

    fn set_visibility(&self, visible: bool);
    fn set_full_screen(&self, full: bool);

    fn set_keyboard_focus(&self, widget: AbstractWidget, focus: bool);
    fn get_keyboard_focus(&self, widget: &AbstractWidget) -> bool;
    fn set_mouse_grab(&self, widget: AbstractWidget, grab: bool);
    fn get_mouse_grab(&self, widget: &AbstractWidget) -> bool;
    fn set_mouse_pointer(&self, widget: AbstractWidget, family: &str, name: &str);

    fn renderer(&self) -> RendererHandle;

    /// The window-root widget at the top of this window's tree.
    fn widget(&self) -> AbstractWidget;
}

pub type WindowHandle = Rc<dyn Window>;

thread_local! {
    static WINDOWS: RefCell<HashMap<i32, WindowHandle>> = RefCell::new(HashMap::new());
}

/// Registers a window under its identifier, replacing any previous entry.
pub fn register_window(win: WindowHandle) {
    WINDOWS.with(|m| m.borrow_mut().insert(win.id(), win));
}

pub fn unregister_window(id: i32) -> Option<WindowHandle> {
    WINDOWS.with(|m| m.borrow_mut().remove(&id))
}

pub fn window_by_id(id: i32) -> Option<WindowHandle> {
    WINDOWS.with(|m| m.borrow().get(&id).cloned())
}
