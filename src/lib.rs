//! Bridge layer between an abstract widget tree and its concrete backend
//! representation: the typed slot protocol, the view conversions, widget
//! geometry, the constructor catalog, and the ink capture widget.

pub mod blackbox;
pub mod bridge;
pub mod catalog;
pub mod display;
pub mod error;
pub mod event;
pub mod geometry;
pub mod ink;
pub mod slot;
pub mod widget;
pub mod window;

mod protocol;

#[cfg(test)]
mod testutil;

pub use euclid;
pub use palette;

pub mod prelude {
    pub use crate::blackbox::{close_box, is_nil, open_box, type_box, Blackbox, PayloadType};
    pub use crate::bridge::{abstract_widget, concrete_widget, Promise};
    pub use crate::display::{Coord, Point, Region, PIXEL};
    pub use crate::slot::Slot;
    pub use crate::widget::{AbstractWidget, ConcreteWidget, WidgetBody};
    pub use crate::window::{Window, WindowHandle};
}
