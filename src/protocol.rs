//! The slot protocol: send, query, notify, read, write.
//!
//! Every entry point dispatches on the slot, checks the payload tag, then
//! either mutates window-manager state, emits a typed event, or touches the
//! generic attribute store. The protocol is a closed internal contract:
//! an unrecognized slot or a payload tag mismatch is a fatal programming
//! error, never a recoverable condition.

use crate::blackbox::{close_box, Blackbox, PayloadType};
use crate::bridge::{abstract_widget, concrete_widget};
use crate::display::{Point, Region, RendererHandle};
use crate::event::{Alarm, Keypress, MouseInput, PointerChange, WidgetEvent};
use crate::geometry::{get_geometry, set_geometry};
use crate::slot::Slot;
use crate::widget::{AbstractWidget, ConcreteWidget};
use crate::window::window_by_id;

fn unhandled(slot: Slot) -> ! {
    panic!("cannot handle slot type {}", slot)
}

fn assert_payload(got: PayloadType, want: PayloadType, slot: Slot) {
    if got != want {
        panic!("slot type = {}: type mismatch ({:?} expected, got {:?})", slot, want, got);
    }
}

// Attribute plumbing shared by several slots. Booleans are stored as the
// strings "on"/"off", matching what the backend attribute store expects.

fn send_bool(w: &ConcreteWidget, key: &str, val: Blackbox, slot: Slot) {
    let b: bool = val.expect(slot);
    w.set_string(key, if b { "on" } else { "off" });
}

fn send_int(w: &ConcreteWidget, key: &str, val: Blackbox, slot: Slot) {
    w.set_integer(key, val.expect(slot));
}

fn send_string(w: &ConcreteWidget, key: &str, val: Blackbox, slot: Slot) {
    let s: String = val.expect(slot);
    w.set_string(key, &s);
}

fn send_coord2(w: &ConcreteWidget, key: &str, val: Blackbox, slot: Slot) {
    w.set_coord2(key, val.expect(slot));
}

fn send_coord4(w: &ConcreteWidget, key: &str, val: Blackbox, slot: Slot) {
    w.set_coord4(key, val.expect(slot));
}

fn send_position(w: &ConcreteWidget, val: Blackbox, slot: Slot) {
    let p: Point = val.expect(slot);
    if w.is_window_root() {
        w.attached_window().set_position(p.x, p.y);
    } else {
        let (_, _, width, height) = get_geometry(w);
        set_geometry(w, p.x, p.y, width, height);
    }
}

fn send_size(w: &ConcreteWidget, val: Blackbox, slot: Slot) {
    let p: Point = val.expect(slot);
    if w.is_window_root() {
        w.attached_window().set_size(p.x, p.y);
    } else {
        let (x, y, _, _) = get_geometry(w);
        set_geometry(w, x, y, p.x, p.y);
    }
}

fn query_bool(w: &ConcreteWidget, key: &str, ty: PayloadType, slot: Slot) -> Blackbox {
    assert_payload(ty, PayloadType::Bool, slot);
    close_box(w.get_string(key) == "on")
}

fn query_int(w: &ConcreteWidget, key: &str, ty: PayloadType, slot: Slot) -> Blackbox {
    assert_payload(ty, PayloadType::Int, slot);
    close_box(w.get_integer(key))
}

fn query_string(w: &ConcreteWidget, key: &str, ty: PayloadType, slot: Slot) -> Blackbox {
    assert_payload(ty, PayloadType::Str, slot);
    close_box(w.get_string(key))
}

fn query_coord2(w: &ConcreteWidget, key: &str, ty: PayloadType, slot: Slot) -> Blackbox {
    assert_payload(ty, PayloadType::Coord2, slot);
    close_box(w.get_coord2(key))
}

fn query_coord4(w: &ConcreteWidget, key: &str, ty: PayloadType, slot: Slot) -> Blackbox {
    assert_payload(ty, PayloadType::Coord4, slot);
    close_box(w.get_coord4(key))
}

impl ConcreteWidget {
    /// Sets backend state addressed by `slot` from the boxed payload.
    pub fn send(&self, slot: Slot, val: Blackbox) {
        log::trace!("{:?}.send({}, {:?})", self, slot, val);
        match slot {
            Slot::Identifier => {
                let id: i32 = val.expect(slot);
                self.emit(WidgetEvent::AttachWindow(window_by_id(id)));
            }
            Slot::Visibility => {
                let b: bool = val.expect(slot);
                self.attached_window().set_visibility(b);
            }
            Slot::FullScreen => {
                let b: bool = val.expect(slot);
                self.attached_window().set_full_screen(b);
            }
            Slot::Name => send_string(self, "window name", val, slot),
            Slot::Size => send_size(self, val, slot),
            Slot::Position => send_position(self, val, slot),
            Slot::Update => {
                val.check_void(slot);
                self.emit(WidgetEvent::Update);
            }
            Slot::Keyboard => {
                let k: Keypress = val.expect(slot);
                self.emit(WidgetEvent::Keypress(k));
            }
            Slot::KeyboardFocus => {
                let b: bool = val.expect(slot);
                self.attached_window().set_keyboard_focus(abstract_widget(self.clone()), b);
            }
            Slot::Mouse => {
                let m: MouseInput = val.expect(slot);
                self.emit(WidgetEvent::Mouse(m));
            }
            Slot::MouseGrab => {
                let b: bool = val.expect(slot);
                self.attached_window().set_mouse_grab(abstract_widget(self.clone()), b);
            }
            Slot::MousePointer => {
                let p: PointerChange = val.expect(slot);
                self.attached_window().set_mouse_pointer(
                    abstract_widget(self.clone()),
                    &p.family,
                    &p.name,
                );
            }
            Slot::Invalidate => {
                // the payload is widget-local; events carry window coordinates
                let r: Region = val.expect(slot);
                let l = self.layout();
                self.emit(WidgetEvent::Invalidate(r.translate(l.ox, l.oy)));
            }
            Slot::InvalidateAll => {
                val.check_void(slot);
                self.emit(WidgetEvent::InvalidateAll);
            }
            Slot::Repaint => {
                let r: Region = val.expect(slot);
                let ren: RendererHandle = self.attached_window().renderer();
                let _stop = self.repaint(&mut *ren.borrow_mut(), r);
            }
            Slot::DelayedMessage => {
                let a: Alarm = val.expect(slot);
                self.emit(WidgetEvent::Alarm(a));
            }
            Slot::Destroy => {
                val.check_void(slot);
                self.emit(WidgetEvent::Destroy);
            }
            Slot::ShrinkingFactor => send_int(self, "shrinking factor", val, slot),
            Slot::Extents => send_coord4(self, "extents", val, slot),
            Slot::ScrollbarsVisibility => send_int(self, "scrollbars", val, slot),
            Slot::ScrollPosition => send_coord2(self, "scroll position", val, slot),
            Slot::HeaderVisibility => send_bool(self, "header", val, slot),
            Slot::MainIconsVisibility => send_bool(self, "main icons", val, slot),
            Slot::ContextIconsVisibility => send_bool(self, "context icons", val, slot),
            Slot::UserIconsVisibility => send_bool(self, "user icons", val, slot),
            Slot::FooterVisibility => send_bool(self, "footer flag", val, slot),
            Slot::LeftFooter => send_string(self, "left footer", val, slot),
            Slot::RightFooter => send_string(self, "right footer", val, slot),
            Slot::InteractiveMode => send_bool(self, "interactive mode", val, slot),
            Slot::StringInput => send_string(self, "input", val, slot),
            Slot::InputType => send_string(self, "type", val, slot),
            Slot::InputProposal => send_string(self, "default", val, slot),
            Slot::File => send_string(self, "file", val, slot),
            Slot::Directory => send_string(self, "directory", val, slot),
            _ => unhandled(slot),
        }
    }

    /// Reads backend state addressed by `slot`, boxed as `ty`.
    pub fn query(&self, slot: Slot, ty: PayloadType) -> Blackbox {
        log::trace!("{:?}.query({})", self, slot);
        match slot {
            Slot::Identifier => {
                assert_payload(ty, PayloadType::Int, slot);
                close_box(self.attached_window().id())
            }
            Slot::Renderer => {
                assert_payload(ty, PayloadType::Renderer, slot);
                close_box(self.attached_window().renderer())
            }
            Slot::Size => {
                assert_payload(ty, PayloadType::Coord2, slot);
                let (_, _, w, h) = get_geometry(self);
                close_box(Point::new(w, h))
            }
            Slot::Position => {
                assert_payload(ty, PayloadType::Coord2, slot);
                let (x, y, _, _) = get_geometry(self);
                close_box(Point::new(x, y))
            }
            Slot::KeyboardFocus => {
                assert_payload(ty, PayloadType::Bool, slot);
                let focus = self.attached_window().get_keyboard_focus(&abstract_widget(self.clone()));
                close_box(focus)
            }
            Slot::MouseGrab => {
                assert_payload(ty, PayloadType::Bool, slot);
                let grab = self.attached_window().get_mouse_grab(&abstract_widget(self.clone()));
                close_box(grab)
            }
            Slot::Extents => query_coord4(self, "extents", ty, slot),
            Slot::VisiblePart => query_coord4(self, "visible", ty, slot),
            Slot::ScrollbarsVisibility => query_int(self, "scrollbars", ty, slot),
            Slot::ScrollPosition => query_coord2(self, "scroll position", ty, slot),
            Slot::HeaderVisibility => query_bool(self, "header", ty, slot),
            Slot::MainIconsVisibility => query_bool(self, "main icons", ty, slot),
            Slot::ContextIconsVisibility => query_bool(self, "context icons", ty, slot),
            Slot::UserIconsVisibility => query_bool(self, "user icons", ty, slot),
            Slot::FooterVisibility => query_bool(self, "footer flag", ty, slot),
            Slot::InteractiveMode => query_bool(self, "interactive mode", ty, slot),
            Slot::InteractiveInput => query_string(self, "interactive input", ty, slot),
            Slot::StringInput => query_string(self, "input", ty, slot),
            _ => unhandled(slot),
        }
    }

    /// Invoked by the backend when observed state changes; re-emits the
    /// corresponding abstract-level event, then always runs the notify
    /// chain so generic observers stay consistent.
    pub fn notify(&self, slot: Slot, new_val: Blackbox) {
        log::trace!("{:?}.notify({}, {:?})", self, slot, new_val);
        match slot {
            Slot::Size => {
                new_val.check_type::<Point>(slot);
                self.emit(WidgetEvent::Resize);
                if self.is_window_root() {
                    // the window owns the size; keep its sole child in step
                    send_size(&self.child(0), new_val.clone(), slot);
                }
            }
            Slot::Position => {
                new_val.check_type::<Point>(slot);
                self.emit(WidgetEvent::Move);
            }
            Slot::KeyboardFocus => {
                let b: bool = new_val.clone().expect(slot);
                self.emit(WidgetEvent::KeyboardFocus(b));
            }
            Slot::MouseGrab => {
                let b: bool = new_val.clone().expect(slot);
                self.emit(WidgetEvent::MouseGrab(b));
            }
            _ => {}
        }
        self.run_notify_chain(slot, &new_val);
    }

    /// Structural accessor for a named child widget.
    pub fn read(&self, slot: Slot, index: Blackbox) -> AbstractWidget {
        log::trace!("{:?}.read({})", self, slot);
        match slot {
            Slot::Window => {
                index.check_void(slot);
                self.attached_window().widget()
            }
            Slot::FormField => {
                let i: i32 = index.expect(slot);
                abstract_widget(self.child(0).named("inputs").child(i as usize).named("input"))
            }
            Slot::File => {
                index.check_void(slot);
                abstract_widget(self.child(0).named("file").named("input"))
            }
            Slot::Directory => {
                index.check_void(slot);
                abstract_widget(self.child(0).named("directory").named("input"))
            }
            _ => unhandled(slot),
        }
    }

    /// Structural mutator setting a named child widget.
    pub fn write(&self, slot: Slot, index: Blackbox, w: AbstractWidget) {
        log::trace!("{:?}.write({})", self, slot);
        let key = match slot {
            Slot::MainMenu => "menu bar",
            Slot::MainIcons => "main icons bar",
            Slot::ContextIcons => "context icons bar",
            Slot::UserIcons => "user icons bar",
            Slot::Canvas => "scrollable",
            Slot::InteractivePrompt => "interactive prompt",
            Slot::InteractiveInput => "interactive input",
            _ => unhandled(slot),
        };
        index.check_void(slot);
        self.set_widget(key, concrete_widget(w));
    }
}
