//! Shared widget record and the two views over it.
//!
//! An abstract widget and its concrete counterpart are the same record seen
//! through two types; the bridge conversions are pure projections. The
//! record carries the substrate every concrete widget builds on: cached
//! layout, the owning window, indexed children, the generic attribute
//! store, pending invalidation, and the notify chain.

use crate::blackbox::Blackbox;
use crate::display::{anchor_dx, anchor_dy, Coord, Gravity, Point, Region, Renderer};
use crate::event::WidgetEvent;
use crate::slot::Slot;
use crate::window::WindowHandle;
use slotmap::{DefaultKey, SlotMap};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Cached layout committed by the last position event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub w: Coord,
    pub h: Coord,
    pub ox: Coord,
    pub oy: Coord,
    pub grav: Gravity,
}

impl Default for Layout {
    fn default() -> Self {
        Layout { w: 0, h: 0, ox: 0, oy: 0, grav: Gravity::NorthWest }
    }
}

/// A value in the generic attribute store.
#[derive(Clone)]
pub enum AttrValue {
    Str(String),
    Int(i32),
    Coord2(Point),
    Coord4(Region),
    Widget(ConcreteWidget),
}

/// Regions invalidated since the backend last drained them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    None,
    Regions(Vec<Region>),
    All,
}

type Observer = Box<dyn FnMut(Slot, &Blackbox)>;

/// Key of a registered notify-chain observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverKey(DefaultKey);

#[derive(Default)]
struct NotifyChain {
    observers: SlotMap<DefaultKey, Observer>,
    order: Vec<DefaultKey>,
}

impl NotifyChain {
    fn insert(&mut self, f: Observer) -> ObserverKey {
        let key = self.observers.insert(f);
        self.order.push(key);
        ObserverKey(key)
    }

    fn remove(&mut self, key: ObserverKey) {
        if self.observers.remove(key.0).is_some() {
            self.order.retain(|k| *k != key.0);
        }
    }
}

pub(crate) struct WidgetRep {
    kind: &'static str,
    name: RefCell<String>,
    layout: Cell<Layout>,
    win: RefCell<Option<WindowHandle>>,
    window_root: Cell<bool>,
    children: RefCell<Vec<ConcreteWidget>>,
    attrs: RefCell<HashMap<String, AttrValue>>,
    dirty: RefCell<Invalidation>,
    body: RefCell<Box<dyn WidgetBody>>,
    chain: RefCell<NotifyChain>,
}

/// Behavior of one concrete widget kind.
///
/// Bodies are inert by default; stateful widgets override the handlers and
/// request invalidation through the [`EventCx`].
pub trait WidgetBody {
    fn kind(&self) -> &'static str;

    fn handle_event(&mut self, cx: &mut EventCx<'_>, ev: &WidgetEvent) {
        let _ = (cx, ev);
    }

    /// Redraws `region`; returns true to stop further repaint processing.
    fn repaint(&mut self, cx: &mut EventCx<'_>, ren: &mut dyn Renderer, region: Region) -> bool {
        let _ = (cx, ren, region);
        false
    }

    /// Preferred footprint in screen units; `mode` selects alternate
    /// display modes.
    fn size_hint(&self, mode: i32) -> (Coord, Coord) {
        let _ = mode;
        (0, 0)
    }
}

/// Marker body for widgets whose behavior lives entirely in the backend.
pub struct InertBody(pub &'static str);

impl WidgetBody for InertBody {
    fn kind(&self) -> &'static str {
        self.0
    }
}

/// Handler-side access to the widget record owning the running body.
pub struct EventCx<'a> {
    rep: &'a WidgetRep,
}

impl EventCx<'_> {
    pub fn width(&self) -> Coord {
        self.rep.layout.get().w
    }

    pub fn height(&self) -> Coord {
        self.rep.layout.get().h
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.rep.win.borrow().clone()
    }

    pub fn invalidate(&mut self, region: Region) {
        push_invalid(&self.rep.dirty, region);
    }

    pub fn invalidate_all(&mut self) {
        *self.rep.dirty.borrow_mut() = Invalidation::All;
    }

    pub fn string_attr(&self, key: &str) -> String {
        match self.rep.attrs.borrow().get(key) {
            Some(AttrValue::Str(s)) => s.clone(),
            _ => String::new(),
        }
    }
}

fn push_invalid(dirty: &RefCell<Invalidation>, region: Region) {
    let mut dirty = dirty.borrow_mut();
    match &mut *dirty {
        Invalidation::None => *dirty = Invalidation::Regions(vec![region]),
        Invalidation::Regions(rs) => rs.push(region),
        Invalidation::All => {}
    }
}

/// Backend-facing view of a widget record.
#[derive(Clone)]
pub struct ConcreteWidget(pub(crate) Rc<WidgetRep>);

/// Backend-agnostic view of the same record.
#[derive(Clone)]
pub struct AbstractWidget(pub(crate) Rc<WidgetRep>);

impl PartialEq for ConcreteWidget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ConcreteWidget {}

impl PartialEq for AbstractWidget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for AbstractWidget {}

impl fmt::Debug for ConcreteWidget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = self.0.name.borrow();
        if name.is_empty() {
            write!(f, "<{}>", self.0.kind)
        } else {
            write!(f, "<{} {:?}>", self.0.kind, *name)
        }
    }
}

impl fmt::Debug for AbstractWidget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&ConcreteWidget(self.0.clone()), f)
    }
}

impl ConcreteWidget {
    pub fn new(body: Box<dyn WidgetBody>) -> Self {
        let kind = body.kind();
        ConcreteWidget(Rc::new(WidgetRep {
            kind,
            name: RefCell::new(String::new()),
            layout: Cell::new(Layout::default()),
            win: RefCell::new(None),
            window_root: Cell::new(false),
            children: RefCell::new(Vec::new()),
            attrs: RefCell::new(HashMap::new()),
            dirty: RefCell::new(Invalidation::None),
            body: RefCell::new(body),
            chain: RefCell::new(NotifyChain::default()),
        }))
    }

    pub fn with_children(self, children: Vec<ConcreteWidget>) -> Self {
        *self.0.children.borrow_mut() = children;
        self
    }

    pub fn with_name(self, name: &str) -> Self {
        *self.0.name.borrow_mut() = name.to_string();
        self
    }

    pub fn kind(&self) -> &'static str {
        self.0.kind
    }

    pub fn name(&self) -> String {
        self.0.name.borrow().clone()
    }

    /// Indexed child access. Out-of-range access is a contract violation.
    pub fn child(&self, index: usize) -> ConcreteWidget {
        match self.0.children.borrow().get(index) {
            Some(c) => c.clone(),
            None => panic!("widget {:?} has no child {}", self, index),
        }
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// First direct child carrying the given search name; fatal if absent.
    /// Only used on trees built by the constructor catalog, where the name
    /// is guaranteed present.
    pub fn named(&self, name: &str) -> ConcreteWidget {
        for child in self.0.children.borrow().iter() {
            if *child.0.name.borrow() == name {
                return child.clone();
            }
        }
        panic!("widget {:?} has no subwidget named {:?}", self, name)
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.0.win.borrow().clone()
    }

    pub(crate) fn attached_window(&self) -> WindowHandle {
        match self.window() {
            Some(win) => win,
            None => panic!("widget {:?} is not attached to a window", self),
        }
    }

    pub fn is_window_root(&self) -> bool {
        self.0.window_root.get()
    }

    pub(crate) fn mark_window_root(&self) {
        self.0.window_root.set(true);
    }

    pub(crate) fn layout(&self) -> Layout {
        self.0.layout.get()
    }

    /// Routes an event through the substrate, then the body handler.
    pub fn emit(&self, ev: WidgetEvent) {
        log::trace!("{:?} << {:?}", self, ev);
        match &ev {
            WidgetEvent::AttachWindow(win) => {
                *self.0.win.borrow_mut() = win.clone();
                let children = self.0.children.borrow().clone();
                for child in children {
                    child.emit(WidgetEvent::AttachWindow(win.clone()));
                }
            }
            WidgetEvent::Position { x, y, w, h, grav } => {
                self.0.layout.set(Layout {
                    w: *w,
                    h: *h,
                    ox: *x + anchor_dx(*grav, *w),
                    oy: *y + anchor_dy(*grav, *h),
                    grav: *grav,
                });
            }
            WidgetEvent::Invalidate(region) => push_invalid(&self.0.dirty, *region),
            WidgetEvent::InvalidateAll => *self.0.dirty.borrow_mut() = Invalidation::All,
            _ => {}
        }
        let mut body = self.0.body.borrow_mut();
        let mut cx = EventCx { rep: &self.0 };
        body.handle_event(&mut cx, &ev);
    }

    /// Redraws `region` with the given renderer; returns the stop flag.
    pub fn repaint(&self, ren: &mut dyn Renderer, region: Region) -> bool {
        let mut body = self.0.body.borrow_mut();
        let mut cx = EventCx { rep: &self.0 };
        body.repaint(&mut cx, ren, region)
    }

    pub fn size_hint(&self, mode: i32) -> (Coord, Coord) {
        self.0.body.borrow().size_hint(mode)
    }

    /// Drains the pending invalidation accumulated since the last call.
    pub fn take_invalidation(&self) -> Invalidation {
        std::mem::replace(&mut *self.0.dirty.borrow_mut(), Invalidation::None)
    }

    // Generic attribute store.

    pub fn set_string(&self, key: &str, value: &str) {
        self.0.attrs.borrow_mut().insert(key.to_string(), AttrValue::Str(value.to_string()));
    }

    pub fn get_string(&self, key: &str) -> String {
        match self.0.attrs.borrow().get(key) {
            Some(AttrValue::Str(s)) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn set_integer(&self, key: &str, value: i32) {
        self.0.attrs.borrow_mut().insert(key.to_string(), AttrValue::Int(value));
    }

    pub fn get_integer(&self, key: &str) -> i32 {
        match self.0.attrs.borrow().get(key) {
            Some(AttrValue::Int(i)) => *i,
            _ => 0,
        }
    }

    pub fn set_coord2(&self, key: &str, value: Point) {
        self.0.attrs.borrow_mut().insert(key.to_string(), AttrValue::Coord2(value));
    }

    pub fn get_coord2(&self, key: &str) -> Point {
        match self.0.attrs.borrow().get(key) {
            Some(AttrValue::Coord2(p)) => *p,
            _ => Point::new(0, 0),
        }
    }

    pub fn set_coord4(&self, key: &str, value: Region) {
        self.0.attrs.borrow_mut().insert(key.to_string(), AttrValue::Coord4(value));
    }

    pub fn get_coord4(&self, key: &str) -> Region {
        match self.0.attrs.borrow().get(key) {
            Some(AttrValue::Coord4(r)) => *r,
            _ => Region::default(),
        }
    }

    pub fn set_widget(&self, key: &str, value: ConcreteWidget) {
        self.0.attrs.borrow_mut().insert(key.to_string(), AttrValue::Widget(value));
    }

    pub fn get_widget(&self, key: &str) -> Option<ConcreteWidget> {
        match self.0.attrs.borrow().get(key) {
            Some(AttrValue::Widget(w)) => Some(w.clone()),
            _ => None,
        }
    }

    // Notify chain.

    /// Registers an observer invoked after local notify handling, for
    /// every notified slot, in registration order.
    pub fn observe(&self, f: impl FnMut(Slot, &Blackbox) + 'static) -> ObserverKey {
        self.0.chain.borrow_mut().insert(Box::new(f))
    }

    pub fn unobserve(&self, key: ObserverKey) {
        self.0.chain.borrow_mut().remove(key);
    }

    pub(crate) fn run_notify_chain(&self, slot: Slot, val: &Blackbox) {
        let mut chain = self.0.chain.borrow_mut();
        let order = chain.order.clone();
        for key in order {
            if let Some(f) = chain.observers.get_mut(key) {
                f(slot, val);
            }
        }
    }
}
