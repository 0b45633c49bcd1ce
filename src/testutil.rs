//! Mock window manager and renderer shared by unit tests.

use crate::bridge::abstract_widget;
use crate::display::{Color, Coord, Pencil, Region, Renderer, RendererHandle};
use crate::widget::{AbstractWidget, ConcreteWidget, InertBody};
use crate::window::{Window, WindowHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Pencil(Pencil),
    Lines(Vec<Coord>, Vec<Coord>),
    Fill(Region),
    Clear(Region, Color),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub ops: Vec<RenderOp>,
}

impl Renderer for RecordingRenderer {
    fn set_pencil(&mut self, pencil: Pencil) {
        self.ops.push(RenderOp::Pencil(pencil));
    }

    fn lines(&mut self, x: &[Coord], y: &[Coord]) {
        self.ops.push(RenderOp::Lines(x.to_vec(), y.to_vec()));
    }

    fn fill(&mut self, region: Region) {
        self.ops.push(RenderOp::Fill(region));
    }

    fn clear(&mut self, region: Region, color: Color) {
        self.ops.push(RenderOp::Clear(region, color));
    }
}

pub struct TestWindow {
    id: i32,
    pub pos: Cell<(Coord, Coord)>,
    pub size: Cell<(Coord, Coord)>,
    pub visible: Cell<bool>,
    pub full_screen: Cell<bool>,
    pub focus: RefCell<Option<AbstractWidget>>,
    pub grab: RefCell<Option<AbstractWidget>>,
    pub pointer: RefCell<Option<(String, String)>>,
    pub calls: RefCell<Vec<String>>,
    pub renderer: Rc<RefCell<RecordingRenderer>>,
    root: RefCell<Option<AbstractWidget>>,
}

impl TestWindow {
    pub fn new(id: i32) -> Rc<Self> {
        Rc::new(TestWindow {
            id,
            pos: Cell::new((0, 0)),
            size: Cell::new((0, 0)),
            visible: Cell::new(false),
            full_screen: Cell::new(false),
            focus: RefCell::new(None),
            grab: RefCell::new(None),
            pointer: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            renderer: Rc::new(RefCell::new(RecordingRenderer::default())),
            root: RefCell::new(None),
        })
    }

    /// Makes `root` this window's widget and attaches the whole tree.
    pub fn attach(root: ConcreteWidget, id: i32) -> Rc<Self> {
        let win = TestWindow::new(id);
        *win.root.borrow_mut() = Some(abstract_widget(root.clone()));
        let handle: WindowHandle = win.clone();
        root.emit(crate::event::WidgetEvent::AttachWindow(Some(handle)));
        win
    }

    /// Wraps `child` in a window-root widget and attaches it.
    pub fn mount(child: ConcreteWidget, id: i32) -> (ConcreteWidget, Rc<Self>) {
        let root = ConcreteWidget::new(Box::new(InertBody("window"))).with_children(vec![child]);
        root.mark_window_root();
        let win = TestWindow::attach(root.clone(), id);
        (root, win)
    }
}

impl Window for TestWindow {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_position(&self, x: Coord, y: Coord) {
        self.calls.borrow_mut().push(format!("set_position({}, {})", x, y));
        self.pos.set((x, y));
    }

    fn position(&self) -> (Coord, Coord) {
        self.pos.get()
    }

    fn set_size(&self, w: Coord, h: Coord) {
        self.calls.borrow_mut().push(format!("set_size({}, {})", w, h));
        self.size.set((w, h));
    }

    fn size(&self) -> (Coord, Coord) {
        self.size.get()
    }

    fn set_visibility(&self, visible: bool) {
        self.calls.borrow_mut().push(format!("set_visibility({})", visible));
        self.visible.set(visible);
    }

    fn set_full_screen(&self, full: bool) {
        self.calls.borrow_mut().push(format!("set_full_screen({})", full));
        self.full_screen.set(full);
    }

    fn set_keyboard_focus(&self, widget: AbstractWidget, focus: bool) {
        self.calls.borrow_mut().push(format!("set_keyboard_focus({})", focus));
        *self.focus.borrow_mut() = if focus { Some(widget) } else { None };
    }

    fn get_keyboard_focus(&self, widget: &AbstractWidget) -> bool {
        self.focus.borrow().as_ref() == Some(widget)
    }

    fn set_mouse_grab(&self, widget: AbstractWidget, grab: bool) {
        self.calls.borrow_mut().push(format!("set_mouse_grab({})", grab));
        *self.grab.borrow_mut() = if grab { Some(widget) } else { None };
    }

    fn get_mouse_grab(&self, widget: &AbstractWidget) -> bool {
        self.grab.borrow().as_ref() == Some(widget)
    }

    fn set_mouse_pointer(&self, _widget: AbstractWidget, family: &str, name: &str) {
        self.calls.borrow_mut().push(format!("set_mouse_pointer({}, {})", family, name));
        *self.pointer.borrow_mut() = Some((family.to_string(), name.to_string()));
    }

    fn renderer(&self) -> RendererHandle {
        self.renderer.clone()
    }

    fn widget(&self) -> AbstractWidget {
        match &*self.root.borrow() {
            Some(w) => w.clone(),
            None => panic!("test window {} has no root widget", self.id),
        }
    }
}
