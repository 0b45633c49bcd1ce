//! Catalog of concrete widget constructors.
//!
//! Every constructor accepts abstract sub-widgets, converts them to the
//! concrete view, assembles a concrete node, and returns the abstract
//! wrapper. Layout and painting of these nodes belong to the backend; the
//! bodies here only carry the state the protocol needs to reach.

use crate::bridge::{abstract_widget, concrete_promise, concrete_widget, concrete_widgets, Promise};
use crate::display::{black, dark_grey, Color, Coord, Region, Renderer, PIXEL};
use crate::error::ResourceError;
use crate::event::{MouseKind, WidgetEvent};
use crate::widget::{AbstractWidget, ConcreteWidget, EventCx, InertBody, WidgetBody};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Callback of a button press.
pub type Command = Rc<dyn Fn()>;

/// Callback of a text input, invoked with the committed content.
pub type InputCommand = Rc<dyn Fn(String)>;

fn node(kind: &'static str, children: Vec<ConcreteWidget>) -> ConcreteWidget {
    ConcreteWidget::new(Box::new(InertBody(kind))).with_children(children)
}

pub fn horizontal_list(a: Vec<AbstractWidget>) -> AbstractWidget {
    abstract_widget(node("horizontal list", concrete_widgets(&a)))
}

pub fn vertical_list(a: Vec<AbstractWidget>) -> AbstractWidget {
    abstract_widget(node("vertical list", concrete_widgets(&a)))
}

pub fn horizontal_menu(a: Vec<AbstractWidget>) -> AbstractWidget {
    abstract_widget(node("horizontal menu", concrete_widgets(&a)))
}

pub fn vertical_menu(a: Vec<AbstractWidget>) -> AbstractWidget {
    abstract_widget(node("vertical menu", concrete_widgets(&a)))
}

pub fn tile_menu(a: Vec<AbstractWidget>, cols: i32) -> AbstractWidget {
    let w = node("tile", concrete_widgets(&a));
    w.set_integer("columns", cols);
    abstract_widget(w)
}

pub fn switch_widget(a: Vec<AbstractWidget>, names: Vec<String>, init: i32) -> AbstractWidget {
    let w = node("switch", concrete_widgets(&a));
    w.set_integer("current", init);
    w.set_string("names", &names.join(";"));
    abstract_widget(w)
}

pub fn optional_widget(w: AbstractWidget, on: bool) -> AbstractWidget {
    let n = node("optional", vec![concrete_widget(w)]);
    n.set_string("shown", if on { "on" } else { "off" });
    abstract_widget(n)
}

pub fn empty_widget() -> AbstractWidget {
    glue_widget(false, false, 0, 0)
}

pub fn glue_widget(hx: bool, vx: bool, w: Coord, h: Coord) -> AbstractWidget {
    let n = node("glue", Vec::new());
    n.set_string("hx", if hx { "on" } else { "off" });
    n.set_string("vx", if vx { "on" } else { "off" });
    n.set_integer("width", w);
    n.set_integer("height", h);
    abstract_widget(n)
}

pub fn menu_separator(vert: bool) -> AbstractWidget {
    let n = node("separator", Vec::new());
    n.set_integer("width", 2 * PIXEL);
    n.set_integer("height", 2 * PIXEL);
    n.set_string("vertical", if vert { "on" } else { "off" });
    abstract_widget(n)
}

/// Packs a color into the integer attribute the backend reads it from.
fn pack_color(c: Color) -> i32 {
    let ch = |v: f32| (v.max(0.0).min(1.0) * 255.0) as i32;
    (ch(c.color.red) << 24) | (ch(c.color.green) << 16) | (ch(c.color.blue) << 8) | ch(c.alpha)
}

pub fn text_widget(s: &str, transparent: bool, lang: &str) -> AbstractWidget {
    menu_text_widget(s, black(), transparent, lang, false)
}

pub fn menu_text_widget(
    s: &str,
    col: Color,
    transparent: bool,
    lang: &str,
    monospaced: bool,
) -> AbstractWidget {
    let n = node("text", Vec::new());
    n.set_string("text", s);
    n.set_string("language", lang);
    n.set_string("transparent", if transparent { "on" } else { "off" });
    n.set_string("monospaced", if monospaced { "on" } else { "off" });
    n.set_integer("color", pack_color(col));
    abstract_widget(n)
}

struct ImageBody {
    path: PathBuf,
    data: Option<Vec<u8>>,
    failed: bool,
}

impl ImageBody {
    fn load(path: &Path) -> Result<Vec<u8>, ResourceError> {
        if !path.is_file() {
            return Err(ResourceError::InvalidPath(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(ResourceError::InvalidData(path.display().to_string()));
        }
        Ok(bytes)
    }
}

impl WidgetBody for ImageBody {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn repaint(&mut self, _cx: &mut EventCx<'_>, _ren: &mut dyn Renderer, _region: Region) -> bool {
        if self.data.is_none() && !self.failed {
            match ImageBody::load(&self.path) {
                Ok(bytes) => self.data = Some(bytes),
                Err(e) => {
                    log::warn!("cannot load image {}: {}", self.path.display(), e);
                    self.failed = true;
                }
            }
        }
        false
    }
}

pub fn image_widget(path: &Path) -> AbstractWidget {
    abstract_widget(ConcreteWidget::new(Box::new(ImageBody {
        path: path.to_path_buf(),
        data: None,
        failed: false,
    })))
}

struct ButtonBody {
    cmd: Command,
    enabled: bool,
}

impl WidgetBody for ButtonBody {
    fn kind(&self) -> &'static str {
        "command button"
    }

    fn handle_event(&mut self, _cx: &mut EventCx<'_>, ev: &WidgetEvent) {
        if let WidgetEvent::Mouse(m) = ev {
            if self.enabled && m.kind == MouseKind::ReleaseLeft {
                (self.cmd)();
            }
        }
    }
}

pub fn command_button(w: AbstractWidget, cmd: Command, button_flag: bool) -> AbstractWidget {
    let body = ButtonBody { cmd, enabled: true };
    let n = ConcreteWidget::new(Box::new(body)).with_children(vec![concrete_widget(w)]);
    n.set_string("centered", if button_flag { "on" } else { "off" });
    abstract_widget(n)
}

/// Three-part button: left marker, main content, right annotation.
pub fn command_button_parts(
    lw: AbstractWidget,
    cw: AbstractWidget,
    rw: AbstractWidget,
    cmd: Command,
    enabled: bool,
    centered: bool,
) -> AbstractWidget {
    let body = ButtonBody { cmd, enabled };
    let n = ConcreteWidget::new(Box::new(body)).with_children(vec![
        concrete_widget(lw),
        concrete_widget(cw),
        concrete_widget(rw),
    ]);
    n.set_string("centered", if centered { "on" } else { "off" });
    abstract_widget(n)
}

pub fn menu_group(name: &str, lang: &str) -> AbstractWidget {
    let lw = empty_widget();
    let cw = menu_text_widget(name, dark_grey(), false, lang, false);
    let rw = empty_widget();
    command_button_parts(lw, cw, rw, Rc::new(|| {}), false, true)
}

fn glyph_widget(glyph: &str, col: Color) -> AbstractWidget {
    let n = node("glyph", Vec::new());
    n.set_string("glyph", glyph);
    n.set_integer("color", pack_color(col));
    abstract_widget(n)
}

/// Menu entry button. The textual prefix markers "v", "o" and "*" become
/// glyph placeholders; without a prefix or key-string this is a plain
/// command button.
pub fn menu_button(
    w: AbstractWidget,
    cmd: Command,
    pre: &str,
    ks: &str,
    ok: bool,
) -> AbstractWidget {
    if pre.is_empty() && ks.is_empty() {
        return command_button(w, cmd, false);
    }
    let col = if ok { black() } else { dark_grey() };
    let mut lw = empty_widget();
    let rw = menu_text_widget(ks, col, true, "english", true);
    let glyph = match pre {
        "v" => Some("checked"),
        "o" => Some("circ"),
        "*" => Some("bullet"),
        _ => None,
    };
    if let Some(g) = glyph {
        lw = glyph_widget(g, col);
    }
    command_button_parts(lw, w, rw, cmd, ok, false)
}

struct PulldownBody {
    kind: &'static str,
    menu: Promise<ConcreteWidget>,
}

impl WidgetBody for PulldownBody {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn handle_event(&mut self, _cx: &mut EventCx<'_>, ev: &WidgetEvent) {
        if let WidgetEvent::Mouse(m) = ev {
            // the menu tree is only built on first open
            if m.kind == MouseKind::PressLeft {
                let menu = self.menu.force();
                log::trace!("opening {:?} under {}", menu, self.kind);
            }
        }
    }
}

pub fn pulldown_button(w: AbstractWidget, pw: Promise<AbstractWidget>) -> AbstractWidget {
    let body = PulldownBody { kind: "pulldown button", menu: concrete_promise(pw) };
    abstract_widget(ConcreteWidget::new(Box::new(body)).with_children(vec![concrete_widget(w)]))
}

pub fn pullright_button(w: AbstractWidget, pw: Promise<AbstractWidget>) -> AbstractWidget {
    let body = PulldownBody { kind: "pullright button", menu: concrete_promise(pw) };
    abstract_widget(ConcreteWidget::new(Box::new(body)).with_children(vec![concrete_widget(w)]))
}

pub fn popup_widget(w: AbstractWidget) -> AbstractWidget {
    abstract_widget(node("popup", vec![concrete_widget(w)]))
}

pub fn canvas_widget(w: AbstractWidget) -> AbstractWidget {
    abstract_widget(node("canvas", vec![concrete_widget(w)]))
}

struct InputBody {
    cb: InputCommand,
}

impl WidgetBody for InputBody {
    fn kind(&self) -> &'static str {
        "input"
    }

    fn handle_event(&mut self, cx: &mut EventCx<'_>, ev: &WidgetEvent) {
        if let WidgetEvent::Keypress(k) = ev {
            if k.key == "return" {
                (self.cb)(cx.string_attr("input"));
            }
        }
    }
}

fn input_node(cb: InputCommand, input_type: &str, proposals: &[String]) -> ConcreteWidget {
    let w = ConcreteWidget::new(Box::new(InputBody { cb }));
    w.set_string("type", input_type);
    if let Some(first) = proposals.first() {
        w.set_string("default", first);
    }
    w
}

pub fn input_text_widget(
    cb: InputCommand,
    input_type: &str,
    proposals: &[String],
) -> AbstractWidget {
    abstract_widget(input_node(cb, input_type, proposals))
}

/// A form with one prompted input per entry. The tree layout is what
/// `read(FormField, i)` navigates: child 0, then "inputs", then the field
/// index, then "input".
pub fn inputs_list_widget(cb: InputCommand, prompts: &[String]) -> AbstractWidget {
    let fields: Vec<ConcreteWidget> = prompts
        .iter()
        .map(|prompt| {
            let label = concrete_widget(text_widget(prompt, false, "english"));
            let input = input_node(cb.clone(), "string", &[]).with_name("input");
            node("form field", vec![label, input])
        })
        .collect();
    let inputs = node("inputs", fields).with_name("inputs");
    let form = node("form", vec![inputs]);
    abstract_widget(node("inputs list", vec![form]))
}

/// File chooser; its sub-trees back the `File` and `Directory` read slots.
pub fn file_chooser_widget(cb: InputCommand, file_type: &str, magnification: &str) -> AbstractWidget {
    let file = node("file entry", vec![input_node(cb.clone(), "file", &[]).with_name("input")])
        .with_name("file");
    let directory =
        node("directory entry", vec![input_node(cb, "directory", &[]).with_name("input")])
            .with_name("directory");
    let chooser = node("chooser", vec![file, directory]);
    let w = node("file chooser", vec![chooser]);
    w.set_string("type", file_type);
    w.set_string("magnification", magnification);
    abstract_widget(w)
}

pub fn balloon_widget(w: AbstractWidget, help: AbstractWidget) -> AbstractWidget {
    abstract_widget(node("balloon", vec![concrete_widget(w), concrete_widget(help)]))
}

pub fn wait_widget(w: Coord, h: Coord, message: &str) -> AbstractWidget {
    let n = node("wait", Vec::new());
    n.set_integer("width", w);
    n.set_integer("height", h);
    n.set_string("message", message);
    abstract_widget(n)
}

pub fn plain_window_widget(w: AbstractWidget, name: &str) -> AbstractWidget {
    let root = node("window", vec![concrete_widget(w)]);
    root.mark_window_root();
    root.set_string("window name", name);
    abstract_widget(root)
}

pub fn popup_window_widget(w: AbstractWidget, name: &str) -> AbstractWidget {
    let root = node("popup window", vec![concrete_widget(w)]);
    root.mark_window_root();
    root.set_string("window name", name);
    abstract_widget(root)
}

pub fn destroy_window_widget(w: AbstractWidget) {
    concrete_widget(w).emit(WidgetEvent::Destroy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackbox::{close_box, Blackbox};
    use crate::slot::Slot;
    use std::cell::RefCell;

    #[test]
    fn lists_convert_children_to_concrete_form() {
        let items = vec![text_widget("a", false, "english"), text_widget("b", false, "english")];
        let list = concrete_widget(vertical_list(items.clone()));
        assert_eq!(list.child_count(), 2);
        assert_eq!(list.child(0), concrete_widget(items[0].clone()));
    }

    #[test]
    fn menu_button_prefixes_become_glyphs() {
        for (pre, glyph) in &[("v", "checked"), ("o", "circ"), ("*", "bullet")] {
            let b = menu_button(text_widget("Bold", false, "english"), Rc::new(|| {}), pre, "C-b", true);
            let b = concrete_widget(b);
            assert_eq!(b.kind(), "command button");
            assert_eq!(b.child(0).kind(), "glyph");
            assert_eq!(b.child(0).get_string("glyph"), *glyph);
            assert_eq!(b.child(2).kind(), "text");
        }
    }

    #[test]
    fn menu_button_without_markers_is_a_plain_button() {
        let b = menu_button(text_widget("Open", false, "english"), Rc::new(|| {}), "", "", true);
        let b = concrete_widget(b);
        assert_eq!(b.kind(), "command button");
        assert_eq!(b.child_count(), 1);
    }

    #[test]
    fn unknown_prefix_keeps_the_empty_marker() {
        let b = menu_button(text_widget("x", false, "english"), Rc::new(|| {}), "?", "C-x", true);
        assert_eq!(concrete_widget(b).child(0).kind(), "glue");
    }

    #[test]
    fn button_fires_on_release() {
        use crate::display::Point;
        use crate::event::{ButtonMask, MouseInput};

        let fired = Rc::new(RefCell::new(0));
        let f = fired.clone();
        let b = concrete_widget(command_button(
            text_widget("Ok", false, "english"),
            Rc::new(move || *f.borrow_mut() += 1),
            true,
        ));

        b.emit(WidgetEvent::Mouse(MouseInput {
            kind: MouseKind::PressLeft,
            pos: Point::new(0, 0),
            buttons: ButtonMask::LEFT,
            time: 0,
        }));
        b.emit(WidgetEvent::Mouse(MouseInput {
            kind: MouseKind::ReleaseLeft,
            pos: Point::new(0, 0),
            buttons: ButtonMask::default(),
            time: 1,
        }));
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn form_field_navigation() {
        let prompts = vec![String::from("Name:"), String::from("Title:")];
        let form = concrete_widget(inputs_list_widget(Rc::new(|_| {}), &prompts));
        for i in 0..2 {
            let field = form.read(Slot::FormField, close_box(i as i32));
            assert_eq!(concrete_widget(field).kind(), "input");
        }
    }

    #[test]
    fn file_chooser_sub_slots() {
        let chooser = concrete_widget(file_chooser_widget(Rc::new(|_| {}), "image", "1"));
        let file = concrete_widget(chooser.read(Slot::File, Blackbox::nil()));
        let dir = concrete_widget(chooser.read(Slot::Directory, Blackbox::nil()));
        assert_eq!(file.kind(), "input");
        assert_eq!(dir.kind(), "input");
        assert_ne!(file, dir);
        assert_eq!(file.get_string("type"), "file");
        assert_eq!(dir.get_string("type"), "directory");
    }

    #[test]
    fn input_commits_on_return() {
        use crate::event::Keypress;

        let committed = Rc::new(RefCell::new(Vec::new()));
        let c = committed.clone();
        let input = concrete_widget(input_text_widget(
            Rc::new(move |s| c.borrow_mut().push(s)),
            "string",
            &[String::from("untitled")],
        ));
        assert_eq!(input.get_string("default"), "untitled");

        input.send(Slot::StringInput, close_box(String::from("report.tm")));
        input.emit(WidgetEvent::Keypress(Keypress { key: String::from("return"), time: 5 }));
        assert_eq!(*committed.borrow(), vec![String::from("report.tm")]);
    }

    #[test]
    fn window_widgets_are_window_roots() {
        let root = concrete_widget(plain_window_widget(empty_widget(), "untitled"));
        assert!(root.is_window_root());
        assert_eq!(root.get_string("window name"), "untitled");

        let popup = concrete_widget(popup_window_widget(empty_widget(), ""));
        assert!(popup.is_window_root());
        assert_eq!(popup.kind(), "popup window");
    }

    #[test]
    fn pulldown_menu_is_built_lazily() {
        use crate::display::Point;
        use crate::event::{ButtonMask, MouseInput};
        use std::cell::Cell;

        let built = Rc::new(Cell::new(false));
        let b = built.clone();
        let menu = Promise::new(move || {
            b.set(true);
            vertical_menu(vec![menu_group("File", "english")])
        });
        let button = concrete_widget(pulldown_button(text_widget("File", false, "english"), menu));
        assert!(!built.get());

        button.emit(WidgetEvent::Mouse(MouseInput {
            kind: MouseKind::PressLeft,
            pos: Point::new(0, 0),
            buttons: ButtonMask::LEFT,
            time: 0,
        }));
        assert!(built.get());
    }
}
