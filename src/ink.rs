//! Freehand ink capture widget.
//!
//! Accumulates pointer strokes as polylines in logical units, erases by
//! proximity on right-button press, and commits the stroke set to an
//! external callback.

use crate::bridge::abstract_widget;
use crate::display::{black, Color, Coord, Pencil, Region, Renderer, PIXEL};
use crate::event::{MouseKind, WidgetEvent};
use crate::widget::{AbstractWidget, ConcreteWidget, EventCx, WidgetBody};
use std::rc::Rc;

/// One stroke, as logical-unit points in capture order.
pub type Stroke = Vec<(Coord, Coord)>;

/// What the external callback receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InkCommit {
    /// The stroke set: strokes oldest-to-newest, points within each stroke
    /// most-recent-first.
    Strokes(Vec<Stroke>),
    /// The pointer left past the far edge; replaces a stroke commit.
    EdgeExit,
}

pub type InkCallback = Rc<dyn Fn(InkCommit)>;

/// Strokes closer than this to the pointer are erased, in logical units.
const ERASE_RADIUS: Coord = 10;

fn pastel() -> Color {
    Color::new(1.0, 1.0, 0.94, 1.0)
}

fn nearby(p: (Coord, Coord), stroke: &Stroke) -> bool {
    stroke.iter().any(|q| {
        let dx = (p.0 - q.0) as i64;
        let dy = (p.1 - q.1) as i64;
        dx * dx + dy * dy <= (ERASE_RADIUS as i64) * (ERASE_RADIUS as i64)
    })
}

pub struct InkBody {
    cb: InkCallback,
    strokes: Vec<Stroke>,
    dragging: bool,
}

impl InkBody {
    pub fn new(cb: InkCallback) -> Self {
        InkBody { cb, strokes: Vec::new(), dragging: false }
    }

    /// Invalidates the region around the last segment of the last stroke.
    fn refresh_last(&self, cx: &mut EventCx<'_>) {
        let sh = match self.strokes.last() {
            Some(sh) if !sh.is_empty() => sh,
            _ => return,
        };
        let q = sh[sh.len() - 1];
        let p = sh[sh.len().saturating_sub(2)];
        let x1 = p.0.min(q.0) * PIXEL;
        let y1 = p.1.min(q.1) * PIXEL;
        let x2 = p.0.max(q.0) * PIXEL;
        let y2 = p.1.max(q.1) * PIXEL;
        cx.invalidate(Region::new(
            x1 - 3 * PIXEL,
            y1 - 3 * PIXEL,
            x2 + 3 * PIXEL,
            y2 + 3 * PIXEL,
        ));
    }

    fn commit(&self) {
        let strokes = self
            .strokes
            .iter()
            .map(|sh| sh.iter().rev().cloned().collect())
            .collect();
        (self.cb)(InkCommit::Strokes(strokes));
    }
}

impl WidgetBody for InkBody {
    fn kind(&self) -> &'static str {
        "ink"
    }

    fn size_hint(&self, mode: i32) -> (Coord, Coord) {
        if mode == 1 {
            (1280 * PIXEL, 400 * PIXEL)
        } else {
            (600 * PIXEL, 400 * PIXEL)
        }
    }

    fn repaint(&mut self, _cx: &mut EventCx<'_>, ren: &mut dyn Renderer, region: Region) -> bool {
        ren.clear(region, pastel());
        ren.set_pencil(Pencil::new(black(), 2 * PIXEL));
        for sh in &self.strokes {
            if sh.len() == 1 {
                let x = [sh[0].0 * PIXEL; 2];
                let y = [sh[0].1 * PIXEL; 2];
                ren.lines(&x, &y);
            } else if sh.len() > 1 {
                let x: Vec<Coord> = sh.iter().map(|p| p.0 * PIXEL).collect();
                let y: Vec<Coord> = sh.iter().map(|p| p.1 * PIXEL).collect();
                ren.lines(&x, &y);
            }
        }
        false
    }

    fn handle_event(&mut self, cx: &mut EventCx<'_>, ev: &WidgetEvent) {
        let m = match ev {
            WidgetEvent::Mouse(m) => m,
            _ => return,
        };
        let (x, y) = (m.pos.x, m.pos.y);
        let (lx, ly) = (x / PIXEL, y / PIXEL);

        if m.buttons.right() {
            let n = self.strokes.len();
            self.strokes.retain(|sh| !nearby((lx, ly), sh));
            if self.strokes.len() != n {
                cx.invalidate_all();
                self.commit();
            }
        } else if m.kind == MouseKind::PressLeft {
            self.strokes.push(vec![(lx, ly)]);
            self.refresh_last(cx);
            self.dragging = true;
        } else if m.kind == MouseKind::Leave && (x < 0 || x >= cx.width()) {
            // gesture boundary; the far edge signals instead of committing,
            // the near edge commits the cleared set (observed behavior)
            if x >= cx.width() {
                (self.cb)(InkCommit::EdgeExit);
            }
            self.strokes.clear();
            cx.invalidate_all();
            if x < 0 {
                self.commit();
            }
        } else if matches!(m.kind, MouseKind::Move | MouseKind::ReleaseLeft | MouseKind::Leave)
            && self.dragging
            && !self.strokes.is_empty()
        {
            let appended = match self.strokes.last_mut() {
                Some(sh) if sh.last() != Some(&(lx, ly)) => {
                    sh.push((lx, ly));
                    true
                }
                _ => false,
            };
            if appended {
                self.refresh_last(cx);
            }
            if m.kind != MouseKind::Move {
                self.dragging = false;
                self.commit();
            }
            cx.invalidate_all();
        }
    }
}

/// Builds the ink capture widget around the commit callback.
pub fn ink_widget(cb: InkCallback) -> AbstractWidget {
    abstract_widget(ConcreteWidget::new(Box::new(InkBody::new(cb))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::concrete_widget;
    use crate::display::{Gravity, Point};
    use crate::event::{ButtonMask, MouseInput};
    use crate::testutil::{RecordingRenderer, RenderOp};
    use crate::widget::Invalidation;
    use std::cell::RefCell;

    fn capture() -> (InkCallback, Rc<RefCell<Vec<InkCommit>>>) {
        let commits = Rc::new(RefCell::new(Vec::new()));
        let c = commits.clone();
        let cb: InkCallback = Rc::new(move |commit| c.borrow_mut().push(commit));
        (cb, commits)
    }

    fn ink() -> (ConcreteWidget, Rc<RefCell<Vec<InkCommit>>>) {
        let (cb, commits) = capture();
        let w = concrete_widget(ink_widget(cb));
        w.emit(WidgetEvent::Position {
            x: 0,
            y: 0,
            w: 600 * PIXEL,
            h: 400 * PIXEL,
            grav: Gravity::NorthWest,
        });
        w.take_invalidation();
        (w, commits)
    }

    fn mouse(w: &ConcreteWidget, kind: MouseKind, lx: Coord, ly: Coord, buttons: ButtonMask) {
        w.emit(WidgetEvent::Mouse(MouseInput {
            kind,
            pos: Point::new(lx * PIXEL, ly * PIXEL),
            buttons,
            time: 0,
        }));
    }

    #[test]
    fn press_move_release_accumulates_one_stroke() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        mouse(&w, MouseKind::Move, 20, 10, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 20, 10, ButtonMask::default());

        assert_eq!(
            *commits.borrow(),
            vec![InkCommit::Strokes(vec![vec![(20, 10), (10, 10)]])]
        );
    }

    #[test]
    fn press_requests_a_minimal_repaint_region() {
        let (w, _commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        assert_eq!(
            w.take_invalidation(),
            Invalidation::Regions(vec![Region::new(
                7 * PIXEL,
                7 * PIXEL,
                13 * PIXEL,
                13 * PIXEL
            )])
        );
    }

    #[test]
    fn duplicate_positions_are_not_appended() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 5, 5, ButtonMask::LEFT);
        mouse(&w, MouseKind::Move, 5, 5, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 5, 5, ButtonMask::default());
        assert_eq!(
            *commits.borrow(),
            vec![InkCommit::Strokes(vec![vec![(5, 5)]])]
        );
    }

    #[test]
    fn two_drags_commit_strokes_oldest_first() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 1, 1, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 2, 1, ButtonMask::default());
        mouse(&w, MouseKind::PressLeft, 100, 100, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 101, 100, ButtonMask::default());

        assert_eq!(
            commits.borrow().last(),
            Some(&InkCommit::Strokes(vec![
                vec![(2, 1), (1, 1)],
                vec![(101, 100), (100, 100)],
            ]))
        );
    }

    #[test]
    fn erase_removes_only_nearby_strokes() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 20, 10, ButtonMask::default());
        mouse(&w, MouseKind::PressLeft, 300, 300, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 310, 300, ButtonMask::default());
        commits.borrow_mut().clear();
        w.take_invalidation();

        mouse(&w, MouseKind::PressRight, 22, 12, ButtonMask::RIGHT);

        assert_eq!(
            *commits.borrow(),
            vec![InkCommit::Strokes(vec![vec![(310, 300), (300, 300)]])]
        );
        assert_eq!(w.take_invalidation(), Invalidation::All);
    }

    #[test]
    fn erase_far_from_any_stroke_is_a_no_op() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 20, 10, ButtonMask::default());
        commits.borrow_mut().clear();
        w.take_invalidation();

        mouse(&w, MouseKind::PressRight, 400, 300, ButtonMask::RIGHT);

        assert!(commits.borrow().is_empty());
        assert_eq!(w.take_invalidation(), Invalidation::None);
    }

    #[test]
    fn leave_past_far_edge_signals_and_clears() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        commits.borrow_mut().clear();

        mouse(&w, MouseKind::Leave, 600, 10, ButtonMask::LEFT);

        assert_eq!(*commits.borrow(), vec![InkCommit::EdgeExit]);
        assert_eq!(w.take_invalidation(), Invalidation::All);

        // strokes are gone: a release drag no longer has anything to extend
        mouse(&w, MouseKind::ReleaseLeft, 10, 10, ButtonMask::default());
        assert_eq!(*commits.borrow(), vec![InkCommit::EdgeExit]);
    }

    #[test]
    fn leave_past_near_edge_commits_the_cleared_set() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        commits.borrow_mut().clear();

        mouse(&w, MouseKind::Leave, -1, 10, ButtonMask::LEFT);

        assert_eq!(*commits.borrow(), vec![InkCommit::Strokes(vec![])]);
    }

    #[test]
    fn leave_inside_bounds_seals_the_stroke() {
        let (w, commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        mouse(&w, MouseKind::Leave, 30, 10, ButtonMask::LEFT);

        assert_eq!(
            *commits.borrow(),
            vec![InkCommit::Strokes(vec![vec![(30, 10), (10, 10)]])]
        );
    }

    #[test]
    fn repaint_draws_background_then_strokes() {
        let (w, _commits) = ink();
        mouse(&w, MouseKind::PressLeft, 10, 10, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 20, 15, ButtonMask::default());
        mouse(&w, MouseKind::PressLeft, 50, 50, ButtonMask::LEFT);
        mouse(&w, MouseKind::ReleaseLeft, 50, 50, ButtonMask::default());

        let mut ren = RecordingRenderer::default();
        let region = Region::new(0, 0, 600 * PIXEL, 400 * PIXEL);
        let stop = w.repaint(&mut ren, region);
        assert!(!stop);

        assert_eq!(ren.ops[0], RenderOp::Clear(region, pastel()));
        assert_eq!(ren.ops[1], RenderOp::Pencil(Pencil::new(black(), 2 * PIXEL)));
        assert_eq!(
            ren.ops[2],
            RenderOp::Lines(vec![10 * PIXEL, 20 * PIXEL], vec![10 * PIXEL, 15 * PIXEL])
        );
        // a single-point stroke draws as a zero-length segment
        assert_eq!(
            ren.ops[3],
            RenderOp::Lines(vec![50 * PIXEL, 50 * PIXEL], vec![50 * PIXEL, 50 * PIXEL])
        );
    }

    #[test]
    fn size_hint_widens_in_alternate_mode() {
        let (w, _commits) = ink();
        assert_eq!(w.size_hint(0), (600 * PIXEL, 400 * PIXEL));
        assert_eq!(w.size_hint(1), (1280 * PIXEL, 400 * PIXEL));
    }
}
