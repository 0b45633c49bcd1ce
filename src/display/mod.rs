//! Low-level drawing interface and screen geometry.

use palette::Srgba;
use std::{cell::RefCell, rc::Rc};

/// Screen coordinate, in sub-pixel units.
pub type Coord = i32;
pub type Point = euclid::Point2D<Coord, euclid::UnknownUnit>;
pub type Size = euclid::Size2D<Coord, euclid::UnknownUnit>;

/// Screen units per device pixel.
pub const PIXEL: Coord = 256;

pub type Color = Srgba;

/// Opaque black, the default drawing color.
pub fn black() -> Color {
    Color::new(0.0, 0.0, 0.0, 1.0)
}

pub fn dark_grey() -> Color {
    Color::new(0.25, 0.25, 0.25, 1.0)
}

/// Axis-aligned region given by two corners, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x1: Coord,
    pub y1: Coord,
    pub x2: Coord,
    pub y2: Coord,
}

impl Region {
    pub fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Region { x1, y1, x2, y2 }
    }

    pub fn translate(self, dx: Coord, dy: Coord) -> Self {
        Region::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }
}

/// Anchor corner for widget layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

/// Horizontal offset from a widget's left edge to its anchor point.
pub fn anchor_dx(grav: Gravity, w: Coord) -> Coord {
    match grav {
        Gravity::NorthWest | Gravity::West | Gravity::SouthWest => 0,
        Gravity::North | Gravity::Center | Gravity::South => w / 2,
        Gravity::NorthEast | Gravity::East | Gravity::SouthEast => w,
    }
}

/// Vertical offset from a widget's top edge to its anchor point.
pub fn anchor_dy(grav: Gravity, h: Coord) -> Coord {
    match grav {
        Gravity::NorthWest | Gravity::North | Gravity::NorthEast => 0,
        Gravity::West | Gravity::Center | Gravity::East => h / 2,
        Gravity::SouthWest | Gravity::South | Gravity::SouthEast => h,
    }
}

/// Current stroke style of a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pencil {
    pub color: Color,
    pub width: Coord,
}

impl Pencil {
    pub fn new(color: Color, width: Coord) -> Self {
        Pencil { color, width }
    }
}

/// A trait to process primitive drawing operations.
///
/// Implemented by the rendering backend; the bridge only ever drives it
/// through these calls.
pub trait Renderer {
    /// Sets the pencil used by subsequent `lines` calls.
    fn set_pencil(&mut self, pencil: Pencil);

    /// Draws an open polyline through the points given as parallel
    /// coordinate arrays. A repeated point draws as a zero-length segment.
    fn lines(&mut self, x: &[Coord], y: &[Coord]);

    /// Fills a region with the pencil color.
    fn fill(&mut self, region: Region);

    /// Fills a region with an explicit color, leaving the pencil untouched.
    fn clear(&mut self, region: Region, color: Color);
}

pub type RendererHandle = Rc<RefCell<dyn Renderer>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_offsets() {
        assert_eq!(anchor_dx(Gravity::NorthWest, 100), 0);
        assert_eq!(anchor_dx(Gravity::Center, 100), 50);
        assert_eq!(anchor_dx(Gravity::SouthEast, 100), 100);
        assert_eq!(anchor_dy(Gravity::NorthEast, 80), 0);
        assert_eq!(anchor_dy(Gravity::West, 80), 40);
        assert_eq!(anchor_dy(Gravity::South, 80), 80);
    }

    #[test]
    fn region_translate() {
        let r = Region::new(1, 2, 3, 4).translate(10, 20);
        assert_eq!(r, Region::new(11, 22, 13, 24));
    }
}
