//! Type-tagged payload container for the slot protocol.
//!
//! Internally this is a closed sum over the payload shapes the protocol
//! moves around; externally it keeps the dynamic `close_box`/`open_box`
//! surface the protocol is written against. A tag mismatch is a fatal
//! contract violation between trusted components, so the accessors panic
//! with a diagnostic instead of returning an error.

use crate::display::{Point, Region, RendererHandle};
use crate::event::{Alarm, Keypress, MouseInput, PointerChange};
use crate::slot::Slot;
use std::fmt;

/// Tag of the value held by a [`Blackbox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadType {
    Nil,
    Bool,
    Int,
    Str,
    Coord2,
    Coord4,
    Keypress,
    Mouse,
    Pointer,
    Alarm,
    Renderer,
}

#[derive(Clone)]
enum Payload {
    Nil,
    Bool(bool),
    Int(i32),
    Str(String),
    Coord2(Point),
    Coord4(Region),
    Keypress(Keypress),
    Mouse(MouseInput),
    Pointer(PointerChange),
    Alarm(Alarm),
    Renderer(RendererHandle),
}

impl Payload {
    fn tag(&self) -> PayloadType {
        match self {
            Payload::Nil => PayloadType::Nil,
            Payload::Bool(_) => PayloadType::Bool,
            Payload::Int(_) => PayloadType::Int,
            Payload::Str(_) => PayloadType::Str,
            Payload::Coord2(_) => PayloadType::Coord2,
            Payload::Coord4(_) => PayloadType::Coord4,
            Payload::Keypress(_) => PayloadType::Keypress,
            Payload::Mouse(_) => PayloadType::Mouse,
            Payload::Pointer(_) => PayloadType::Pointer,
            Payload::Alarm(_) => PayloadType::Alarm,
            Payload::Renderer(_) => PayloadType::Renderer,
        }
    }
}

/// A single boxed value moving through the slot protocol.
#[derive(Clone)]
pub struct Blackbox(Payload);

impl Blackbox {
    /// The empty box, for slots that carry no payload.
    pub fn nil() -> Self {
        Blackbox(Payload::Nil)
    }

    /// Panics unless the box holds a value of type `T`.
    pub fn check_type<T: Boxed>(&self, slot: Slot) {
        if self.0.tag() != T::TYPE {
            panic!(
                "slot type = {}: type mismatch ({:?} expected, got {:?})",
                slot,
                T::TYPE,
                self.0.tag()
            );
        }
    }

    /// Panics unless the box is empty.
    pub fn check_void(&self, slot: Slot) {
        if !is_nil(self) {
            panic!(
                "slot type = {}: type mismatch (Nil expected, got {:?})",
                slot,
                self.0.tag()
            );
        }
    }

    /// Checked unboxing: panics with the slot name on tag mismatch.
    pub fn expect<T: Boxed>(self, slot: Slot) -> T {
        self.check_type::<T>(slot);
        open_box(self)
    }
}

impl Default for Blackbox {
    fn default() -> Self {
        Blackbox::nil()
    }
}

impl fmt::Debug for Blackbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Blackbox({:?})", self.0.tag())
    }
}

/// Wraps a value, recording its type tag.
pub fn close_box<T: Boxed>(value: T) -> Blackbox {
    value.close()
}

/// Unwraps a value whose tag the caller has already verified.
///
/// Panics on a tag mismatch.
pub fn open_box<T: Boxed>(bb: Blackbox) -> T {
    let tag = bb.0.tag();
    match T::open(bb) {
        Some(v) => v,
        None => panic!("blackbox type mismatch ({:?} expected, got {:?})", T::TYPE, tag),
    }
}

pub fn type_box(bb: &Blackbox) -> PayloadType {
    bb.0.tag()
}

pub fn is_nil(bb: &Blackbox) -> bool {
    matches!(bb.0, Payload::Nil)
}

mod sealed {
    pub trait Sealed {}
}

/// Types that can travel inside a [`Blackbox`].
pub trait Boxed: sealed::Sealed + Sized {
    const TYPE: PayloadType;
    fn close(self) -> Blackbox;
    fn open(bb: Blackbox) -> Option<Self>;
}

macro_rules! impl_boxed {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Boxed for $ty {
                const TYPE: PayloadType = PayloadType::$variant;

                fn close(self) -> Blackbox {
                    Blackbox(Payload::$variant(self))
                }

                fn open(bb: Blackbox) -> Option<Self> {
                    if let Payload::$variant(v) = bb.0 {
                        Some(v)
                    } else {
                        None
                    }
                }
            }
        )+
    };
}

impl_boxed! {
    bool => Bool,
    i32 => Int,
    String => Str,
    Point => Coord2,
    Region => Coord4,
    Keypress => Keypress,
    MouseInput => Mouse,
    PointerChange => Pointer,
    Alarm => Alarm,
    RendererHandle => Renderer,
}
