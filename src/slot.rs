use std::fmt;

/// Address of one widget property or event channel.
///
/// The vocabulary is closed: a handler that receives a slot it does not
/// implement fails fatally, since callers are trusted to stay within the
/// protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Identifier,
    Visibility,
    FullScreen,
    Name,
    Size,
    Position,
    Update,
    Keyboard,
    KeyboardFocus,
    Mouse,
    MouseGrab,
    MousePointer,
    Invalidate,
    InvalidateAll,
    Repaint,
    DelayedMessage,
    Destroy,
    ShrinkingFactor,
    Extents,
    ScrollbarsVisibility,
    ScrollPosition,
    HeaderVisibility,
    MainIconsVisibility,
    ContextIconsVisibility,
    UserIconsVisibility,
    FooterVisibility,
    LeftFooter,
    RightFooter,
    InteractiveMode,
    StringInput,
    InputType,
    InputProposal,
    File,
    Directory,
    Renderer,
    VisiblePart,
    InteractiveInput,
    Window,
    FormField,
    MainMenu,
    MainIcons,
    ContextIcons,
    UserIcons,
    Canvas,
    InteractivePrompt,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
