use serde::{Deserialize, Serialize};

pub const DESCRIPTION_SLOTS: usize = 3;
pub const DEFAULT_VISIBLE_ITEMS: usize = 12;

pub(super) const POINTER_EVENT_CLICK: i32 = 5;
pub(super) const POINTER_EVENT_HOVER_LEAVE: i32 = 8;
pub(super) const POINTER_EVENT_HOVER_ENTER: i32 = 9;
pub(super) const POINTER_CONTEXT_TAB_BAR: i32 = 1000;

pub const DEFAULT_LABEL_FONT: &str = "$Font2";
pub const DEFAULT_RIGHT_LABEL_FONT: &str = "$Font2";

/// The three column slots of a tab. The right slot doubles as the description panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnPosition {
    #[default]
    Left,
    Center,
    Right,
}

impl ColumnPosition {
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    pub const fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Center),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdjustDirection {
    Left,
    Right,
}

impl AdjustDirection {
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Where a pointer event landed on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerContext {
    TabBar,
    Column(ColumnPosition),
}

/// One resolved input for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    Up,
    Down,
    Left,
    Right,
    Accept,
    Back,
    TabNext,
    TabPrev,
    ScrollUp,
    ScrollDown,
    PointerSelect {
        context: PointerContext,
        index: usize,
    },
    PointerHover {
        context: PointerContext,
        index: usize,
        entered: bool,
    },
}

impl MenuCommand {
    pub const fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::PointerSelect { .. } | Self::PointerHover { .. } | Self::ScrollUp | Self::ScrollDown
        )
    }
}

/// How a column reacts to wheel input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollStyle {
    /// Moves the window and leaves the selection alone while it stays visible.
    #[default]
    Window,
    /// Wheel steps behave like Up/Down.
    Selection,
}

/// Texture dictionary + name pair registered with the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef {
    pub dictionary: String,
    pub name: String,
}

impl TextureRef {
    pub fn new(dictionary: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            dictionary: dictionary.into(),
            name: name.into(),
        }
    }
}

