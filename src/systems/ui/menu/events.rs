use bevy::prelude::*;

use super::{
    defs::ColumnPosition,
    item::{ItemId, ItemValue},
};

/// Notifications for the embedding application, published once per frame.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Opened,
    Closed,
    TabChanged {
        tab: usize,
    },
    ItemActivated {
        tab: usize,
        column: ColumnPosition,
        index: usize,
        item: ItemId,
        list_index: Option<usize>,
    },
    ItemValueChanged {
        tab: usize,
        column: ColumnPosition,
        index: usize,
        item: ItemId,
        value: ItemValue,
    },
    SelectionChanged {
        tab: usize,
        column: ColumnPosition,
        index: usize,
        item: ItemId,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackSound {
    NavUpDown,
    NavLeftRight,
    Select,
    Back,
    Error,
}

impl FeedbackSound {
    pub const SOUND_SET: &'static str = "HUD_FRONTEND_DEFAULT_SOUNDSET";

    pub const fn sound_name(self) -> &'static str {
        match self {
            Self::NavUpDown => "NAV_UP_DOWN",
            Self::NavLeftRight => "NAV_LEFT_RIGHT",
            Self::Select => "SELECT",
            Self::Back => "BACK",
            Self::Error => "ERROR",
        }
    }
}

/// Audio cue request. Playback belongs to the host.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuFeedback {
    pub sound: FeedbackSound,
}
