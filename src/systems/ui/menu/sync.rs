//! Change propagation towards the presentation surface.
//!
//! Every mutation of menu state pushes the matching `SyncCall` into the menu's
//! `SyncChannel`. The channel is flushed into the surface at the end of the tick,
//! in push order, and only once the surface reports itself loaded.
use std::collections::VecDeque;

use bevy::prelude::*;

use crate::systems::colors::Tint;

use super::{
    defs::{ColumnPosition, TextureRef},
    events::{FeedbackSound, MenuEvent},
    item::{Description, ItemSlot},
    tab::TabWarning,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SlotPayload {
    Item(ItemSlot),
    Description(Description),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabSlot {
    pub title: String,
    pub icon: TextureRef,
    pub tint: Tint,
    pub warning: Option<TabWarning>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SyncCall {
    ClearColumn {
        column: ColumnPosition,
    },
    SetSlot {
        column: ColumnPosition,
        index: usize,
        payload: SlotPayload,
    },
    UpdateSlot {
        column: ColumnPosition,
        index: usize,
        payload: SlotPayload,
    },
    AddSlot {
        column: ColumnPosition,
        index: usize,
        payload: SlotPayload,
    },
    SpliceSlot {
        column: ColumnPosition,
        index: usize,
        payload: SlotPayload,
    },
    RemoveSlot {
        column: ColumnPosition,
        index: usize,
    },
    SetScrollState {
        column: ColumnPosition,
        scrollbar: bool,
        top_edge: usize,
        selection: usize,
        total: usize,
        visible_items: usize,
    },
    SetHighlight {
        column: ColumnPosition,
        index: usize,
    },
    SetColumnFocus {
        column: ColumnPosition,
        focused: bool,
    },
    /// `index` is relative to the top of the visible window.
    SetDescriptionIndex {
        column: ColumnPosition,
        index: usize,
        animate: bool,
    },
    SetColumnTitle {
        column: ColumnPosition,
        title: String,
    },
    SetTabTitle {
        title: String,
        show_arrow: bool,
        show_tabs: bool,
    },
    SetTabSlot {
        tab: usize,
        slot: TabSlot,
    },
    UpdateTabSlot {
        tab: usize,
        slot: TabSlot,
    },
    HighlightTab {
        tab: usize,
    },
    SetMouseEvents {
        enabled: bool,
    },
    SetMenuWidth {
        max_width: f32,
    },
}

impl SyncCall {
    pub fn column(&self) -> Option<ColumnPosition> {
        match self {
            Self::ClearColumn { column }
            | Self::SetSlot { column, .. }
            | Self::UpdateSlot { column, .. }
            | Self::AddSlot { column, .. }
            | Self::SpliceSlot { column, .. }
            | Self::RemoveSlot { column, .. }
            | Self::SetScrollState { column, .. }
            | Self::SetHighlight { column, .. }
            | Self::SetColumnFocus { column, .. }
            | Self::SetDescriptionIndex { column, .. }
            | Self::SetColumnTitle { column, .. } => Some(*column),
            Self::SetTabTitle { .. }
            | Self::SetTabSlot { .. }
            | Self::UpdateTabSlot { .. }
            | Self::HighlightTab { .. }
            | Self::SetMouseEvents { .. }
            | Self::SetMenuWidth { .. } => None,
        }
    }

    /// Row index carried by slot-level calls.
    pub fn slot_index(&self) -> Option<usize> {
        match self {
            Self::SetSlot { index, .. }
            | Self::UpdateSlot { index, .. }
            | Self::AddSlot { index, .. }
            | Self::SpliceSlot { index, .. }
            | Self::RemoveSlot { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// The remote renderer. Implementations translate calls into whatever the host draws with.
pub trait PresentationSurface: Send + Sync {
    fn is_loaded(&self) -> bool {
        true
    }

    fn apply(&mut self, call: &SyncCall);

    fn render(&mut self) {}

    fn is_pointer_over_menu(&self) -> bool {
        false
    }
}

/// Outbox shared by every tab and column of one menu.
#[derive(Debug)]
pub struct SyncChannel {
    calls: VecDeque<SyncCall>,
    events: Vec<MenuEvent>,
    feedback: Vec<FeedbackSound>,
    tab: usize,
    animate_descriptions: bool,
}

impl Default for SyncChannel {
    fn default() -> Self {
        Self {
            calls: VecDeque::new(),
            events: Vec::new(),
            feedback: Vec::new(),
            tab: 0,
            animate_descriptions: true,
        }
    }
}

impl SyncChannel {
    pub fn push(&mut self, call: SyncCall) {
        self.calls.push_back(call);
    }

    pub fn event(&mut self, event: MenuEvent) {
        self.events.push(event);
    }

    pub fn feedback(&mut self, sound: FeedbackSound) {
        self.feedback.push(sound);
    }

    pub fn calls(&self) -> impl Iterator<Item = &SyncCall> {
        self.calls.iter()
    }

    pub fn pending(&self) -> usize {
        self.calls.len()
    }

    pub fn take_calls(&mut self) -> Vec<SyncCall> {
        self.calls.drain(..).collect()
    }

    pub fn discard_calls(&mut self) -> usize {
        let discarded = self.calls.len();
        self.calls.clear();
        discarded
    }

    pub fn events(&self) -> &[MenuEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<MenuEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn feedback_sounds(&self) -> &[FeedbackSound] {
        &self.feedback
    }

    pub fn drain_feedback(&mut self) -> Vec<FeedbackSound> {
        std::mem::take(&mut self.feedback)
    }

    /// Tab index stamped onto events raised by columns.
    pub fn tab(&self) -> usize {
        self.tab
    }

    pub(crate) fn set_tab(&mut self, tab: usize) {
        self.tab = tab;
    }

    pub fn animate_descriptions(&self) -> bool {
        self.animate_descriptions
    }

    pub(crate) fn set_animate_descriptions(&mut self, animate: bool) {
        self.animate_descriptions = animate;
    }

    /// Hands buffered calls to the surface. Nothing is lost while it is still loading.
    pub fn flush(&mut self, surface: &mut dyn PresentationSurface) -> usize {
        if !surface.is_loaded() {
            return 0;
        }
        let flushed = self.calls.len();
        for call in self.calls.drain(..) {
            surface.apply(&call);
        }
        flushed
    }
}

/// Surface that writes every call to the log. Used by the demo binary.
#[derive(Debug, Default)]
pub struct LogSurface {
    applied: usize,
    frames: usize,
}

impl PresentationSurface for LogSurface {
    fn apply(&mut self, call: &SyncCall) {
        self.applied += 1;
        info!("menu sync #{}: {call:?}", self.applied);
    }

    fn render(&mut self) {
        self.frames += 1;
        if self.frames % 600 == 0 {
            debug!("menu surface rendered {} frames", self.frames);
        }
    }
}

#[cfg(test)]
pub(crate) use recording::RecordingSurface;
