//! Windowed item column.
//!
//! A column owns an unbounded list of items and shows `visible_items` of them at a
//! time, starting at `top_edge`. Selection, hover and scroll state live here, along
//! with the slot diffing that keeps the presentation surface in step: full repaints,
//! point updates, splices, appends and removals. Nothing is pushed into the
//! `SyncChannel` while the column is hidden; state still updates.
use std::fmt;

use bevy::log::debug;

use crate::systems::colors::{Tint, HUD_PAUSEMAP_TINT, HUD_PAUSE_BG};

use super::{
    defs::{AdjustDirection, ColumnPosition, ScrollStyle, DESCRIPTION_SLOTS},
    errors::{MenuUsageError, MenuWarning},
    events::{FeedbackSound, MenuEvent},
    item::{
        Description, DrillDown, ItemActivation, ItemAdjustment, ItemId, ItemValue, MenuItem,
    },
    resolver::PendingResolutions,
    sync::{SlotPayload, SyncCall, SyncChannel},
};

mod navigation;
mod ordering;

pub use navigation::NavigationProgress;
use navigation::PendingNavigation;
use ordering::ColumnSnapshot;

/// Outcome of accepting the current item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Rejected,
    Activated,
    DrillDown(ItemId),
}

#[derive(Clone, Copy)]
enum SlotCall {
    Set,
    Update,
    Add,
    Splice,
}

pub struct ItemColumn {
    label: String,
    position: ColumnPosition,
    items: Vec<MenuItem>,
    visible_items: usize,
    selection: usize,
    top_edge: usize,
    hovered: Option<usize>,
    visible: bool,
    focused: bool,
    scroll_style: ScrollStyle,
    snapshot: Option<ColumnSnapshot>,
    navigation: Option<PendingNavigation>,
    resolutions: PendingResolutions,
}

impl fmt::Debug for ItemColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemColumn")
            .field("label", &self.label)
            .field("position", &self.position)
            .field("items", &self.items)
            .field("visible_items", &self.visible_items)
            .field("selection", &self.selection)
            .field("top_edge", &self.top_edge)
            .field("hovered", &self.hovered)
            .field("visible", &self.visible)
            .field("focused", &self.focused)
            .field("resolutions", &self.resolutions)
            .finish_non_exhaustive()
    }
}

impl ItemColumn {
    pub fn new(label: impl Into<String>, visible_items: usize) -> Self {
        Self {
            label: label.into(),
            position: ColumnPosition::Left,
            items: Vec::new(),
            visible_items: visible_items.max(1),
            selection: 0,
            top_edge: 0,
            hovered: None,
            visible: false,
            focused: false,
            scroll_style: ScrollStyle::default(),
            snapshot: None,
            navigation: None,
            resolutions: PendingResolutions::default(),
        }
    }

    pub fn with_scroll_style(mut self, scroll_style: ScrollStyle) -> Self {
        self.scroll_style = scroll_style;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn position(&self) -> ColumnPosition {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: ColumnPosition) {
        self.position = position;
    }

    pub fn scroll_style(&self) -> ScrollStyle {
        self.scroll_style
    }

    pub fn set_scroll_style(&mut self, scroll_style: ScrollStyle) {
        self.scroll_style = scroll_style;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn current_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selection)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn top_edge(&self) -> usize {
        self.top_edge
    }

    pub fn visible_items(&self) -> usize {
        self.visible_items
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_navigating(&self) -> bool {
        self.navigation.is_some()
    }

    pub fn is_filtered(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn has_pending_resolution(&self, id: ItemId) -> bool {
        self.resolutions.contains(id)
    }

    pub fn pending_resolutions(&self) -> usize {
        self.resolutions.len()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn max_top_edge(&self) -> usize {
        self.items.len().saturating_sub(self.visible_items)
    }

    fn window_contains(&self, index: usize) -> bool {
        index >= self.top_edge && index < self.top_edge + self.visible_items
    }

    /// Slides the window the minimum distance that brings the selection back in.
    fn keep_selection_in_window(&mut self) {
        if self.selection < self.top_edge {
            self.top_edge = self.selection;
        } else if self.selection >= self.top_edge + self.visible_items {
            self.top_edge = self.selection + 1 - self.visible_items;
        }
        self.top_edge = self.top_edge.min(self.max_top_edge());
    }

    fn select_current(&mut self) {
        let focused = self.focused;
        if let Some(item) = self.items.get_mut(self.selection) {
            item.set_selected(focused);
        }
    }

    fn deselect_current(&mut self) {
        if let Some(item) = self.items.get_mut(self.selection) {
            item.set_selected(false);
        }
    }

    /// Moves forward off a jumpable separator. Lands on 0 when every item is jumpable.
    fn settle_on_landable(&mut self) {
        let len = self.items.len();
        if len == 0 {
            self.selection = 0;
            return;
        }
        self.selection = (0..len)
            .map(|offset| (self.selection + offset) % len)
            .find(|&index| !self.items[index].is_jumpable())
            .unwrap_or(0);
    }

    fn abandon_navigation(&mut self) {
        if self.navigation.take().is_some() {
            debug!("column '{}' abandoned a pending skip", self.label);
            self.select_current();
        }
    }

    fn push_slot(&self, sync: &mut SyncChannel, index: usize, call: SlotCall) {
        if !self.visible {
            return;
        }
        let Some(item) = self.items.get(index) else {
            return;
        };
        let column = self.position;
        let payload = SlotPayload::Item(item.slot());
        sync.push(match call {
            SlotCall::Set => SyncCall::SetSlot { column, index, payload },
            SlotCall::Update => SyncCall::UpdateSlot { column, index, payload },
            SlotCall::Add => SyncCall::AddSlot { column, index, payload },
            SlotCall::Splice => SyncCall::SpliceSlot { column, index, payload },
        });
    }

    fn sync_scroll_state(&self, sync: &mut SyncChannel) {
        if !self.visible {
            return;
        }
        sync.push(SyncCall::SetScrollState {
            column: self.position,
            scrollbar: self.items.len() > self.visible_items,
            top_edge: self.top_edge,
            selection: self.selection,
            total: self.items.len(),
            visible_items: self.visible_items,
        });
    }

    fn sync_highlight(&self, sync: &mut SyncChannel) {
        if !self.visible || self.items.is_empty() {
            return;
        }
        sync.push(SyncCall::SetHighlight {
            column: self.position,
            index: self.selection,
        });
    }

    fn emit_selection_changed(&self, sync: &mut SyncChannel) {
        let Some(item) = self.current_item() else {
            return;
        };
        sync.event(MenuEvent::SelectionChanged {
            tab: sync.tab(),
            column: self.position,
            index: self.selection,
            item: item.id(),
        });
    }

    fn push_description_panel(&self, sync: &mut SyncChannel, source: Option<usize>) {
        let blank = Description::default();
        let descriptions = source
            .and_then(|index| self.items.get(index))
            .map(|item| item.descriptions());
        for slot in 0..DESCRIPTION_SLOTS {
            let description = descriptions.map_or(&blank, |descriptions| &descriptions[slot]);
            sync.push(SyncCall::UpdateSlot {
                column: ColumnPosition::Right,
                index: slot,
                payload: SlotPayload::Description(description.clone()),
            });
        }
    }

    fn push_description_index(&self, sync: &mut SyncChannel, index: usize) {
        sync.push(SyncCall::SetDescriptionIndex {
            column: self.position,
            index: index.saturating_sub(self.top_edge),
            animate: sync.animate_descriptions(),
        });
    }

    /// Shows the selected item's descriptions.
    pub(crate) fn update_description(&self, sync: &mut SyncChannel) {
        if !self.visible {
            return;
        }
        if self.items.is_empty() {
            self.push_description_panel(sync, None);
            return;
        }
        self.push_description_panel(sync, Some(self.selection));
        self.push_description_index(sync, self.selection);
    }

    /// Like `update_description`, but a hovered row with descriptions wins.
    fn refresh_description_panel(&self, sync: &mut SyncChannel) {
        if !self.visible {
            return;
        }
        let hovered = self.hovered.filter(|&index| {
            self.window_contains(index)
                && self.items.get(index).is_some_and(MenuItem::has_descriptions)
        });
        match hovered {
            Some(index) => {
                self.push_description_panel(sync, Some(index));
                self.push_description_index(sync, index);
            }
            None => self.update_description(sync),
        }
    }

    fn default_tint_for(index: usize) -> Tint {
        if index % 2 == 0 {
            HUD_PAUSEMAP_TINT
        } else {
            HUD_PAUSE_BG
        }
    }

    pub fn add_item(&mut self, mut item: MenuItem, sync: &mut SyncChannel) -> ItemId {
        if item.main_tint.is_none() {
            item.main_tint = Some(Self::default_tint_for(self.items.len()));
        }
        item.set_selected(false);
        item.set_hovered(false);
        let id = item.id();
        self.items.push(item);
        if self.items.len() == 1 {
            self.selection = 0;
            self.select_current();
        }

        if self.visible && self.items.len() <= self.visible_items {
            self.push_slot(sync, self.items.len() - 1, SlotCall::Add);
            self.update_description(sync);
        }
        id
    }

    /// Inserts before an existing row. The selected item stays selected.
    pub fn insert_item(
        &mut self,
        index: usize,
        mut item: MenuItem,
        sync: &mut SyncChannel,
    ) -> Result<ItemId, MenuWarning> {
        let len = self.items.len();
        if index >= len {
            let warning = MenuWarning::IndexOutOfRange { index, len };
            bevy::log::warn!("column '{}': {warning}", self.label);
            return Err(warning);
        }
        self.abandon_navigation();
        if item.main_tint.is_none() {
            item.main_tint = Some(Self::default_tint_for(index));
        }
        item.set_selected(false);
        item.set_hovered(false);
        let id = item.id();
        self.items.insert(index, item);
        if index <= self.selection {
            self.selection += 1;
        }
        if let Some(hovered) = self.hovered.as_mut() {
            if *hovered >= index {
                *hovered += 1;
            }
        }
        self.top_edge = self.top_edge.min(self.max_top_edge());
        self.push_slot(sync, index, SlotCall::Splice);
        Ok(id)
    }

    pub fn remove_item(&mut self, id: ItemId, sync: &mut SyncChannel) -> Option<MenuItem> {
        let index = self.position_of(id)?;
        self.remove_at(index, sync)
    }

    pub fn remove_at(&mut self, index: usize, sync: &mut SyncChannel) -> Option<MenuItem> {
        if index >= self.items.len() {
            return None;
        }
        self.abandon_navigation();
        let selected_before = self.current_item().map(MenuItem::id);

        let mut removed = self.items.remove(index);
        removed.set_selected(false);
        removed.set_hovered(false);
        if self.resolutions.cancel(removed.id()) {
            debug!("dropped pending value for removed item '{}'", removed.label);
        }
        if self.visible {
            sync.push(SyncCall::RemoveSlot {
                column: self.position,
                index,
            });
        }

        self.hovered = match self.hovered {
            Some(hovered) if hovered == index => None,
            Some(hovered) if hovered > index => Some(hovered - 1),
            other => other,
        };

        if self.items.is_empty() {
            self.selection = 0;
            self.top_edge = 0;
        } else {
            if index < self.selection || self.selection >= self.items.len() {
                self.selection -= 1;
            }
            if self.items[self.selection].is_jumpable() {
                self.settle_on_landable();
            }
            self.select_current();
            self.top_edge = self.top_edge.min(self.max_top_edge());
            self.keep_selection_in_window();
        }

        self.refresh_description_panel(sync);
        if self.current_item().map(MenuItem::id) != selected_before {
            self.sync_scroll_state(sync);
            self.sync_highlight(sync);
            self.emit_selection_changed(sync);
        }
        Some(removed)
    }

    pub fn clear(&mut self, sync: &mut SyncChannel) {
        let cancelled = self.resolutions.cancel_all();
        if cancelled > 0 {
            debug!("column '{}' cleared with {cancelled} pending value(s)", self.label);
        }
        self.items.clear();
        self.navigation = None;
        self.snapshot = None;
        self.selection = 0;
        self.top_edge = 0;
        self.hovered = None;

        if self.visible {
            sync.push(SyncCall::ClearColumn {
                column: self.position,
            });
            self.push_description_panel(sync, None);
            self.sync_scroll_state(sync);
        }
    }

    pub fn set_visible_items(&mut self, visible_items: usize, sync: &mut SyncChannel) {
        self.visible_items = visible_items.max(1);
        self.keep_selection_in_window();
        if self.visible {
            self.populate(sync);
            self.show(sync);
        }
    }

    /// Full repaint of every row.
    pub fn populate(&self, sync: &mut SyncChannel) {
        if !self.visible {
            return;
        }
        sync.push(SyncCall::ClearColumn {
            column: self.position,
        });
        for index in 0..self.items.len() {
            self.push_slot(sync, index, SlotCall::Set);
        }
    }

    /// Focus and scroll initialisation after a repaint.
    pub fn show(&mut self, sync: &mut SyncChannel) {
        if !self.visible {
            return;
        }
        sync.push(SyncCall::SetColumnFocus {
            column: self.position,
            focused: self.focused,
        });
        if !self.items.is_empty() {
            if self.items[self.selection].is_jumpable() {
                self.deselect_current();
                self.settle_on_landable();
                self.select_current();
            }
            self.keep_selection_in_window();
        }
        self.sync_scroll_state(sync);
    }

    pub(crate) fn focus(&mut self, sync: &mut SyncChannel) {
        self.focused = true;
        self.select_current();
        if !self.visible {
            return;
        }
        sync.push(SyncCall::SetColumnFocus {
            column: self.position,
            focused: true,
        });
        self.sync_highlight(sync);
        self.update_description(sync);
    }

    pub(crate) fn unfocus(&mut self, sync: &mut SyncChannel) {
        self.focused = false;
        self.deselect_current();
        self.abandon_navigation();
        if self.visible {
            sync.push(SyncCall::SetColumnFocus {
                column: self.position,
                focused: false,
            });
        }
    }

    /// Drops hover and in-flight navigation when the column leaves the screen.
    pub(crate) fn reset_transient(&mut self) {
        self.navigation = None;
        if let Some(item) = self.hovered.take().and_then(|index| self.items.get_mut(index)) {
            item.set_hovered(false);
        }
    }

    /// Selects `index` directly; past-the-end wraps to the first row.
    pub fn set_current_selection(&mut self, index: usize, sync: &mut SyncChannel) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let target = if index >= self.items.len() { 0 } else { index };
        if self.items[target].is_jumpable() {
            debug!("refusing to select jumpable row {target} in '{}'", self.label);
            return false;
        }
        self.abandon_navigation();
        self.deselect_current();
        self.selection = target;
        self.select_current();

        let top_before = self.top_edge;
        self.keep_selection_in_window();
        if self.top_edge != top_before {
            self.sync_scroll_state(sync);
        }
        self.sync_highlight(sync);
        self.update_description(sync);
        self.emit_selection_changed(sync);
        true
    }

    pub fn handle_hover(&mut self, index: usize, entered: bool, sync: &mut SyncChannel) {
        if index >= self.items.len() {
            return;
        }
        if entered {
            if self.hovered == Some(index) {
                return;
            }
            if let Some(previous) = self.hovered.and_then(|hovered| self.items.get_mut(hovered)) {
                previous.set_hovered(false);
            }
            self.hovered = Some(index);
            self.items[index].set_hovered(true);
            self.refresh_description_panel(sync);
        } else {
            if self.hovered != Some(index) {
                return;
            }
            self.items[index].set_hovered(false);
            self.hovered = None;
            self.update_description(sync);
        }
    }

    pub fn activate_current(&mut self, sync: &mut SyncChannel) -> Activation {
        if !self.visible || self.items.is_empty() || self.navigation.is_some() {
            return Activation::Rejected;
        }
        let index = self.selection;
        let column = self.position;
        let item = &mut self.items[index];
        if !item.enabled {
            sync.feedback(FeedbackSound::Error);
            return Activation::Rejected;
        }

        let id = item.id();
        let drills_down = item.has_sub_column();
        match item.activate() {
            ItemActivation::Toggled(value) => {
                self.push_slot(sync, index, SlotCall::Update);
                sync.event(MenuEvent::ItemValueChanged {
                    tab: sync.tab(),
                    column,
                    index,
                    item: id,
                    value,
                });
            }
            ItemActivation::Activated { list_index } => {
                sync.event(MenuEvent::ItemActivated {
                    tab: sync.tab(),
                    column,
                    index,
                    item: id,
                    list_index,
                });
            }
        }
        sync.feedback(FeedbackSound::Select);
        self.update_description(sync);

        if drills_down {
            Activation::DrillDown(id)
        } else {
            Activation::Activated
        }
    }

    /// Left/Right on the current item. Returns whether anything changed or started.
    pub fn adjust_current(&mut self, direction: AdjustDirection, sync: &mut SyncChannel) -> bool {
        if !self.visible || self.items.is_empty() || self.navigation.is_some() {
            return false;
        }
        let index = self.selection;
        let column = self.position;
        let item = &mut self.items[index];
        if !item.enabled {
            sync.feedback(FeedbackSound::Error);
            return false;
        }

        let id = item.id();
        let changed = match item.adjust(direction) {
            ItemAdjustment::Changed(value) => {
                self.push_slot(sync, index, SlotCall::Update);
                sync.event(MenuEvent::ItemValueChanged {
                    tab: sync.tab(),
                    column,
                    index,
                    item: id,
                    value,
                });
                sync.feedback(FeedbackSound::NavLeftRight);
                true
            }
            ItemAdjustment::Unchanged => {
                sync.feedback(FeedbackSound::NavLeftRight);
                false
            }
            ItemAdjustment::Resolve { resolver, request } => {
                if self.resolutions.contains(id) {
                    debug!("value for item {} is still resolving", id.raw());
                    return false;
                }
                self.resolutions.start(id, resolver.resolve(request));
                sync.feedback(FeedbackSound::NavLeftRight);
                true
            }
            ItemAdjustment::NotAdjustable => false,
        };
        self.update_description(sync);
        changed
    }

    /// Applies dynamic values that finished since the last frame.
    pub fn poll_resolutions(&mut self, sync: &mut SyncChannel) -> usize {
        if self.resolutions.is_empty() {
            return 0;
        }
        let mut applied = 0;
        for (id, value) in self.resolutions.poll() {
            let Some(index) = self.position_of(id) else {
                debug!("discarding value for item {} that left the column", id.raw());
                continue;
            };
            if !self.items[index].set_dynamic_value(value.clone()) {
                continue;
            }
            applied += 1;
            self.push_slot(sync, index, SlotCall::Update);
            sync.event(MenuEvent::ItemValueChanged {
                tab: sync.tab(),
                column: self.position,
                index,
                item: id,
                value: ItemValue::Text(value),
            });
            if index == self.selection {
                self.update_description(sync);
            }
        }
        applied
    }

    pub(crate) fn cancel_resolutions(&mut self) -> usize {
        self.resolutions.cancel_all()
    }

    pub(crate) fn take_drill_down(&mut self, id: ItemId) -> Option<DrillDown> {
        let index = self.position_of(id)?;
        self.items[index].take_drill_down()
    }

    /// Gives a sub-column back to the item it came from. Dropped if that item is gone.
    pub(crate) fn restore_drill_down(&mut self, id: ItemId, drill_down: DrillDown) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.items[index].restore_drill_down(drill_down);
                true
            }
            None => {
                debug!("origin item {} no longer exists; dropping its sub-column", id.raw());
                false
            }
        }
    }

    /// Runs `edit` on one item and repaints its slot.
    pub fn edit_item<R>(
        &mut self,
        index: usize,
        sync: &mut SyncChannel,
        edit: impl FnOnce(&mut MenuItem) -> R,
    ) -> Option<R> {
        let item = self.items.get_mut(index)?;
        let result = edit(item);
        self.push_slot(sync, index, SlotCall::Update);
        if index == self.selection {
            self.update_description(sync);
        }
        Some(result)
    }

    pub fn update_item_labels(
        &mut self,
        index: usize,
        label: impl Into<String>,
        right_label: Option<String>,
        sync: &mut SyncChannel,
    ) -> Result<bool, MenuUsageError> {
        let Some(item) = self.items.get_mut(index) else {
            return Ok(false);
        };
        if let Some(right_label) = right_label {
            item.set_right_label(right_label)?;
        }
        item.label = label.into();
        self.push_slot(sync, index, SlotCall::Update);
        Ok(true)
    }

    pub fn set_item_enabled(&mut self, index: usize, enabled: bool, sync: &mut SyncChannel) -> bool {
        self.edit_item(index, sync, |item| item.enabled = enabled).is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests;
