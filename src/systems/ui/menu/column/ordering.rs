use std::{cmp::Ordering, collections::HashMap, convert::Infallible, fmt::Display};

use bevy::log::{debug, warn};

use super::{ItemColumn, MenuItem, SyncChannel};
use crate::systems::ui::menu::{errors::MenuWarning, item::ItemId};

/// Arrangement to return to on `reset_filter`. Filtered-out items wait in `hidden`.
#[derive(Debug)]
pub(super) struct ColumnSnapshot {
    order: Vec<ItemId>,
    selection: usize,
    top_edge: usize,
    hidden: Vec<MenuItem>,
}

impl ItemColumn {
    /// Every sort or filter replaces the previous snapshot. Items an earlier filter
    /// hid are dropped with it.
    fn capture_snapshot(&mut self) {
        if let Some(previous) = self.snapshot.take() {
            if !previous.hidden.is_empty() {
                debug!(
                    "column '{}': dropping {} filtered-out item(s) with the old snapshot",
                    self.label,
                    previous.hidden.len()
                );
            }
        }
        self.snapshot = Some(ColumnSnapshot {
            order: self.items.iter().map(MenuItem::id).collect(),
            selection: self.selection,
            top_edge: self.top_edge,
            hidden: Vec::new(),
        });
    }

    fn repaint(&mut self, sync: &mut SyncChannel) {
        if !self.visible {
            return;
        }
        self.populate(sync);
        self.show(sync);
        self.sync_highlight(sync);
        self.update_description(sync);
    }

    /// Stable sort. The same item stays selected.
    pub fn sort_by<F>(&mut self, compare: F, sync: &mut SyncChannel)
    where
        F: FnMut(&MenuItem, &MenuItem) -> Ordering,
    {
        if self.items.is_empty() {
            return;
        }
        self.abandon_navigation();
        self.reset_transient();
        let selected = self.items[self.selection].id();
        self.capture_snapshot();

        self.items.sort_by(compare);
        self.selection = self.position_of(selected).unwrap_or(0);
        self.keep_selection_in_window();
        self.repaint(sync);
    }

    pub fn filter<P>(
        &mut self,
        mut predicate: P,
        sync: &mut SyncChannel,
    ) -> Result<usize, MenuWarning>
    where
        P: FnMut(&MenuItem) -> bool,
    {
        self.try_filter(|item| Ok::<bool, Infallible>(predicate(item)), sync)
    }

    /// Keeps the matching items. The predicate runs over every item before anything
    /// changes, so a failure or an empty result leaves the column as it was.
    pub fn try_filter<P, E>(
        &mut self,
        mut predicate: P,
        sync: &mut SyncChannel,
    ) -> Result<usize, MenuWarning>
    where
        P: FnMut(&MenuItem) -> Result<bool, E>,
        E: Display,
    {
        if self.items.is_empty() {
            return Err(MenuWarning::NothingToFilter);
        }
        let mut keep = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match predicate(item) {
                Ok(matched) => keep.push(matched),
                Err(error) => {
                    let warning = MenuWarning::PredicateFailed(error.to_string());
                    warn!("column '{}': {warning}", self.label);
                    return Err(warning);
                }
            }
        }
        let kept = keep.iter().filter(|matched| **matched).count();
        if kept == 0 {
            let warning = MenuWarning::EmptyFilterResult;
            warn!("column '{}': {warning}", self.label);
            return Err(warning);
        }

        self.abandon_navigation();
        self.reset_transient();
        self.deselect_current();
        self.capture_snapshot();

        let (retained, removed): (Vec<_>, Vec<_>) = self
            .items
            .drain(..)
            .zip(keep)
            .partition(|(_, matched)| *matched);
        self.items = retained.into_iter().map(|(item, _)| item).collect();
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.hidden.extend(removed.into_iter().map(|(item, _)| item));
        }

        self.selection = 0;
        self.top_edge = 0;
        self.settle_on_landable();
        self.select_current();
        self.repaint(sync);
        self.emit_selection_changed(sync);
        Ok(kept)
    }

    /// Restores the arrangement saved by the last sort or filter. Items added in the
    /// meantime are kept and go to the end.
    pub fn reset_filter(&mut self, sync: &mut SyncChannel) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        self.abandon_navigation();
        self.reset_transient();
        self.deselect_current();

        let mut pool: Vec<Option<MenuItem>> = self
            .items
            .drain(..)
            .chain(snapshot.hidden)
            .map(Some)
            .collect();
        let slots: HashMap<ItemId, usize> = pool
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.as_ref().map(|item| (item.id(), slot)))
            .collect();

        let mut restored = Vec::with_capacity(pool.len());
        for id in &snapshot.order {
            if let Some(item) = slots.get(id).and_then(|&slot| pool[slot].take()) {
                restored.push(item);
            }
        }
        restored.extend(pool.into_iter().flatten());
        self.items = restored;

        if self.items.is_empty() {
            self.selection = 0;
            self.top_edge = 0;
        } else {
            self.selection = snapshot.selection.min(self.items.len() - 1);
            self.top_edge = snapshot.top_edge.min(self.max_top_edge());
            self.keep_selection_in_window();
        }
        self.select_current();
        self.repaint(sync);
        self.emit_selection_changed(sync);
        true
    }
}
