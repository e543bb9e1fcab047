use bevy::log::{debug, warn};

use super::{ItemColumn, SyncChannel};
use crate::systems::ui::menu::{
    defs::{ScrollStyle, VerticalDirection},
    events::FeedbackSound,
};

/// A directional step parked on a jumpable separator, resumed next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct PendingNavigation {
    direction: VerticalDirection,
    cursor: usize,
    wrapped: bool,
    steps: usize,
}

impl PendingNavigation {
    fn step(&mut self, len: usize) {
        self.steps += 1;
        self.cursor = match self.direction {
            VerticalDirection::Up if self.cursor == 0 => {
                self.wrapped = true;
                len - 1
            }
            VerticalDirection::Up => self.cursor - 1,
            VerticalDirection::Down if self.cursor + 1 >= len => {
                self.wrapped = true;
                0
            }
            VerticalDirection::Down => self.cursor + 1,
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationProgress {
    Ignored,
    /// Sitting on a jumpable separator; the next frame keeps going.
    Pending,
    Landed(usize),
}

impl ItemColumn {
    pub fn move_selection(
        &mut self,
        direction: VerticalDirection,
        sync: &mut SyncChannel,
    ) -> NavigationProgress {
        if !self.visible || self.items.is_empty() {
            return NavigationProgress::Ignored;
        }
        if self.navigation.is_some() {
            debug!("column '{}' is still skipping; dropping {direction:?}", self.label);
            return NavigationProgress::Pending;
        }

        self.deselect_current();
        sync.feedback(FeedbackSound::NavUpDown);
        self.advance(
            PendingNavigation {
                direction,
                cursor: self.selection,
                wrapped: false,
                steps: 0,
            },
            sync,
        )
    }

    /// Takes the next step of a parked navigation.
    pub fn resume_navigation(&mut self, sync: &mut SyncChannel) -> NavigationProgress {
        let Some(mut navigation) = self.navigation.take() else {
            return NavigationProgress::Ignored;
        };
        if self.items.is_empty() {
            return NavigationProgress::Ignored;
        }
        navigation.cursor = navigation.cursor.min(self.items.len() - 1);
        self.advance(navigation, sync)
    }

    fn advance(
        &mut self,
        mut navigation: PendingNavigation,
        sync: &mut SyncChannel,
    ) -> NavigationProgress {
        let len = self.items.len();
        navigation.step(len);
        if !self.items[navigation.cursor].is_jumpable() {
            return self.land(navigation, sync);
        }
        if navigation.steps >= len {
            warn!("every row of column '{}' is jumpable; landing on the first", self.label);
            navigation.cursor = 0;
            return self.land(navigation, sync);
        }
        self.navigation = Some(navigation);
        NavigationProgress::Pending
    }

    fn land(&mut self, navigation: PendingNavigation, sync: &mut SyncChannel) -> NavigationProgress {
        self.selection = navigation.cursor;
        if navigation.wrapped {
            self.top_edge = match navigation.direction {
                VerticalDirection::Up => self.max_top_edge(),
                VerticalDirection::Down => 0,
            };
        }
        self.keep_selection_in_window();
        self.select_current();

        self.sync_scroll_state(sync);
        self.sync_highlight(sync);
        self.emit_selection_changed(sync);
        self.refresh_description_panel(sync);
        NavigationProgress::Landed(self.selection)
    }

    /// Wheel scrolling. Moves the window, dragging the selection only when it falls out.
    pub fn pointer_scroll(&mut self, delta: i32, sync: &mut SyncChannel) -> bool {
        if !self.visible || self.items.is_empty() || delta == 0 {
            return false;
        }
        if self.scroll_style == ScrollStyle::Selection {
            let direction = if delta > 0 {
                VerticalDirection::Down
            } else {
                VerticalDirection::Up
            };
            return self.move_selection(direction, sync) != NavigationProgress::Ignored;
        }

        let max_top = self.max_top_edge() as i64;
        let new_top = (self.top_edge as i64 + i64::from(delta)).clamp(0, max_top) as usize;
        if new_top == self.top_edge {
            return false;
        }
        let moved = new_top as i64 - self.top_edge as i64;
        self.top_edge = new_top;

        let first = self.top_edge;
        let last = (self.top_edge + self.visible_items - 1).min(self.items.len() - 1);
        let mut target = self.selection;
        if self.selection < first {
            target = first;
            while target < last && self.items[target].is_jumpable() {
                target += 1;
            }
        } else if self.selection > last {
            target = last;
            while target > first && self.items[target].is_jumpable() {
                target -= 1;
            }
        }
        let selection_moved = target != self.selection && !self.items[target].is_jumpable();
        if selection_moved {
            self.abandon_navigation();
            self.deselect_current();
            self.selection = target;
            self.select_current();
        }

        if let Some(hovered) = self.hovered {
            self.items[hovered].set_hovered(false);
            let follows = hovered as i64 + moved;
            self.hovered = usize::try_from(follows)
                .ok()
                .filter(|&index| index < self.items.len());
            if let Some(index) = self.hovered {
                self.items[index].set_hovered(true);
            }
        }

        self.sync_scroll_state(sync);
        if selection_moved {
            self.sync_highlight(sync);
            self.emit_selection_changed(sync);
        }
        self.refresh_description_panel(sync);
        true
    }
}
