//! A tab: left column, optional center column, description panel on the right,
//! and a stack of drilled-down columns.
use bevy::log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::systems::colors::{Tint, HUD_FREEMODE};

use super::{
    column::{Activation, ItemColumn, NavigationProgress},
    defs::{
        AdjustDirection, ColumnPosition, MenuCommand, PointerContext, TextureRef,
        VerticalDirection, DEFAULT_VISIBLE_ITEMS,
    },
    item::{DrillDown, ItemId, MenuItem},
    sync::{SyncCall, SyncChannel, TabSlot},
};

/// Attention marker drawn on the tab bar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabWarning {
    pub tint: Tint,
    #[serde(default)]
    pub animate: bool,
}

/// Title bar state, saved and restored verbatim around drill-downs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabChrome {
    pub title: String,
    pub show_arrow: bool,
    pub hide_tabs: bool,
}

#[derive(Clone, Copy, Debug)]
struct DrillOrigin {
    item: ItemId,
    show_arrow: bool,
    hide_tabs: bool,
}

#[derive(Debug)]
struct ColumnFrame {
    column: ItemColumn,
    chrome: TabChrome,
    origin: Option<DrillOrigin>,
}

#[derive(Debug)]
pub struct MenuTab {
    name: String,
    icon: TextureRef,
    tint: Tint,
    warning: Option<TabWarning>,
    chrome: TabChrome,
    left: ItemColumn,
    center: Option<ItemColumn>,
    stack: SmallVec<[ColumnFrame; 4]>,
    focus: ColumnPosition,
    visible: bool,
    focused: bool,
}

impl MenuTab {
    pub fn new(name: impl Into<String>, icon: TextureRef) -> Self {
        let name = name.into();
        Self {
            chrome: TabChrome {
                title: name.clone(),
                ..Default::default()
            },
            name,
            icon,
            tint: HUD_FREEMODE,
            warning: None,
            left: ItemColumn::new("", DEFAULT_VISIBLE_ITEMS),
            center: None,
            stack: SmallVec::new(),
            focus: ColumnPosition::Left,
            visible: false,
            focused: false,
        }
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_left_column(mut self, mut column: ItemColumn) -> Self {
        column.set_position(ColumnPosition::Left);
        self.left = column;
        self
    }

    pub fn with_center_column(mut self, mut column: ItemColumn) -> Self {
        column.set_position(ColumnPosition::Center);
        self.center = Some(column);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chrome(&self) -> &TabChrome {
        &self.chrome
    }

    pub fn hides_tabs(&self) -> bool {
        self.chrome.hide_tabs
    }

    /// Number of drilled-down columns above the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focused_position(&self) -> ColumnPosition {
        self.focus
    }

    pub fn warning(&self) -> Option<TabWarning> {
        self.warning
    }

    pub(crate) fn set_warning(&mut self, warning: Option<TabWarning>) {
        self.warning = warning;
    }

    pub fn tab_slot(&self) -> TabSlot {
        TabSlot {
            title: self.name.clone(),
            icon: self.icon.clone(),
            tint: self.tint,
            warning: self.warning,
        }
    }

    pub fn left_column(&self) -> &ItemColumn {
        &self.left
    }

    pub fn left_column_mut(&mut self) -> &mut ItemColumn {
        &mut self.left
    }

    pub fn center_column(&self) -> Option<&ItemColumn> {
        self.center.as_ref()
    }

    pub fn center_column_mut(&mut self) -> Option<&mut ItemColumn> {
        self.center.as_mut()
    }

    pub fn column(&self, position: ColumnPosition) -> Option<&ItemColumn> {
        match position {
            ColumnPosition::Left => Some(&self.left),
            ColumnPosition::Center => self.center.as_ref(),
            ColumnPosition::Right => None,
        }
    }

    pub fn column_mut(&mut self, position: ColumnPosition) -> Option<&mut ItemColumn> {
        match position {
            ColumnPosition::Left => Some(&mut self.left),
            ColumnPosition::Center => self.center.as_mut(),
            ColumnPosition::Right => None,
        }
    }

    fn focused_column_mut(&mut self) -> &mut ItemColumn {
        match (self.focus, self.center.as_mut()) {
            (ColumnPosition::Center, Some(center)) => center,
            _ => &mut self.left,
        }
    }

    pub fn add_item(&mut self, item: MenuItem, sync: &mut SyncChannel) -> ItemId {
        self.left.add_item(item, sync)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.left.set_visible(visible);
        if let Some(center) = self.center.as_mut() {
            center.set_visible(visible);
        }
        if !visible {
            self.left.reset_transient();
            if let Some(center) = self.center.as_mut() {
                center.reset_transient();
            }
        }
    }

    pub fn populate(&self, sync: &mut SyncChannel) {
        if !self.visible {
            return;
        }
        let left_title = if self.left.label().trim().is_empty() {
            self.chrome.title.clone()
        } else {
            self.left.label().to_string()
        };
        sync.push(SyncCall::SetColumnTitle {
            column: ColumnPosition::Left,
            title: left_title,
        });
        self.left.populate(sync);
        if let Some(center) = self.center.as_ref() {
            sync.push(SyncCall::SetColumnTitle {
                column: ColumnPosition::Center,
                title: center.label().to_string(),
            });
            center.populate(sync);
        }
    }

    pub fn show_columns(&mut self, sync: &mut SyncChannel) {
        self.left.show(sync);
        if let Some(center) = self.center.as_mut() {
            center.show(sync);
        }
    }

    pub fn focus(&mut self, sync: &mut SyncChannel) {
        self.focused = true;
        self.focused_column_mut().focus(sync);
    }

    pub fn unfocus(&mut self, sync: &mut SyncChannel) {
        self.focused = false;
        self.left.unfocus(sync);
        if let Some(center) = self.center.as_mut() {
            center.unfocus(sync);
        }
    }

    /// Full build used when the tab becomes the active one.
    pub(crate) fn present(&mut self, sync: &mut SyncChannel) {
        self.populate(sync);
        self.show_columns(sync);
        self.focus(sync);
    }

    pub fn set_column_focus(&mut self, position: ColumnPosition, sync: &mut SyncChannel) -> bool {
        if self.column(position).is_none() {
            return false;
        }
        if position == self.focus {
            return true;
        }
        self.focused_column_mut().unfocus(sync);
        self.focus = position;
        if self.focused {
            self.focused_column_mut().focus(sync);
        }
        true
    }

    pub fn update_title(
        &mut self,
        title: impl Into<String>,
        show_arrow: bool,
        hide_tabs: bool,
        sync: &mut SyncChannel,
    ) {
        self.chrome = TabChrome {
            title: title.into(),
            show_arrow,
            hide_tabs,
        };
        if self.visible {
            sync.push(SyncCall::SetTabTitle {
                title: self.chrome.title.clone(),
                show_arrow,
                show_tabs: !hide_tabs,
            });
        }
    }

    pub(crate) fn push_title(&self, sync: &mut SyncChannel) {
        sync.push(SyncCall::SetTabTitle {
            title: self.chrome.title.clone(),
            show_arrow: self.chrome.show_arrow,
            show_tabs: !self.chrome.hide_tabs,
        });
    }

    pub fn push_column(
        &mut self,
        column: ItemColumn,
        show_arrow: bool,
        hide_tabs: bool,
        sync: &mut SyncChannel,
    ) {
        self.install(column, show_arrow, hide_tabs, None, sync);
    }

    fn install(
        &mut self,
        mut column: ItemColumn,
        show_arrow: bool,
        hide_tabs: bool,
        origin: Option<DrillOrigin>,
        sync: &mut SyncChannel,
    ) {
        if self.focus != ColumnPosition::Left {
            self.set_column_focus(ColumnPosition::Left, sync);
        }
        let saved = self.chrome.clone();
        column.set_position(ColumnPosition::Left);
        column.set_visible(self.visible);

        let mut outgoing = std::mem::replace(&mut self.left, column);
        outgoing.set_visible(false);
        outgoing.unfocus(sync);
        outgoing.reset_transient();
        self.stack.push(ColumnFrame {
            column: outgoing,
            chrome: saved,
            origin,
        });

        let title = if self.left.label().trim().is_empty() {
            self.chrome.title.clone()
        } else {
            self.left.label().to_string()
        };
        self.update_title(title, show_arrow, hide_tabs, sync);
        self.present(sync);
    }

    /// Returns to the parent column. `false` when already at the root.
    pub fn pop_column(&mut self, sync: &mut SyncChannel) -> bool {
        let Some(frame) = self.stack.pop() else {
            return false;
        };
        let mut child = std::mem::replace(&mut self.left, frame.column);
        child.set_visible(false);
        child.unfocus(sync);
        child.reset_transient();
        let cancelled = child.cancel_resolutions();
        if cancelled > 0 {
            debug!("column '{}' closed with {cancelled} pending value(s)", child.label());
        }
        self.left.set_visible(self.visible);

        if let Some(origin) = frame.origin {
            self.left.restore_drill_down(
                origin.item,
                DrillDown {
                    column: Box::new(child),
                    show_arrow: origin.show_arrow,
                    hide_tabs: origin.hide_tabs,
                },
            );
        }

        let TabChrome {
            title,
            show_arrow,
            hide_tabs,
        } = frame.chrome;
        self.update_title(title, show_arrow, hide_tabs, sync);
        self.present(sync);
        true
    }

    /// Advances a parked separator skip. `true` while one was in progress.
    pub(crate) fn resume_navigation(&mut self, sync: &mut SyncChannel) -> bool {
        let column = self.focused_column_mut();
        if !column.is_navigating() {
            return false;
        }
        column.resume_navigation(sync);
        true
    }

    pub fn is_navigating(&self) -> bool {
        self.left.is_navigating() || self.center.as_ref().is_some_and(ItemColumn::is_navigating)
    }

    pub(crate) fn poll_resolutions(&mut self, sync: &mut SyncChannel) -> usize {
        let mut applied = self.left.poll_resolutions(sync);
        if let Some(center) = self.center.as_mut() {
            applied += center.poll_resolutions(sync);
        }
        for frame in self.stack.iter_mut() {
            applied += frame.column.poll_resolutions(sync);
        }
        applied
    }

    pub(crate) fn cancel_resolutions(&mut self) -> usize {
        let mut cancelled = self.left.cancel_resolutions();
        if let Some(center) = self.center.as_mut() {
            cancelled += center.cancel_resolutions();
        }
        for frame in self.stack.iter_mut() {
            cancelled += frame.column.cancel_resolutions();
        }
        cancelled
    }

    /// Hands a command to the focused column. Tab-level commands are not handled here.
    pub fn route_command(&mut self, command: MenuCommand, sync: &mut SyncChannel) -> bool {
        if !self.focused || !self.visible {
            debug!("tab '{}' is not focused; ignoring {command:?}", self.name);
            return false;
        }
        match command {
            MenuCommand::Up => self.move_focused(VerticalDirection::Up, sync),
            MenuCommand::Down => self.move_focused(VerticalDirection::Down, sync),
            MenuCommand::Left => self.focused_column_mut().adjust_current(AdjustDirection::Left, sync),
            MenuCommand::Right => {
                self.focused_column_mut().adjust_current(AdjustDirection::Right, sync)
            }
            MenuCommand::Accept => self.accept(sync),
            MenuCommand::ScrollUp => self.focused_column_mut().pointer_scroll(-1, sync),
            MenuCommand::ScrollDown => self.focused_column_mut().pointer_scroll(1, sync),
            MenuCommand::PointerSelect {
                context: PointerContext::Column(position),
                index,
            } => self.pointer_select(position, index, sync),
            MenuCommand::PointerHover {
                context: PointerContext::Column(position),
                index,
                entered,
            } => match self.column_mut(position) {
                Some(column) => {
                    column.handle_hover(index, entered, sync);
                    true
                }
                None => false,
            },
            MenuCommand::PointerSelect {
                context: PointerContext::TabBar,
                ..
            }
            | MenuCommand::PointerHover {
                context: PointerContext::TabBar,
                ..
            }
            | MenuCommand::Back
            | MenuCommand::TabNext
            | MenuCommand::TabPrev => false,
        }
    }

    fn move_focused(&mut self, direction: VerticalDirection, sync: &mut SyncChannel) -> bool {
        self.focused_column_mut().move_selection(direction, sync) != NavigationProgress::Ignored
    }

    fn accept(&mut self, sync: &mut SyncChannel) -> bool {
        match self.focused_column_mut().activate_current(sync) {
            Activation::Rejected => false,
            Activation::Activated => true,
            Activation::DrillDown(item) => {
                if self.focus == ColumnPosition::Left {
                    self.drill_into(item, sync);
                }
                true
            }
        }
    }

    fn drill_into(&mut self, item: ItemId, sync: &mut SyncChannel) {
        let Some(drill_down) = self.left.take_drill_down(item) else {
            return;
        };
        let origin = DrillOrigin {
            item,
            show_arrow: drill_down.show_arrow,
            hide_tabs: drill_down.hide_tabs,
        };
        self.install(
            *drill_down.column,
            drill_down.show_arrow,
            drill_down.hide_tabs,
            Some(origin),
            sync,
        );
    }

    /// A click selects the row, a click on the selected row activates it.
    fn pointer_select(&mut self, position: ColumnPosition, index: usize, sync: &mut SyncChannel) -> bool {
        if !self.set_column_focus(position, sync) {
            return false;
        }
        let column = self.focused_column_mut();
        if index >= column.len() {
            return false;
        }
        if column.selection() == index {
            self.accept(sync)
        } else {
            column.set_current_selection(index, sync)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::ui::menu::{
        column::tests::{column_of, item_for},
        events::MenuEvent,
    };

    fn shown_tab(tab: MenuTab) -> (MenuTab, SyncChannel) {
        let mut tab = tab;
        let mut sync = SyncChannel::default();
        tab.set_visible(true);
        tab.present(&mut sync);
        sync.take_calls();
        sync.drain_events();
        sync.drain_feedback();
        (tab, sync)
    }

    fn tab_with(labels: &[&str]) -> MenuTab {
        MenuTab::new("Game", TextureRef::default()).with_left_column(column_of(labels, 12))
    }

    fn drill_tab() -> (MenuTab, ItemId) {
        let mut sub = ItemColumn::new("Graphics", 12);
        let mut scratch = SyncChannel::default();
        sub.add_item(item_for("resolution"), &mut scratch);
        sub.add_item(item_for("vsync"), &mut scratch);

        let mut root = column_of(&["resume"], 12);
        let settings = MenuItem::new("settings").with_sub_column(sub, true, true);
        let id = root.add_item(settings, &mut scratch);
        (MenuTab::new("Game", TextureRef::default()).with_left_column(root), id)
    }

    #[test]
    fn accept_on_drill_down_item_pushes_sub_column_and_chrome() {
        let (tab, settings) = drill_tab();
        let (mut tab, mut sync) = shown_tab(tab);

        assert!(tab.route_command(MenuCommand::Down, &mut sync));
        assert!(tab.route_command(MenuCommand::Accept, &mut sync));

        assert_eq!(tab.depth(), 1);
        assert_eq!(tab.left_column().label(), "Graphics");
        assert_eq!(
            tab.chrome(),
            &TabChrome {
                title: "Graphics".to_string(),
                show_arrow: true,
                hide_tabs: true,
            }
        );
        assert!(tab.hides_tabs());
        assert!(sync.calls().any(|call| *call
            == SyncCall::SetTabTitle {
                title: "Graphics".to_string(),
                show_arrow: true,
                show_tabs: false,
            }));
        assert!(sync.drain_events().iter().any(|event| matches!(
            event,
            MenuEvent::ItemActivated { item, .. } if *item == settings
        )));
    }

    #[test]
    fn pop_restores_parent_chrome_and_returns_the_sub_column() {
        let (tab, settings) = drill_tab();
        let (mut tab, mut sync) = shown_tab(tab);
        let root_chrome = tab.chrome().clone();
        tab.route_command(MenuCommand::Down, &mut sync);
        tab.route_command(MenuCommand::Accept, &mut sync);
        assert_eq!(tab.left_column().len(), 2, "sub column is now on the left");

        assert!(tab.pop_column(&mut sync));
        assert_eq!(tab.depth(), 0);
        assert_eq!(tab.chrome(), &root_chrome);
        assert_eq!(tab.left_column().selection(), 1);
        let origin = tab.left_column().position_of(settings).unwrap();
        assert!(tab.left_column().items()[origin].has_sub_column());
        assert!(tab.left_column().is_visible());

        assert!(!tab.pop_column(&mut sync), "root has nothing to pop");
    }

    #[test]
    fn drill_down_can_be_repeated_after_pop() {
        let (tab, _) = drill_tab();
        let (mut tab, mut sync) = shown_tab(tab);
        for _ in 0..2 {
            tab.route_command(MenuCommand::Down, &mut sync);
            tab.route_command(MenuCommand::Accept, &mut sync);
            assert_eq!(tab.depth(), 1);
            assert!(tab.pop_column(&mut sync));
        }
    }

    #[test]
    fn push_column_keeps_title_when_label_is_blank() {
        let (mut tab, mut sync) = shown_tab(tab_with(&["a"]));
        let mut unnamed = ItemColumn::new("  ", 12);
        unnamed.add_item(item_for("x"), &mut sync);
        unnamed.add_item(item_for("y"), &mut sync);
        tab.push_column(unnamed, false, false, &mut sync);
        assert_eq!(tab.chrome().title, "Game");
        assert_eq!(tab.left_column().len(), 2);
        assert!(tab.left_column().is_focused());
    }

    #[test]
    fn unfocused_tab_ignores_commands() {
        let (mut tab, mut sync) = shown_tab(tab_with(&["a", "b"]));
        tab.unfocus(&mut sync);
        assert!(!tab.route_command(MenuCommand::Down, &mut sync));
        assert_eq!(tab.left_column().selection(), 0);
    }

    #[test]
    fn click_selects_then_second_click_activates() {
        let (mut tab, mut sync) = shown_tab(tab_with(&["a", "b"]));
        let click = MenuCommand::PointerSelect {
            context: PointerContext::Column(ColumnPosition::Left),
            index: 1,
        };
        assert!(tab.route_command(click, &mut sync));
        assert_eq!(tab.left_column().selection(), 1);
        assert!(!sync
            .drain_events()
            .iter()
            .any(|event| matches!(event, MenuEvent::ItemActivated { .. })));

        assert!(tab.route_command(click, &mut sync));
        assert!(sync
            .drain_events()
            .iter()
            .any(|event| matches!(event, MenuEvent::ItemActivated { index: 1, .. })));
    }

    #[test]
    fn center_column_takes_focus_on_click() {
        let tab = tab_with(&["a"]).with_center_column(column_of(&["c1", "c2"], 12));
        let (mut tab, mut sync) = shown_tab(tab);
        let click = MenuCommand::PointerSelect {
            context: PointerContext::Column(ColumnPosition::Center),
            index: 1,
        };
        assert!(tab.route_command(click, &mut sync));
        assert_eq!(tab.focused_position(), ColumnPosition::Center);
        assert!(!tab.left_column().is_focused());
        assert_eq!(tab.center_column().map(ItemColumn::selection), Some(1));
        assert!(tab.route_command(MenuCommand::Up, &mut sync));
        assert_eq!(tab.center_column().map(ItemColumn::selection), Some(0));
    }
}
