//! Root of the menu tree. Owns the tabs, the sync outbox and the attached surface.
use bevy::prelude::*;

use crate::data::settings::MenuSettings;

use super::{
    column::ItemColumn,
    defs::{ColumnPosition, MenuCommand, PointerContext, TextureRef},
    errors::MenuUsageError,
    events::{FeedbackSound, MenuEvent},
    sync::{PresentationSurface, SyncCall, SyncChannel},
    tab::{MenuTab, TabWarning},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuPhase {
    #[default]
    Hidden,
    /// Chrome is built; the current tab is populated on the next tick.
    Opening,
    Active,
}

#[derive(Resource)]
pub struct PauseMenu {
    tabs: Vec<MenuTab>,
    current_tab: usize,
    phase: MenuPhase,
    surface: Option<Box<dyn PresentationSurface>>,
    sync: SyncChannel,
    settings: MenuSettings,
    temporarily_hidden: bool,
}

impl Default for PauseMenu {
    fn default() -> Self {
        Self::from_settings(MenuSettings::default())
    }
}

impl PauseMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: MenuSettings) -> Self {
        let mut sync = SyncChannel::default();
        sync.set_animate_descriptions(settings.animate_descriptions);
        Self {
            tabs: Vec::new(),
            current_tab: 0,
            phase: MenuPhase::Hidden,
            surface: None,
            sync,
            settings,
            temporarily_hidden: false,
        }
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Column sized by the configured default window.
    pub fn new_column(&self, label: impl Into<String>) -> ItemColumn {
        ItemColumn::new(label, self.settings.default_visible_items)
    }

    pub fn new_tab(&self, name: impl Into<String>, icon: TextureRef) -> MenuTab {
        MenuTab::new(name, icon).with_left_column(self.new_column(""))
    }

    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != MenuPhase::Hidden
    }

    pub fn is_temporarily_hidden(&self) -> bool {
        self.temporarily_hidden
    }

    pub fn tabs(&self) -> &[MenuTab] {
        &self.tabs
    }

    pub fn tab(&self, index: usize) -> Option<&MenuTab> {
        self.tabs.get(index)
    }

    pub fn current_tab_index(&self) -> usize {
        self.current_tab
    }

    pub fn current_tab(&self) -> Option<&MenuTab> {
        self.tabs.get(self.current_tab)
    }

    pub fn mouse_enabled(&self) -> bool {
        self.settings.mouse_enabled
    }

    pub fn scroll_only_on_hover(&self) -> bool {
        self.settings.scroll_only_on_hover
    }

    pub fn pointer_over_menu(&self) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|surface| surface.is_pointer_over_menu())
    }

    /// Sync calls waiting for the surface.
    pub fn pending_sync_calls(&self) -> usize {
        self.sync.pending()
    }

    pub fn drain_events(&mut self) -> Vec<MenuEvent> {
        self.sync.drain_events()
    }

    pub fn drain_feedback(&mut self) -> Vec<FeedbackSound> {
        self.sync.drain_feedback()
    }

    pub fn add_tab(&mut self, tab: MenuTab) -> usize {
        let index = self.tabs.len();
        if self.is_visible() {
            self.sync.push(SyncCall::SetTabSlot {
                tab: index,
                slot: tab.tab_slot(),
            });
        }
        self.tabs.push(tab);
        index
    }

    /// Runs `edit` against a tab with the shared outbox. Events it raises are stamped
    /// with that tab's index.
    pub fn edit_tab<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut MenuTab, &mut SyncChannel) -> R,
    ) -> Option<R> {
        let tab = self.tabs.get_mut(index)?;
        self.sync.set_tab(index);
        let result = edit(tab, &mut self.sync);
        self.sync.set_tab(self.current_tab);
        Some(result)
    }

    pub fn edit_column<R>(
        &mut self,
        tab: usize,
        position: ColumnPosition,
        edit: impl FnOnce(&mut ItemColumn, &mut SyncChannel) -> R,
    ) -> Option<R> {
        self.edit_tab(tab, |tab, sync| tab.column_mut(position).map(|column| edit(column, sync)))
            .flatten()
    }

    /// Attaches the surface and builds the menu chrome. The current tab is
    /// populated on the next tick.
    pub fn show(&mut self, surface: Box<dyn PresentationSurface>) -> Result<(), MenuUsageError> {
        if self.tabs.is_empty() {
            return Err(MenuUsageError::NoTabs);
        }
        if self.is_visible() {
            return Err(MenuUsageError::AlreadyVisible);
        }
        self.surface = Some(surface);
        self.phase = MenuPhase::Opening;
        self.temporarily_hidden = false;
        self.current_tab = self.current_tab.min(self.tabs.len() - 1);
        self.sync.set_tab(self.current_tab);
        self.sync.set_animate_descriptions(self.settings.animate_descriptions);

        self.sync.push(SyncCall::SetMenuWidth {
            max_width: self.settings.max_width,
        });
        self.sync.push(SyncCall::SetMouseEvents {
            enabled: self.settings.mouse_enabled,
        });
        for (index, tab) in self.tabs.iter().enumerate() {
            self.sync.push(SyncCall::SetTabSlot {
                tab: index,
                slot: tab.tab_slot(),
            });
        }
        self.sync.push(SyncCall::HighlightTab {
            tab: self.current_tab,
        });
        self.tabs[self.current_tab].push_title(&mut self.sync);
        self.sync.event(MenuEvent::Opened);
        info!("pause menu opening on tab {}", self.current_tab);
        Ok(())
    }

    /// Closes the menu and hands the surface back. Unsent calls are dropped.
    pub fn hide(&mut self) -> Option<Box<dyn PresentationSurface>> {
        if !self.is_visible() {
            return None;
        }
        let mut cancelled = 0;
        for tab in self.tabs.iter_mut() {
            cancelled += tab.cancel_resolutions();
            tab.set_visible(false);
            while tab.pop_column(&mut self.sync) {}
            tab.unfocus(&mut self.sync);
        }
        if cancelled > 0 {
            debug!("closing menu dropped {cancelled} pending value(s)");
        }
        let discarded = self.sync.discard_calls();
        if discarded > 0 {
            debug!("closing menu discarded {discarded} unsent sync call(s)");
        }
        self.phase = MenuPhase::Hidden;
        self.temporarily_hidden = false;
        self.sync.event(MenuEvent::Closed);
        info!("pause menu closed");
        self.surface.take()
    }

    fn build_current_tab(&mut self) {
        let index = self.current_tab;
        self.sync.set_tab(index);
        let tab = &mut self.tabs[index];
        tab.set_visible(true);
        tab.present(&mut self.sync);
        self.phase = MenuPhase::Active;
    }

    fn switch_tab(&mut self, index: usize) {
        let outgoing = &mut self.tabs[self.current_tab];
        outgoing.unfocus(&mut self.sync);
        outgoing.set_visible(false);

        self.current_tab = index;
        self.sync.set_tab(index);
        self.sync.push(SyncCall::HighlightTab { tab: index });
        let incoming = &mut self.tabs[index];
        incoming.set_visible(true);
        incoming.push_title(&mut self.sync);
        incoming.present(&mut self.sync);
        self.sync.feedback(FeedbackSound::Select);
        self.sync.event(MenuEvent::TabChanged { tab: index });
    }

    fn tab_switch_allowed(&self) -> bool {
        if self.phase != MenuPhase::Active || self.tabs.len() < 2 {
            return false;
        }
        if self.tabs[self.current_tab].hides_tabs() {
            debug!("tab bar is hidden; ignoring tab switch");
            return false;
        }
        true
    }

    pub fn next_tab(&mut self) -> bool {
        if !self.tab_switch_allowed() {
            return false;
        }
        self.switch_tab((self.current_tab + 1) % self.tabs.len());
        true
    }

    pub fn prev_tab(&mut self) -> bool {
        if !self.tab_switch_allowed() {
            return false;
        }
        let len = self.tabs.len();
        self.switch_tab((self.current_tab + len - 1) % len);
        true
    }

    /// Jumps straight to a tab. `Ok(false)` when it is already current.
    pub fn set_tab_index(&mut self, index: usize) -> Result<bool, MenuUsageError> {
        if index >= self.tabs.len() {
            return Err(MenuUsageError::TabOutOfRange(index));
        }
        if index == self.current_tab {
            return Ok(false);
        }
        match self.phase {
            MenuPhase::Hidden => self.current_tab = index,
            MenuPhase::Opening => {
                self.current_tab = index;
                self.sync.set_tab(index);
                self.sync.push(SyncCall::HighlightTab { tab: index });
                self.tabs[index].push_title(&mut self.sync);
            }
            MenuPhase::Active => {
                if self.tabs[self.current_tab].hides_tabs() {
                    debug!("tab bar is hidden; ignoring jump to tab {index}");
                    return Ok(false);
                }
                self.switch_tab(index);
            }
        }
        Ok(true)
    }

    /// Back: leaves a drill-down, or closes the menu from the root column.
    pub fn go_back(&mut self) -> bool {
        if self.phase != MenuPhase::Active {
            return false;
        }
        let index = self.current_tab;
        self.sync.set_tab(index);
        self.sync.feedback(FeedbackSound::Back);
        if self.tabs[index].pop_column(&mut self.sync) {
            return true;
        }
        if self.hide().is_some() {
            debug!("surface released after Back at the root column");
        }
        true
    }

    /// Applies one command. Nothing happens unless the menu is active.
    pub fn dispatch(&mut self, command: MenuCommand) -> bool {
        match self.phase {
            MenuPhase::Hidden => return false,
            MenuPhase::Opening => {
                debug!("menu still opening; dropping {command:?}");
                return false;
            }
            MenuPhase::Active => {}
        }
        if command.is_pointer() && !self.settings.mouse_enabled {
            debug!("mouse input disabled; dropping {command:?}");
            return false;
        }
        match command {
            MenuCommand::Back => self.go_back(),
            MenuCommand::TabNext => self.next_tab(),
            MenuCommand::TabPrev => self.prev_tab(),
            MenuCommand::PointerSelect {
                context: PointerContext::TabBar,
                index,
            } => self.set_tab_index(index).unwrap_or_else(|error| {
                warn!("tab bar click: {error}");
                false
            }),
            MenuCommand::PointerHover {
                context: PointerContext::TabBar,
                ..
            } => false,
            MenuCommand::ScrollUp | MenuCommand::ScrollDown
                if self.settings.scroll_only_on_hover && !self.pointer_over_menu() =>
            {
                false
            }
            command => {
                let index = self.current_tab;
                self.sync.set_tab(index);
                self.tabs[index].route_command(command, &mut self.sync)
            }
        }
    }

    /// Per-frame entry point: resumes separator skips, applies finished dynamic
    /// values, dispatches at most one command, then flushes and renders.
    pub fn tick(&mut self, command: Option<MenuCommand>) -> bool {
        if self.phase == MenuPhase::Hidden || self.temporarily_hidden {
            return false;
        }
        let mut handled = false;
        match self.phase {
            MenuPhase::Opening => {
                self.build_current_tab();
                if let Some(command) = command {
                    debug!("menu still opening; dropping {command:?}");
                }
            }
            MenuPhase::Active => {
                let index = self.current_tab;
                self.sync.set_tab(index);
                self.tabs[index].resume_navigation(&mut self.sync);
                for (index, tab) in self.tabs.iter_mut().enumerate() {
                    self.sync.set_tab(index);
                    tab.poll_resolutions(&mut self.sync);
                }
                self.sync.set_tab(self.current_tab);
                if let Some(command) = command {
                    handled = self.dispatch(command);
                }
            }
            MenuPhase::Hidden => {}
        }
        self.flush();
        handled
    }

    fn flush(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if !surface.is_loaded() {
            return;
        }
        self.sync.flush(surface.as_mut());
        surface.render();
    }

    pub fn set_mouse_enabled(&mut self, enabled: bool) {
        self.settings.mouse_enabled = enabled;
        if self.is_visible() {
            self.sync.push(SyncCall::SetMouseEvents { enabled });
        }
    }

    pub fn set_scroll_only_on_hover(&mut self, enabled: bool) {
        self.settings.scroll_only_on_hover = enabled;
    }

    /// Suspends ticking (no input, no rendering) without closing the menu.
    pub fn set_temporarily_hidden(&mut self, hidden: bool) {
        if self.is_visible() {
            self.temporarily_hidden = hidden;
        }
    }

    pub fn set_animate_descriptions(&mut self, animate: bool) {
        self.settings.animate_descriptions = animate;
        self.sync.set_animate_descriptions(animate);
    }

    pub fn set_max_width(&mut self, max_width: f32) {
        self.settings.max_width = max_width;
        if self.is_visible() {
            self.sync.push(SyncCall::SetMenuWidth { max_width });
        }
    }

    pub fn set_tab_warning(&mut self, index: usize, warning: Option<TabWarning>) -> bool {
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        tab.set_warning(warning);
        if self.phase != MenuPhase::Hidden {
            self.sync.push(SyncCall::UpdateTabSlot {
                tab: index,
                slot: tab.tab_slot(),
            });
        }
        true
    }
}
