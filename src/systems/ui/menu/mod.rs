//! Tabbed pause menu.
//!
//! The menu is a single ownership tree: `PauseMenu` owns its `MenuTab`s, each tab
//! owns its columns and drill-down stack, and each `ItemColumn` owns its items.
//! All presentation goes through a `SyncChannel` outbox that the menu flushes to
//! the attached `PresentationSurface` once per frame.
//!
//! Bevy integration is three ordered system sets: input resolution, the menu
//! tick, and publication of `MenuEvent` / `MenuFeedback` messages.
use bevy::{input::mouse::MouseWheel, prelude::*};

use crate::data::settings::MenuSettings;

mod column;
mod defs;
mod errors;
mod events;
mod item;
mod menu_input;
mod menu_root;
mod options;
mod resolver;
mod sync;
mod tab;

pub use column::{Activation, ItemColumn, NavigationProgress};
pub use defs::{
    AdjustDirection, ColumnPosition, MenuCommand, PointerContext, ScrollStyle, TextureRef,
    VerticalDirection, DEFAULT_LABEL_FONT, DEFAULT_RIGHT_LABEL_FONT, DEFAULT_VISIBLE_ITEMS,
    DESCRIPTION_SLOTS,
};
pub use errors::{MenuUsageError, MenuWarning};
pub use events::{FeedbackSound, MenuEvent, MenuFeedback};
pub use item::{
    Badge, BoundedValue, CheckboxStyle, Description, DrillDown, Important, ItemId, ItemKind,
    ItemSlot, ItemValue, ItemVariant, MenuItem, SlotVariant,
};
pub use menu_input::{
    resolve_menu_input, MenuInputState, MenuKeyBindings, MenuPointerInput, NavKey,
    PendingMenuCommand, RefireState,
};
pub use menu_root::{MenuPhase, PauseMenu};
pub use options::{ItemKindOptions, ItemOptions};
pub use resolver::{DynamicValueResolver, ValueFuture, ValueRequest};
pub use sync::{LogSurface, PresentationSurface, SlotPayload, SyncCall, SyncChannel, TabSlot};
pub use tab::{MenuTab, TabChrome, TabWarning};

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum MenuSystems {
    Input,
    Dispatch,
    Publish,
}

/// Hands the frame's command to the menu and advances it one tick.
pub fn tick_pause_menu(menu: Option<ResMut<PauseMenu>>, mut pending: ResMut<PendingMenuCommand>) {
    let command = pending.0.take();
    let Some(mut menu) = menu else {
        return;
    };
    menu.tick(command);
}

pub fn publish_menu_messages(
    menu: Option<ResMut<PauseMenu>>,
    mut events: MessageWriter<MenuEvent>,
    mut feedback: MessageWriter<MenuFeedback>,
) {
    let Some(mut menu) = menu else {
        return;
    };
    for event in menu.drain_events() {
        events.write(event);
    }
    for sound in menu.drain_feedback() {
        feedback.write(MenuFeedback { sound });
    }
}

pub struct PauseMenuPlugin;

impl Plugin for PauseMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuSettings>()
            .init_resource::<MenuKeyBindings>()
            .init_resource::<MenuInputState>()
            .init_resource::<PendingMenuCommand>()
            .add_message::<MenuEvent>()
            .add_message::<MenuFeedback>()
            .add_message::<MenuPointerInput>()
            .add_message::<MouseWheel>();
        app.configure_sets(
            Update,
            (
                MenuSystems::Input,
                MenuSystems::Dispatch.after(MenuSystems::Input),
                MenuSystems::Publish.after(MenuSystems::Dispatch),
            ),
        );
        app.add_systems(Update, resolve_menu_input.in_set(MenuSystems::Input));
        app.add_systems(Update, tick_pause_menu.in_set(MenuSystems::Dispatch));
        app.add_systems(Update, publish_menu_messages.in_set(MenuSystems::Publish));
    }
}
