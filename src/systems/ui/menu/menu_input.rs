//! Turns raw keyboard, wheel and pointer input into at most one `MenuCommand` per frame.
use std::time::Duration;

use bevy::{
    input::mouse::{MouseScrollUnit, MouseWheel},
    prelude::*,
};
use enum_map::{Enum, EnumMap};

use crate::data::settings::InputTimings;

use super::{
    defs::{
        ColumnPosition, MenuCommand, PointerContext, POINTER_CONTEXT_TAB_BAR,
        POINTER_EVENT_CLICK, POINTER_EVENT_HOVER_ENTER, POINTER_EVENT_HOVER_LEAVE,
    },
    menu_root::PauseMenu,
};

#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct MenuKeyBindings {
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub accept: Vec<KeyCode>,
    pub back: Vec<KeyCode>,
    pub tab_prev: Vec<KeyCode>,
    pub tab_next: Vec<KeyCode>,
}

impl Default for MenuKeyBindings {
    fn default() -> Self {
        Self {
            up: vec![KeyCode::ArrowUp, KeyCode::KeyW],
            down: vec![KeyCode::ArrowDown, KeyCode::KeyS],
            left: vec![KeyCode::ArrowLeft, KeyCode::KeyA],
            right: vec![KeyCode::ArrowRight, KeyCode::KeyD],
            accept: vec![KeyCode::Enter, KeyCode::Space],
            back: vec![KeyCode::Escape, KeyCode::Backspace],
            tab_prev: vec![KeyCode::KeyQ, KeyCode::PageUp],
            tab_next: vec![KeyCode::KeyE, KeyCode::PageDown],
        }
    }
}

impl MenuKeyBindings {
    fn directional(&self, key: NavKey) -> &[KeyCode] {
        match key {
            NavKey::Up => &self.up,
            NavKey::Down => &self.down,
            NavKey::Left => &self.left,
            NavKey::Right => &self.right,
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
}

impl NavKey {
    const ALL: [NavKey; 4] = [NavKey::Up, NavKey::Down, NavKey::Left, NavKey::Right];

    fn command(self) -> MenuCommand {
        match self {
            Self::Up => MenuCommand::Up,
            Self::Down => MenuCommand::Down,
            Self::Left => MenuCommand::Left,
            Self::Right => MenuCommand::Right,
        }
    }

    /// Vertical keys speed up while held; horizontal ones repeat at a fixed rate.
    fn accelerates(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Hold-to-repeat timer for one direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefireState {
    until_next: Option<Duration>,
    interval: Duration,
}

impl RefireState {
    /// Advances the timer by `delta`. Returns whether the key fires this frame.
    pub fn update(
        &mut self,
        held: bool,
        delta: Duration,
        timings: &InputTimings,
        accelerate: bool,
    ) -> bool {
        if !held {
            *self = Self::default();
            return false;
        }
        let Some(until_next) = self.until_next else {
            self.interval = timings.initial_refire();
            self.until_next = Some(self.interval);
            return true;
        };
        let remaining = until_next.saturating_sub(delta);
        if !remaining.is_zero() {
            self.until_next = Some(remaining);
            return false;
        }
        if accelerate {
            self.interval = self
                .interval
                .saturating_sub(timings.refire_attrition())
                .max(timings.minimum_refire());
        }
        self.until_next = Some(self.interval);
        true
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[derive(Resource, Debug, Default)]
pub struct MenuInputState {
    refire: EnumMap<NavKey, RefireState>,
    accept_armed: bool,
    back_armed: bool,
}

impl MenuInputState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn refire(&self, key: NavKey) -> &RefireState {
        &self.refire[key]
    }
}

/// The command resolved for this frame, consumed by the menu tick.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingMenuCommand(pub Option<MenuCommand>);

/// Pointer event in the presentation layer's encoding.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuPointerInput {
    pub event_type: i32,
    pub context: i32,
    pub item_index: i32,
}

impl MenuPointerInput {
    pub fn command(&self) -> Option<MenuCommand> {
        let index = usize::try_from(self.item_index).ok()?;
        let context = if self.context == POINTER_CONTEXT_TAB_BAR {
            PointerContext::TabBar
        } else {
            PointerContext::Column(ColumnPosition::from_index(self.context)?)
        };
        match self.event_type {
            POINTER_EVENT_CLICK => Some(MenuCommand::PointerSelect { context, index }),
            POINTER_EVENT_HOVER_ENTER => Some(MenuCommand::PointerHover {
                context,
                index,
                entered: true,
            }),
            POINTER_EVENT_HOVER_LEAVE => Some(MenuCommand::PointerHover {
                context,
                index,
                entered: false,
            }),
            _ => None,
        }
    }
}

/// A click wins over hovers; otherwise the latest hover change is kept.
pub(crate) fn pointer_command<'a>(
    inputs: impl IntoIterator<Item = &'a MenuPointerInput>,
) -> Option<MenuCommand> {
    let mut hover = None;
    for input in inputs {
        match input.command() {
            Some(click @ MenuCommand::PointerSelect { .. }) => return Some(click),
            Some(command) => hover = Some(command),
            None => debug!("ignoring unknown pointer input {input:?}"),
        }
    }
    hover
}

pub(crate) fn wheel_command<'a>(wheel: impl IntoIterator<Item = &'a MouseWheel>) -> Option<MenuCommand> {
    let total: f32 = wheel
        .into_iter()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y.signum(),
        })
        .sum();
    if total > 0.0 {
        Some(MenuCommand::ScrollUp)
    } else if total < 0.0 {
        Some(MenuCommand::ScrollDown)
    } else {
        None
    }
}

fn any_just_pressed(keys: &ButtonInput<KeyCode>, codes: &[KeyCode]) -> bool {
    codes.iter().any(|code| keys.just_pressed(*code))
}

fn any_pressed(keys: &ButtonInput<KeyCode>, codes: &[KeyCode]) -> bool {
    codes.iter().any(|code| keys.pressed(*code))
}

fn any_just_released(keys: &ButtonInput<KeyCode>, codes: &[KeyCode]) -> bool {
    codes.iter().any(|code| keys.just_released(*code))
}

/// Keyboard half of the resolution. Timers advance for every direction even when a
/// higher priority command wins the frame.
pub(crate) fn keyboard_command(
    keys: &ButtonInput<KeyCode>,
    bindings: &MenuKeyBindings,
    state: &mut MenuInputState,
    delta: Duration,
    timings: &InputTimings,
) -> Option<MenuCommand> {
    // Accept and Back fire on release, and only for presses that began in the menu.
    state.accept_armed |= any_just_pressed(keys, &bindings.accept);
    state.back_armed |= any_just_pressed(keys, &bindings.back);
    let accept = state.accept_armed && any_just_released(keys, &bindings.accept);
    let back = state.back_armed && any_just_released(keys, &bindings.back);
    if accept {
        state.accept_armed = false;
    }
    if back {
        state.back_armed = false;
    }

    let mut directional = None;
    for key in NavKey::ALL {
        let held = any_pressed(keys, bindings.directional(key));
        let fired = state.refire[key].update(held, delta, timings, key.accelerates());
        if fired && directional.is_none() {
            directional = Some(key.command());
        }
    }

    if back {
        Some(MenuCommand::Back)
    } else if accept {
        Some(MenuCommand::Accept)
    } else if any_just_pressed(keys, &bindings.tab_prev) {
        Some(MenuCommand::TabPrev)
    } else if any_just_pressed(keys, &bindings.tab_next) {
        Some(MenuCommand::TabNext)
    } else {
        directional
    }
}

pub fn resolve_menu_input(
    menu: Option<Res<PauseMenu>>,
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<MenuKeyBindings>,
    time: Res<Time>,
    mut state: ResMut<MenuInputState>,
    mut pointer: MessageReader<MenuPointerInput>,
    mut wheel: MessageReader<MouseWheel>,
    mut pending: ResMut<PendingMenuCommand>,
) {
    let Some(menu) = menu.filter(|menu| menu.is_visible()) else {
        state.reset();
        pointer.clear();
        wheel.clear();
        pending.0 = None;
        return;
    };

    let timings = menu.settings().input;
    let keyboard = keyboard_command(&keys, &bindings, &mut state, time.delta(), &timings);

    let mouse = menu.mouse_enabled();
    let pointer = pointer_command(pointer.read()).filter(|_| mouse);
    let wheel_allowed = mouse && (!menu.scroll_only_on_hover() || menu.pointer_over_menu());
    let wheel = wheel_command(wheel.read()).filter(|_| wheel_allowed);

    pending.0 = pointer.or(wheel).or(keyboard);
}
