use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::systems::colors::{Tint, HUD_BLACK, HUD_FREEMODE, HUD_PAUSE_BG, HUD_WHITE};

use super::{
    column::ItemColumn,
    defs::{
        AdjustDirection, TextureRef, DEFAULT_LABEL_FONT, DEFAULT_RIGHT_LABEL_FONT,
        DESCRIPTION_SLOTS,
    },
    errors::MenuUsageError,
    resolver::{DynamicValueResolver, ValueRequest},
};

/// Process-unique identity of a menu item. Survives sorting, filtering and drill-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    pub text: String,
    pub tint: Tint,
    pub icon: Option<TextureRef>,
}

impl Description {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_icon(mut self, icon: TextureRef) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.icon.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub texture: TextureRef,
    #[serde(default = "Badge::default_main_tint")]
    pub main_tint: Tint,
    #[serde(default = "Badge::default_highlight_tint")]
    pub highlight_tint: Tint,
}

impl Badge {
    pub fn new(texture: TextureRef) -> Self {
        Self {
            texture,
            main_tint: Self::default_main_tint(),
            highlight_tint: Self::default_highlight_tint(),
        }
    }

    fn default_main_tint() -> Tint {
        HUD_WHITE
    }

    fn default_highlight_tint() -> Tint {
        HUD_BLACK
    }
}

/// Pulsing "important" highlight drawn behind the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Important {
    pub tint: Tint,
    #[serde(default)]
    pub animate: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxStyle {
    Cross,
    #[default]
    Tick,
}

/// Integer value stepping inside `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundedValue {
    value: i32,
    max: i32,
    step: i32,
}

impl BoundedValue {
    pub fn new(max: i32, step: i32, value: i32) -> Result<Self, MenuUsageError> {
        if max <= 0 || step <= 0 {
            return Err(MenuUsageError::InvalidBounds { max, step });
        }
        Ok(Self {
            value: value.clamp(0, max),
            max,
            step,
        })
    }

    pub const fn value(self) -> i32 {
        self.value
    }

    pub const fn max(self) -> i32 {
        self.max
    }

    pub const fn step(self) -> i32 {
        self.step
    }

    pub fn set(&mut self, value: i32) -> bool {
        let next = value.clamp(0, self.max);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    fn nudge(&mut self, direction: AdjustDirection) -> bool {
        self.set(self.value.saturating_add(direction.sign() * self.step))
    }
}

/// Which payload an item carries, without the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemVariant {
    Plain,
    Checkbox,
    List,
    DynamicList,
    Slider,
    Progress,
    Separator,
}

#[derive(Clone, Debug)]
pub enum ItemKind {
    Plain {
        right_label: Option<String>,
        right_badge: Option<Badge>,
    },
    Checkbox {
        checked: bool,
        style: CheckboxStyle,
    },
    List {
        options: Vec<String>,
        index: usize,
    },
    DynamicList {
        current: String,
        resolver: DynamicValueResolver,
    },
    Slider {
        value: BoundedValue,
        tint: Tint,
        heritage: bool,
    },
    Progress {
        value: BoundedValue,
        tint: Tint,
    },
    Separator {
        jumpable: bool,
    },
}

impl ItemKind {
    pub fn variant(&self) -> ItemVariant {
        match self {
            Self::Plain { .. } => ItemVariant::Plain,
            Self::Checkbox { .. } => ItemVariant::Checkbox,
            Self::List { .. } => ItemVariant::List,
            Self::DynamicList { .. } => ItemVariant::DynamicList,
            Self::Slider { .. } => ItemVariant::Slider,
            Self::Progress { .. } => ItemVariant::Progress,
            Self::Separator { .. } => ItemVariant::Separator,
        }
    }
}

/// Value reported to the host when an item changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemValue {
    Checked(bool),
    ListIndex(usize),
    Text(String),
    Number(i32),
}

/// Sub-column opened when the owning item is accepted.
#[derive(Debug)]
pub struct DrillDown {
    pub column: Box<ItemColumn>,
    pub show_arrow: bool,
    pub hide_tabs: bool,
}

/// Semantic payload of one row as the presentation surface sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSlot {
    pub id: ItemId,
    pub label: String,
    pub label_font: String,
    pub enabled: bool,
    pub main_tint: Tint,
    pub highlight_tint: Tint,
    pub keep_text_white: bool,
    pub left_badge: Option<Badge>,
    pub important: Option<Important>,
    pub has_sub_column: bool,
    pub variant: SlotVariant,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SlotVariant {
    Plain {
        right_label: Option<String>,
        right_label_font: String,
        right_badge: Option<Badge>,
    },
    Checkbox {
        checked: bool,
        style: CheckboxStyle,
    },
    List {
        current: String,
        right_label_font: String,
    },
    DynamicList {
        current: String,
        right_label_font: String,
    },
    Slider {
        value: i32,
        max: i32,
        tint: Tint,
        heritage: bool,
    },
    Progress {
        value: i32,
        max: i32,
        tint: Tint,
    },
    Separator {
        jumpable: bool,
    },
}

pub(crate) enum ItemActivation {
    Toggled(ItemValue),
    Activated { list_index: Option<usize> },
}

pub(crate) enum ItemAdjustment {
    Changed(ItemValue),
    Unchanged,
    Resolve {
        resolver: DynamicValueResolver,
        request: ValueRequest,
    },
    NotAdjustable,
}

#[derive(Debug)]
pub struct MenuItem {
    id: ItemId,
    pub label: String,
    pub label_font: String,
    pub right_label_font: String,
    pub enabled: bool,
    /// `None` lets the column pick the alternating pause background.
    pub main_tint: Option<Tint>,
    pub highlight_tint: Tint,
    pub keep_text_white: bool,
    pub important: Option<Important>,
    descriptions: [Description; DESCRIPTION_SLOTS],
    left_badge: Option<Badge>,
    selected: bool,
    hovered: bool,
    kind: ItemKind,
    drill_down: Option<DrillDown>,
}

impl MenuItem {
    fn with_kind(label: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::next(),
            label: label.into(),
            label_font: DEFAULT_LABEL_FONT.to_string(),
            right_label_font: DEFAULT_RIGHT_LABEL_FONT.to_string(),
            enabled: true,
            main_tint: None,
            highlight_tint: HUD_WHITE,
            keep_text_white: false,
            important: None,
            descriptions: Default::default(),
            left_badge: None,
            selected: false,
            hovered: false,
            kind,
            drill_down: None,
        }
    }

    pub fn new(label: impl Into<String>) -> Self {
        Self::with_kind(
            label,
            ItemKind::Plain {
                right_label: None,
                right_badge: None,
            },
        )
    }

    pub fn checkbox(label: impl Into<String>, checked: bool) -> Self {
        Self::with_kind(
            label,
            ItemKind::Checkbox {
                checked,
                style: CheckboxStyle::default(),
            },
        )
    }

    pub fn list(
        label: impl Into<String>,
        options: Vec<String>,
        index: usize,
    ) -> Result<Self, MenuUsageError> {
        if options.is_empty() {
            return Err(MenuUsageError::EmptyList);
        }
        let index = index.min(options.len() - 1);
        Ok(Self::with_kind(label, ItemKind::List { options, index }))
    }

    pub fn dynamic_list(
        label: impl Into<String>,
        current: impl Into<String>,
        resolver: DynamicValueResolver,
    ) -> Self {
        Self::with_kind(
            label,
            ItemKind::DynamicList {
                current: current.into(),
                resolver,
            },
        )
    }

    pub fn slider(
        label: impl Into<String>,
        max: i32,
        step: i32,
        value: i32,
    ) -> Result<Self, MenuUsageError> {
        Ok(Self::with_kind(
            label,
            ItemKind::Slider {
                value: BoundedValue::new(max, step, value)?,
                tint: HUD_FREEMODE,
                heritage: false,
            },
        ))
    }

    pub fn progress(
        label: impl Into<String>,
        max: i32,
        step: i32,
        value: i32,
    ) -> Result<Self, MenuUsageError> {
        Ok(Self::with_kind(
            label,
            ItemKind::Progress {
                value: BoundedValue::new(max, step, value)?,
                tint: HUD_FREEMODE,
            },
        ))
    }

    pub fn separator(label: impl Into<String>, jumpable: bool) -> Self {
        let mut item = Self::with_kind(label, ItemKind::Separator { jumpable });
        item.main_tint = Some(HUD_PAUSE_BG);
        item
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.descriptions[0] = Description::new(text);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_tints(mut self, main: Tint, highlight: Tint) -> Self {
        self.main_tint = Some(main);
        self.highlight_tint = highlight;
        self
    }

    pub fn with_right_label(mut self, text: impl Into<String>) -> Result<Self, MenuUsageError> {
        self.set_right_label(text)?;
        Ok(self)
    }

    /// Slider and progress bars only; other variants keep their payload.
    pub fn with_bar_tint(mut self, bar_tint: Tint) -> Self {
        match &mut self.kind {
            ItemKind::Slider { tint, .. } | ItemKind::Progress { tint, .. } => *tint = bar_tint,
            _ => {}
        }
        self
    }

    pub fn with_heritage(mut self, enabled: bool) -> Self {
        if let ItemKind::Slider { heritage, .. } = &mut self.kind {
            *heritage = enabled;
        }
        self
    }

    pub fn with_checkbox_style(mut self, checkbox_style: CheckboxStyle) -> Self {
        if let ItemKind::Checkbox { style, .. } = &mut self.kind {
            *style = checkbox_style;
        }
        self
    }

    pub fn with_sub_column(mut self, column: ItemColumn, show_arrow: bool, hide_tabs: bool) -> Self {
        self.set_sub_column(column, show_arrow, hide_tabs);
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn variant(&self) -> ItemVariant {
        self.kind.variant()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Jumpable separators are skipped by directional navigation.
    pub fn is_jumpable(&self) -> bool {
        matches!(self.kind, ItemKind::Separator { jumpable: true })
    }

    pub fn descriptions(&self) -> &[Description; DESCRIPTION_SLOTS] {
        &self.descriptions
    }

    pub fn has_descriptions(&self) -> bool {
        self.descriptions.iter().any(|description| !description.is_blank())
    }

    pub fn set_description(
        &mut self,
        slot: usize,
        description: Description,
    ) -> Result<(), MenuUsageError> {
        let target = self
            .descriptions
            .get_mut(slot)
            .ok_or(MenuUsageError::DescriptionSlotOutOfRange(slot))?;
        *target = description;
        Ok(())
    }

    pub fn right_label(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Plain { right_label, .. } => right_label.as_deref(),
            _ => None,
        }
    }

    pub fn set_right_label(&mut self, text: impl Into<String>) -> Result<(), MenuUsageError> {
        let variant = self.variant();
        match &mut self.kind {
            ItemKind::Plain { right_label, .. } => {
                *right_label = Some(text.into());
                Ok(())
            }
            _ => Err(MenuUsageError::RightLabelUnsupported(variant)),
        }
    }

    pub fn set_right_badge(&mut self, badge: Option<Badge>) -> Result<(), MenuUsageError> {
        let variant = self.variant();
        match &mut self.kind {
            ItemKind::Plain { right_badge, .. } => {
                *right_badge = badge;
                Ok(())
            }
            _ => Err(MenuUsageError::RightBadgeUnsupported(variant)),
        }
    }

    pub fn left_badge(&self) -> Option<&Badge> {
        self.left_badge.as_ref()
    }

    pub fn set_left_badge(&mut self, badge: Option<Badge>) -> Result<(), MenuUsageError> {
        if let ItemKind::Separator { .. } = self.kind {
            return Err(MenuUsageError::LeftBadgeUnsupported(ItemVariant::Separator));
        }
        self.left_badge = badge;
        Ok(())
    }

    pub fn set_checked(&mut self, value: bool) -> bool {
        match &mut self.kind {
            ItemKind::Checkbox { checked, .. } => {
                *checked = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_list_index(&mut self, value: usize) -> bool {
        match &mut self.kind {
            ItemKind::List { options, index } if value < options.len() => {
                *index = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_numeric_value(&mut self, number: i32) -> bool {
        match &mut self.kind {
            ItemKind::Slider { value, .. } | ItemKind::Progress { value, .. } => {
                value.set(number);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_dynamic_value(&mut self, value: String) -> bool {
        match &mut self.kind {
            ItemKind::DynamicList { current, .. } => {
                *current = value;
                true
            }
            _ => false,
        }
    }

    pub fn value(&self) -> Option<ItemValue> {
        match &self.kind {
            ItemKind::Checkbox { checked, .. } => Some(ItemValue::Checked(*checked)),
            ItemKind::List { index, .. } => Some(ItemValue::ListIndex(*index)),
            ItemKind::DynamicList { current, .. } => Some(ItemValue::Text(current.clone())),
            ItemKind::Slider { value, .. } | ItemKind::Progress { value, .. } => {
                Some(ItemValue::Number(value.value()))
            }
            ItemKind::Plain { .. } | ItemKind::Separator { .. } => None,
        }
    }

    pub fn has_sub_column(&self) -> bool {
        self.drill_down.is_some()
    }

    pub fn sub_column(&self) -> Option<&ItemColumn> {
        self.drill_down.as_ref().map(|drill_down| drill_down.column.as_ref())
    }

    pub fn sub_column_mut(&mut self) -> Option<&mut ItemColumn> {
        self.drill_down.as_mut().map(|drill_down| drill_down.column.as_mut())
    }

    pub fn set_sub_column(&mut self, column: ItemColumn, show_arrow: bool, hide_tabs: bool) {
        self.drill_down = Some(DrillDown {
            column: Box::new(column),
            show_arrow,
            hide_tabs,
        });
    }

    pub(crate) fn take_drill_down(&mut self) -> Option<DrillDown> {
        self.drill_down.take()
    }

    pub(crate) fn restore_drill_down(&mut self, drill_down: DrillDown) {
        self.drill_down = Some(drill_down);
    }

    pub(crate) fn activate(&mut self) -> ItemActivation {
        match &mut self.kind {
            ItemKind::Checkbox { checked, .. } => {
                *checked = !*checked;
                ItemActivation::Toggled(ItemValue::Checked(*checked))
            }
            ItemKind::List { index, .. } => ItemActivation::Activated {
                list_index: Some(*index),
            },
            ItemKind::Plain { .. }
            | ItemKind::DynamicList { .. }
            | ItemKind::Slider { .. }
            | ItemKind::Progress { .. }
            | ItemKind::Separator { .. } => ItemActivation::Activated { list_index: None },
        }
    }

    pub(crate) fn adjust(&mut self, direction: AdjustDirection) -> ItemAdjustment {
        let id = self.id;
        match &mut self.kind {
            ItemKind::Slider { value, .. } | ItemKind::Progress { value, .. } => {
                if value.nudge(direction) {
                    ItemAdjustment::Changed(ItemValue::Number(value.value()))
                } else {
                    ItemAdjustment::Unchanged
                }
            }
            ItemKind::List { options, index } => {
                let len = options.len();
                if len == 0 {
                    return ItemAdjustment::Unchanged;
                }
                let next = match direction {
                    AdjustDirection::Left => (*index + len - 1) % len,
                    AdjustDirection::Right => (*index + 1) % len,
                };
                if next == *index {
                    return ItemAdjustment::Unchanged;
                }
                *index = next;
                ItemAdjustment::Changed(ItemValue::ListIndex(next))
            }
            ItemKind::DynamicList { current, resolver } => ItemAdjustment::Resolve {
                resolver: resolver.clone(),
                request: ValueRequest {
                    item: id,
                    current: current.clone(),
                    direction,
                },
            },
            ItemKind::Plain { .. } | ItemKind::Checkbox { .. } | ItemKind::Separator { .. } => {
                ItemAdjustment::NotAdjustable
            }
        }
    }

    pub fn slot(&self) -> ItemSlot {
        let variant = match &self.kind {
            ItemKind::Plain {
                right_label,
                right_badge,
            } => SlotVariant::Plain {
                right_label: right_label.clone(),
                right_label_font: self.right_label_font.clone(),
                right_badge: right_badge.clone(),
            },
            ItemKind::Checkbox { checked, style } => SlotVariant::Checkbox {
                checked: *checked,
                style: *style,
            },
            ItemKind::List { options, index } => SlotVariant::List {
                current: options.get(*index).cloned().unwrap_or_default(),
                right_label_font: self.right_label_font.clone(),
            },
            ItemKind::DynamicList { current, .. } => SlotVariant::DynamicList {
                current: current.clone(),
                right_label_font: self.right_label_font.clone(),
            },
            ItemKind::Slider {
                value,
                tint,
                heritage,
            } => SlotVariant::Slider {
                value: value.value(),
                max: value.max(),
                tint: *tint,
                heritage: *heritage,
            },
            ItemKind::Progress { value, tint } => SlotVariant::Progress {
                value: value.value(),
                max: value.max(),
                tint: *tint,
            },
            ItemKind::Separator { jumpable } => SlotVariant::Separator {
                jumpable: *jumpable,
            },
        };

        ItemSlot {
            id: self.id,
            label: self.label.clone(),
            label_font: self.label_font.clone(),
            enabled: self.enabled,
            main_tint: self.main_tint.unwrap_or(HUD_PAUSE_BG),
            highlight_tint: self.highlight_tint,
            keep_text_white: self.keep_text_white,
            left_badge: self.left_badge.clone(),
            important: self.important,
            has_sub_column: self.drill_down.is_some(),
            variant,
        }
    }
}
