//! Declarative item construction, so menus can be described in JSON.
use serde::{Deserialize, Serialize};

use crate::systems::colors::Tint;

use super::{
    defs::DESCRIPTION_SLOTS,
    errors::MenuUsageError,
    item::{Badge, CheckboxStyle, Description, Important, MenuItem},
    resolver::DynamicValueResolver,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKindOptions {
    Plain {
        #[serde(default)]
        right_label: Option<String>,
        #[serde(default)]
        right_badge: Option<Badge>,
    },
    Checkbox {
        #[serde(default)]
        checked: bool,
        #[serde(default)]
        style: CheckboxStyle,
    },
    List {
        options: Vec<String>,
        #[serde(default)]
        index: usize,
    },
    Dynamic {
        #[serde(default)]
        current: String,
    },
    Slider {
        max: i32,
        #[serde(default = "default_step")]
        step: i32,
        #[serde(default)]
        value: i32,
        #[serde(default)]
        bar_tint: Option<Tint>,
        #[serde(default)]
        heritage: bool,
    },
    Progress {
        max: i32,
        #[serde(default = "default_step")]
        step: i32,
        #[serde(default)]
        value: i32,
        #[serde(default)]
        bar_tint: Option<Tint>,
    },
    Separator {
        #[serde(default)]
        jumpable: bool,
    },
}

fn default_step() -> i32 {
    1
}

impl Default for ItemKindOptions {
    fn default() -> Self {
        Self::Plain {
            right_label: None,
            right_badge: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemOptions {
    pub label: String,
    pub label_font: Option<String>,
    pub right_label_font: Option<String>,
    pub descriptions: Vec<Description>,
    pub enabled: bool,
    pub main_tint: Option<Tint>,
    pub highlight_tint: Option<Tint>,
    pub keep_text_white: bool,
    pub left_badge: Option<Badge>,
    pub important: Option<Important>,
    #[serde(flatten)]
    pub kind: ItemKindOptions,
}

impl Default for ItemOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            label_font: None,
            right_label_font: None,
            descriptions: Vec::new(),
            enabled: true,
            main_tint: None,
            highlight_tint: None,
            keep_text_white: false,
            left_badge: None,
            important: None,
            kind: ItemKindOptions::default(),
        }
    }
}

impl ItemOptions {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Builds the item. Dynamic lists take `resolver`; every other kind ignores it.
    pub fn build(self, resolver: Option<DynamicValueResolver>) -> Result<MenuItem, MenuUsageError> {
        if self.descriptions.len() > DESCRIPTION_SLOTS {
            return Err(MenuUsageError::DescriptionSlotOutOfRange(DESCRIPTION_SLOTS));
        }
        let label = self.label;
        let mut item = match self.kind {
            ItemKindOptions::Plain {
                right_label,
                right_badge,
            } => {
                let mut item = MenuItem::new(label);
                if let Some(right_label) = right_label {
                    item.set_right_label(right_label)?;
                }
                item.set_right_badge(right_badge)?;
                item
            }
            ItemKindOptions::Checkbox { checked, style } => {
                MenuItem::checkbox(label, checked).with_checkbox_style(style)
            }
            ItemKindOptions::List { options, index } => MenuItem::list(label, options, index)?,
            ItemKindOptions::Dynamic { current } => {
                let resolver = resolver.ok_or(MenuUsageError::MissingResolver)?;
                MenuItem::dynamic_list(label, current, resolver)
            }
            ItemKindOptions::Slider {
                max,
                step,
                value,
                bar_tint,
                heritage,
            } => {
                let item = MenuItem::slider(label, max, step, value)?.with_heritage(heritage);
                match bar_tint {
                    Some(tint) => item.with_bar_tint(tint),
                    None => item,
                }
            }
            ItemKindOptions::Progress {
                max,
                step,
                value,
                bar_tint,
            } => {
                let item = MenuItem::progress(label, max, step, value)?;
                match bar_tint {
                    Some(tint) => item.with_bar_tint(tint),
                    None => item,
                }
            }
            ItemKindOptions::Separator { jumpable } => MenuItem::separator(label, jumpable),
        };

        for (slot, description) in self.descriptions.into_iter().enumerate() {
            item.set_description(slot, description)?;
        }
        if self.left_badge.is_some() {
            item.set_left_badge(self.left_badge)?;
        }
        if let Some(font) = self.label_font {
            item.label_font = font;
        }
        if let Some(font) = self.right_label_font {
            item.right_label_font = font;
        }
        if self.main_tint.is_some() {
            item.main_tint = self.main_tint;
        }
        if let Some(tint) = self.highlight_tint {
            item.highlight_tint = tint;
        }
        item.enabled = self.enabled;
        item.keep_text_white = self.keep_text_white;
        item.important = self.important;
        Ok(item)
    }
}
