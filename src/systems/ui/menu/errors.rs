use super::item::ItemVariant;

/// Misuse of the builder API. Returned synchronously, nothing is mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuUsageError {
    RightLabelUnsupported(ItemVariant),
    RightBadgeUnsupported(ItemVariant),
    LeftBadgeUnsupported(ItemVariant),
    DescriptionSlotOutOfRange(usize),
    EmptyList,
    InvalidBounds { max: i32, step: i32 },
    MissingResolver,
    NoTabs,
    AlreadyVisible,
    TabOutOfRange(usize),
}

impl std::fmt::Display for MenuUsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RightLabelUnsupported(variant) => {
                write!(f, "right labels are only supported on plain items, not {variant:?}")
            }
            Self::RightBadgeUnsupported(variant) => {
                write!(f, "right badges are only supported on plain items, not {variant:?}")
            }
            Self::LeftBadgeUnsupported(variant) => {
                write!(f, "left badges are not supported on {variant:?} items")
            }
            Self::DescriptionSlotOutOfRange(slot) => {
                write!(f, "description slot {slot} does not exist (slots are 0..=2)")
            }
            Self::EmptyList => write!(f, "list items need at least one option"),
            Self::InvalidBounds { max, step } => {
                write!(f, "numeric items need max > 0 and step > 0 (got max {max}, step {step})")
            }
            Self::MissingResolver => write!(f, "dynamic list items need a value resolver"),
            Self::NoTabs => write!(f, "a menu cannot be shown without tabs"),
            Self::AlreadyVisible => write!(f, "the menu is already open"),
            Self::TabOutOfRange(index) => write!(f, "tab {index} does not exist"),
        }
    }
}

impl std::error::Error for MenuUsageError {}

/// A request that would leave the menu in a degenerate state. Logged, state untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuWarning {
    EmptyFilterResult,
    PredicateFailed(String),
    IndexOutOfRange { index: usize, len: usize },
    NothingToFilter,
}

impl std::fmt::Display for MenuWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFilterResult => write!(f, "filter matched no items; column left unchanged"),
            Self::PredicateFailed(message) => {
                write!(f, "filter predicate failed ({message}); column left unchanged")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is outside a column of {len} items")
            }
            Self::NothingToFilter => write!(f, "column is empty; nothing to filter"),
        }
    }
}

impl std::error::Error for MenuWarning {}
