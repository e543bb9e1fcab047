pub mod data;
pub mod systems;

pub mod prelude {
    pub use crate::data::settings::{InputTimings, MenuSettings, SettingsError};
    pub use crate::systems::colors::*;
    pub use crate::systems::ui::menu::*;
}
