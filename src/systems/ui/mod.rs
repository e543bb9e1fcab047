//! UI systems. `menu` holds the tabbed pause menu and its Bevy plugin.
pub mod menu;
