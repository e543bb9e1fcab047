use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Packed `0xAARRGGBB` colour as understood by the menu surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tint(pub u32);

pub const HUD_PAUSE_BG: Tint = Tint(0xBA00_0000);
pub const HUD_PAUSEMAP_TINT: Tint = Tint(0xD700_0000);
pub const HUD_WHITE: Tint = Tint(0xFFF0_F0F0);
pub const HUD_PURE_WHITE: Tint = Tint(0xFFFF_FFFF);
pub const HUD_BLACK: Tint = Tint(0xFF00_0000);
pub const HUD_GREY: Tint = Tint(0xFF9B_9B9B);
pub const HUD_RED: Tint = Tint(0xFFE0_3232);
pub const HUD_GOLD: Tint = Tint(0xFFC2_9842);
pub const HUD_ORANGE: Tint = Tint(0xFFFF_8555);
pub const HUD_FREEMODE: Tint = Tint(0xFF2D_6EB9);

impl Tint {
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self((alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::from_argb(alpha, self.red(), self.green(), self.blue())
    }

    pub fn to_color(self) -> Color {
        Color::srgba_u8(self.red(), self.green(), self.blue(), self.alpha())
    }

    /// Opaque colour with random channels, used for throwaway demo content.
    pub fn from_random_values() -> Self {
        let mut rng = rand::rng();
        Self::from_argb(255, rng.random(), rng.random(), rng.random())
    }
}

impl Default for Tint {
    fn default() -> Self {
        HUD_WHITE
    }
}

impl From<Tint> for Color {
    fn from(tint: Tint) -> Self {
        tint.to_color()
    }
}
