//! Brick and UI colors
//!
//! Two-hit bricks switch to a darker "cracked" variant after the first hit.
//! The mapping is a plain match rather than a lookup table keyed by RGB.

use serde::{Deserialize, Serialize};

/// Named colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Blue,
    Yellow,
    DarkYellow,
    Cyan,
    DarkCyan,
    Magenta,
    DarkMagenta,
    Orange,
    DarkOrange,
    Purple,
    DarkPurple,
    Grey,
}

/// Grid color per level, cycled by `level % BRICK_PALETTE.len()`
pub const BRICK_PALETTE: [Color; 6] = [
    Color::Green,
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::Orange,
    Color::Purple,
];

/// Bonus bricks start on this color and flash to [`Color::flash_partner`]
pub const BONUS_BRICK_COLOR: Color = Color::White;

impl Color {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::Black => [0, 0, 0],
            Color::White => [255, 255, 255],
            Color::Red => [255, 0, 0],
            Color::DarkRed => [255, 175, 0],
            Color::Green => [0, 255, 0],
            Color::DarkGreen => [0, 175, 0],
            Color::Blue => [0, 0, 255],
            Color::Yellow => [255, 255, 0],
            Color::DarkYellow => [175, 175, 0],
            Color::Cyan => [0, 178, 178],
            Color::DarkCyan => [0, 175, 175],
            Color::Magenta => [255, 0, 255],
            Color::DarkMagenta => [175, 0, 175],
            Color::Orange => [255, 165, 0],
            Color::DarkOrange => [175, 110, 0],
            Color::Purple => [128, 0, 128],
            Color::DarkPurple => [64, 0, 64],
            Color::Grey => [169, 169, 169],
        }
    }

    /// Cracked variant shown after the first hit on a two-hit brick.
    /// Colors without a dark counterpart are returned unchanged.
    pub fn cracked(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Red => Color::DarkRed,
            Color::Green => Color::DarkGreen,
            Color::Yellow => Color::DarkYellow,
            Color::Cyan => Color::DarkCyan,
            Color::Magenta => Color::DarkMagenta,
            Color::Orange => Color::DarkOrange,
            Color::Purple => Color::DarkPurple,
            other => other,
        }
    }

    /// Next color of a flashing brick: white goes red, everything else goes white
    pub fn flash_partner(self) -> Color {
        if self == Color::White {
            Color::Red
        } else {
            Color::White
        }
    }
}

/// Grid color for a level
pub fn level_color(level: u32) -> Color {
    BRICK_PALETTE[level as usize % BRICK_PALETTE.len()]
}
