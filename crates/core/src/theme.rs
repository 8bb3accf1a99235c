//! Theme palettes
//!
//! Only the piece palette crosses into the engine. Everything else a theme carries
//! (backgrounds, borders, text colours) belongs to the presentation layer.

use crate::types::Color;

/// Number of colours in every piece palette
pub const PALETTE_LEN: usize = 6;

pub type Palette = [Color; PALETTE_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeKind {
    #[default]
    Classic,
    Neon,
    Dark,
    Retro,
    Blue,
}

const CLASSIC: Palette = [
    Color::rgb(227, 143, 16),
    Color::rgb(186, 19, 38),
    Color::rgb(16, 158, 40),
    Color::rgb(20, 56, 184),
    Color::rgb(101, 19, 148),
    Color::rgb(31, 165, 222),
];

const NEON: Palette = [
    Color::rgb(255, 0, 128),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 255, 0),
    Color::rgb(0, 255, 128),
    Color::rgb(255, 0, 255),
    Color::rgb(128, 0, 255),
];

const DARK: Palette = [
    Color::rgb(100, 100, 100),
    Color::rgb(120, 120, 120),
    Color::rgb(140, 140, 140),
    Color::rgb(160, 160, 160),
    Color::rgb(180, 180, 180),
    Color::rgb(200, 200, 200),
];

const RETRO: Palette = [
    Color::rgb(170, 255, 170),
    Color::rgb(100, 180, 100),
    Color::rgb(80, 160, 80),
    Color::rgb(60, 120, 60),
    Color::rgb(40, 100, 40),
    Color::rgb(30, 80, 30),
];

const BLUE: Palette = [
    Color::rgb(255, 255, 255),
    Color::rgb(255, 204, 0),
    Color::rgb(0, 153, 51),
    Color::rgb(0, 102, 204),
    Color::rgb(255, 0, 0),
    Color::rgb(153, 51, 255),
];

impl ThemeKind {
    pub const ALL: [Self; 5] = [Self::Classic, Self::Neon, Self::Dark, Self::Retro, Self::Blue];

    pub fn piece_colors(&self) -> &'static Palette {
        match self {
            Self::Classic => &CLASSIC,
            Self::Neon => &NEON,
            Self::Dark => &DARK,
            Self::Retro => &RETRO,
            Self::Blue => &BLUE,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Neon => "Neon",
            Self::Dark => "Dark",
            Self::Retro => "Retro",
            Self::Blue => "Blue",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Neon => "neon",
            Self::Dark => "dark",
            Self::Retro => "retro",
            Self::Blue => "blue",
        }
    }

    /// Parse theme from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.iter().copied().find(|t| t.as_str() == lower)
    }
}
