//! Category colour tags and the flat palette they are drawn from.
//!
//! # Responsibility
//! - Store colours as hex strings exactly as persisted.
//! - Parse hex strings into RGB for presentation styling.
//! - Pick palette colours for new categories.
//!
//! # Invariants
//! - Invalid hex strings never fail: `parse_rgb` returns `None` and styling
//!   is skipped by the caller.
//! - Palette entries are valid `#RRGGBB` strings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid hex color regex"));

/// Flat UI palette used for category colour assignment.
pub const FLAT_PALETTE: &[&str] = &[
    "#1ABC9C", "#16A085", "#2ECC71", "#27AE60", "#3498DB", "#2980B9", "#9B59B6", "#8E44AD",
    "#34495E", "#2C3E50", "#F1C40F", "#F39C12", "#E67E22", "#D35400", "#E74C3C", "#C0392B",
    "#ECF0F1", "#BDC3C7", "#95A5A6", "#7F8C8D",
];

const FLAT_LIGHT_TEXT: Rgb = Rgb {
    r: 0xEC,
    g: 0xF0,
    b: 0xF1,
};
const FLAT_DARK_TEXT: Rgb = Rgb {
    r: 0x26,
    g: 0x26,
    b: 0x26,
};

/// Hex colour string as stored with a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses `#RRGGBB` or `RRGGBB` into RGB components.
    ///
    /// Returns `None` for anything else.
    pub fn parse_rgb(&self) -> Option<Rgb> {
        let caps = HEX_COLOR_RE.captures(self.0.trim())?;
        let digits = caps.get(1)?.as_str();
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Formats as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> HexColor {
        HexColor(format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b))
    }

    /// Perceived brightness in `0.0..=1.0`.
    pub fn luminance(self) -> f32 {
        (f32::from(self.r) * 0.299 + f32::from(self.g) * 0.587 + f32::from(self.b) * 0.114)
            / 255.0
    }

    /// Moves each channel toward black by `fraction`, clamped to `0.0..=1.0`.
    pub fn darken(self, fraction: f32) -> Rgb {
        let keep = 1.0 - fraction.clamp(0.0, 1.0);
        let scale = |channel: u8| (f32::from(channel) * keep).round() as u8;
        Rgb {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Flat text colour readable on top of this colour.
    pub fn contrast_text(self) -> Rgb {
        if self.luminance() > 0.5 {
            FLAT_DARK_TEXT
        } else {
            FLAT_LIGHT_TEXT
        }
    }
}

/// Source of colours for newly created categories.
pub trait PalettePicker {
    fn pick_color(&mut self) -> HexColor;
}

/// Uniform random pick from [`FLAT_PALETTE`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPalettePicker;

impl PalettePicker for RandomPalettePicker {
    fn pick_color(&mut self) -> HexColor {
        // v4 UUIDs carry 122 random bits from the OS generator.
        let draw = Uuid::new_v4().as_u128() % FLAT_PALETTE.len() as u128;
        HexColor::new(FLAT_PALETTE[draw as usize])
    }
}

/// Deterministic picker that walks [`FLAT_PALETTE`] in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPalettePicker {
    next: usize,
}

impl FixedPalettePicker {
    pub fn starting_at(index: usize) -> Self {
        Self {
            next: index % FLAT_PALETTE.len(),
        }
    }
}

impl PalettePicker for FixedPalettePicker {
    fn pick_color(&mut self) -> HexColor {
        let color = HexColor::new(FLAT_PALETTE[self.next]);
        self.next = (self.next + 1) % FLAT_PALETTE.len();
        color
    }
}
