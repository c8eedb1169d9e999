//! Themes: three palettes, the toggle order, and the startup color-scheme probe
//!
//! Theme state belongs to the view. The engine never reads it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{CalcError, CalcResult};

/// Environment variable terminals use to advertise their colors (`fg;bg`)
pub const COLORFGBG_VAR: &str = "COLORFGBG";

/// One of the three selectable themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ThemeId {
    /// Dark blue desk
    #[default]
    One,
    /// Light gray
    Two,
    /// Violet neon
    Three,
}

impl ThemeId {
    /// All themes in toggle order
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// Returns the number shown above the toggle (1-3)
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Parses a theme number
    pub const fn from_number(number: u8) -> CalcResult<Self> {
        match number {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(CalcError::InvalidTheme(other)),
        }
    }

    /// Next theme in the cycle 1 -> 2 -> 3 -> 1
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::Three,
            Self::Three => Self::One,
        }
    }

    /// Theme matching the host preference: dark -> 1, light -> 2
    #[must_use]
    pub const fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::One
        } else {
            Self::Two
        }
    }

    /// Palette for this theme
    #[must_use]
    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::One => &THEME_ONE,
            Self::Two => &THEME_TWO,
            Self::Three => &THEME_THREE,
        }
    }

    /// Label color on the `=` key; theme 3 draws it in the primary text color
    #[must_use]
    pub const fn equals_label(self) -> Hsl {
        match self {
            Self::Three => THEME_THREE.text_primary,
            Self::One | Self::Two => self.palette().text_secondary,
        }
    }
}

impl TryFrom<u8> for ThemeId {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<ThemeId> for u8 {
    fn from(theme: ThemeId) -> Self {
        theme.number()
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A CSS-style HSL color: hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    /// Hue, 0-359
    pub h: u16,
    /// Saturation, 0-100
    pub s: u8,
    /// Lightness, 0-100
    pub l: u8,
}

/// Shorthand for palette tables
const fn hsl(h: u16, s: u8, l: u8) -> Hsl {
    Hsl { h, s, l }
}

impl Hsl {
    /// Converts to 8-bit sRGB channels
    #[must_use]
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let h = f64::from(self.h % 360);
        let s = f64::from(self.s.min(100)) / 100.0;
        let l = f64::from(self.l.min(100)) / 100.0;
        let a = s * l.min(1.0 - l);

        let channel = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        (channel(0.0), channel(8.0), channel(4.0))
    }
}

/// The twelve colors a theme defines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background
    pub main_bg: Hsl,
    /// Toggle track and keypad background
    pub toggle_bg: Hsl,
    /// Screen background
    pub screen_bg: Hsl,
    /// Number key face
    pub key_bg: Hsl,
    /// Number key shadow
    pub key_shadow: Hsl,
    /// DEL / RESET key face
    pub special_key_bg: Hsl,
    /// DEL / RESET key shadow
    pub special_key_shadow: Hsl,
    /// `=` key face, also the toggle knob
    pub equals_key_bg: Hsl,
    /// `=` key shadow
    pub equals_key_shadow: Hsl,
    /// Label on number keys
    pub text_primary: Hsl,
    /// Label on special keys, and on `=` outside theme 3
    pub text_secondary: Hsl,
    /// Screen text, title and toggle labels
    pub text_display: Hsl,
}

/// Theme 1
pub const THEME_ONE: Palette = Palette {
    main_bg: hsl(222, 26, 31),
    toggle_bg: hsl(223, 31, 20),
    screen_bg: hsl(224, 36, 15),
    key_bg: hsl(30, 25, 89),
    key_shadow: hsl(28, 16, 65),
    special_key_bg: hsl(225, 21, 49),
    special_key_shadow: hsl(224, 28, 35),
    equals_key_bg: hsl(6, 63, 50),
    equals_key_shadow: hsl(6, 70, 34),
    text_primary: hsl(221, 14, 31),
    text_secondary: hsl(0, 0, 100),
    text_display: hsl(0, 0, 100),
};

/// Theme 2
pub const THEME_TWO: Palette = Palette {
    main_bg: hsl(0, 0, 90),
    toggle_bg: hsl(0, 5, 81),
    screen_bg: hsl(0, 0, 93),
    key_bg: hsl(45, 7, 89),
    key_shadow: hsl(35, 11, 61),
    special_key_bg: hsl(185, 42, 37),
    special_key_shadow: hsl(185, 58, 25),
    equals_key_bg: hsl(25, 98, 40),
    equals_key_shadow: hsl(25, 99, 27),
    text_primary: hsl(60, 10, 19),
    text_secondary: hsl(0, 0, 100),
    text_display: hsl(60, 10, 19),
};

/// Theme 3
pub const THEME_THREE: Palette = Palette {
    main_bg: hsl(268, 75, 9),
    toggle_bg: hsl(268, 71, 12),
    screen_bg: hsl(268, 71, 12),
    key_bg: hsl(268, 47, 21),
    key_shadow: hsl(290, 70, 36),
    special_key_bg: hsl(281, 89, 26),
    special_key_shadow: hsl(285, 91, 52),
    equals_key_bg: hsl(176, 100, 44),
    equals_key_shadow: hsl(177, 92, 70),
    text_primary: hsl(52, 100, 62),
    text_secondary: hsl(0, 0, 100),
    text_display: hsl(52, 100, 62),
};

/// Host capability answering "does the user prefer a dark color scheme?"
///
/// Queried once at startup; the answer only picks the initial theme.
pub trait ColorSchemeProbe {
    /// Returns true when the host prefers dark colors
    fn prefers_dark(&self) -> bool;
}

/// Probe backed by the `COLORFGBG` environment variable
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorScheme;

impl ColorSchemeProbe for EnvColorScheme {
    fn prefers_dark(&self) -> bool {
        let value = std::env::var(COLORFGBG_VAR).ok();
        prefers_dark_from_colorfgbg(value.as_deref())
    }
}

/// Probe with a fixed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedColorScheme(pub bool);

impl ColorSchemeProbe for FixedColorScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Interprets a `COLORFGBG` value. The last field is the background color
/// index; 7 and 15 are the light grays. Missing or unparsable means dark.
#[must_use]
pub fn prefers_dark_from_colorfgbg(value: Option<&str>) -> bool {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    !matches!(background, Some(7 | 15))
}

/// Picks the starting theme by asking the probe once
pub fn initial_theme(probe: &dyn ColorSchemeProbe) -> ThemeId {
    let prefers_dark = probe.prefers_dark();
    let theme = ThemeId::from_preference(prefers_dark);
    info!(prefers_dark, %theme, "initial theme selected");
    theme
}
