//! Light/dark theme preference.
//!
//! The preference is durable (it outlives the session id) and is resolved at
//! startup in this order: saved value, operating-system preference, light.

use std::fmt;
use std::str::FromStr;

use colored::Color;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, THEME_KEY};

/// Visual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle control: the mode you would switch to.
    pub fn icon(self) -> Icon {
        match self {
            Self::Light => Icon::Moon,
            Self::Dark => Icon::Sun,
        }
    }

    /// Terminal colors for transcript rendering.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                user: Color::Blue,
                bot: Color::Black,
                status: Color::Magenta,
                muted: Color::BrightBlack,
                accent: Color::Cyan,
            },
            Self::Dark => Palette {
                user: Color::BrightCyan,
                bot: Color::BrightWhite,
                status: Color::BrightMagenta,
                muted: Color::White,
                accent: Color::BrightYellow,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Toggle-control icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Moon,
    Sun,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Moon => "☾",
            Self::Sun => "☀",
        }
    }
}

/// Terminal colors per transcript role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub user: Color,
    pub bot: Color,
    pub status: Color,
    pub muted: Color,
    pub accent: Color,
}

/// Visual state of the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootAppearance {
    pub dark_mode: bool,
    pub icon: Icon,
}

/// Owns the theme, its visual effect, and its durable persistence.
#[derive(Debug)]
pub struct ThemeManager {
    store: Box<dyn KeyValueStore>,
    theme: Theme,
    appearance: RootAppearance,
}

impl ThemeManager {
    /// Resolve the startup theme and apply it.
    ///
    /// A saved value other than `dark` counts as light.
    pub fn init(store: Box<dyn KeyValueStore>, os_prefers_dark: bool) -> Self {
        let initial = match store.get(THEME_KEY) {
            Some(saved) => saved.parse().unwrap_or(Theme::Light),
            None if os_prefers_dark => Theme::Dark,
            None => Theme::Light,
        };

        let mut manager = Self {
            store,
            theme: initial,
            appearance: RootAppearance {
                dark_mode: false,
                icon: Icon::Moon,
            },
        };
        manager.apply(initial);
        manager
    }

    /// Switch to `theme`, update the root appearance, and persist the choice.
    pub fn apply(&mut self, theme: Theme) {
        self.theme = theme;
        self.appearance = RootAppearance {
            dark_mode: theme == Theme::Dark,
            icon: theme.icon(),
        };
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!(name: "theme.persist.failed", error = %err, "Could not save theme preference");
        }
        debug!(name: "theme.applied", theme = %theme, "Theme applied");
    }

    /// Flip between light and dark.
    pub fn toggle(&mut self) -> Theme {
        let next = if self.appearance.dark_mode {
            Theme::Light
        } else {
            Theme::Dark
        };
        self.apply(next);
        next
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn appearance(&self) -> RootAppearance {
        self.appearance
    }

    /// The value currently held by the durable store.
    pub fn persisted(&self) -> Option<String> {
        self.store.get(THEME_KEY)
    }
}

/// Best-effort read of the terminal's color scheme from `COLORFGBG`.
///
/// The variable looks like `15;0` (foreground;background); backgrounds 0-6
/// and 8 are dark.
pub fn os_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_from_colorfgbg)
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

fn background_from_colorfgbg(value: &str) -> Option<u8> {
    value.rsplit(';').next()?.trim().parse().ok()
}
