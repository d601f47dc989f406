//! Display preferences: theme, language and the global loading indicator.
//!
//! Preferences are ephemeral and reset on restart.

use serde::{Deserialize, Serialize};

/// Language tag used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

/// Colour scheme of the console.
///
/// # Examples
///
/// ```
/// # use admin_console::domain::Theme;
/// assert_eq!(Theme::default(), Theme::Light);
/// assert_eq!(Theme::Light.toggled(), Theme::Dark);
/// assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown theme: {}", self.input)
    }
}

impl std::error::Error for ParseThemeError {}

impl std::str::FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Preferences store.
///
/// Every setter is an unconditional assignment; the language tag is opaque
/// and not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    theme: Theme,
    language: String,
    loading: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Preferences {
    /// Light theme, not loading, with the given language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            theme: Theme::default(),
            language: language.into(),
            loading: false,
        }
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Language tag, not validated.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the global loading indicator is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switch to `theme`.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Replace the language tag.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Show or hide the loading indicator.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
