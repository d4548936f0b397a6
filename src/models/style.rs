use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel theme name selecting user supplied colors.
pub const CUSTOM_THEME: &str = "custom";

pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Predefined color schemes known to the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Classic,
    Indigo,
    Sunset,
    Forest,
    Midnight,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Classic,
        Theme::Indigo,
        Theme::Sunset,
        Theme::Forest,
        Theme::Midnight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Indigo => "indigo",
            Theme::Sunset => "sunset",
            Theme::Forest => "forest",
            Theme::Midnight => "midnight",
        }
    }

    /// Case-insensitive lookup; `None` for `"custom"` and unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a named theme or a custom color pair, never both.
///
/// Color strings are carried verbatim; the rendering service is the one
/// that rejects or ignores malformed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSpec {
    Theme(Theme),
    Custom {
        foreground: String,
        background: String,
    },
}

impl StyleSpec {
    pub fn custom(foreground: impl Into<String>, background: impl Into<String>) -> Self {
        StyleSpec::Custom {
            foreground: foreground.into(),
            background: background.into(),
        }
    }

    pub fn theme(&self) -> Option<Theme> {
        match self {
            StyleSpec::Theme(theme) => Some(*theme),
            StyleSpec::Custom { .. } => None,
        }
    }

    pub fn colors(&self) -> Option<(&str, &str)> {
        match self {
            StyleSpec::Theme(_) => None,
            StyleSpec::Custom {
                foreground,
                background,
            } => Some((foreground, background)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup() {
        assert_eq!(Theme::from_name("classic"), Some(Theme::Classic));
        assert_eq!(Theme::from_name(" MIDNIGHT"), Some(Theme::Midnight));
        assert_eq!(Theme::from_name(CUSTOM_THEME), None);
        assert_eq!(Theme::from_name("neon"), None);
        assert_eq!(Theme::from_name(""), None);
    }

    #[test]
    fn test_style_exposes_one_side_only() {
        let themed = StyleSpec::Theme(Theme::Forest);
        assert_eq!(themed.theme(), Some(Theme::Forest));
        assert!(themed.colors().is_none());

        let custom = StyleSpec::custom("#112233", "#ffffff");
        assert!(custom.theme().is_none());
        assert_eq!(custom.colors(), Some(("#112233", "#ffffff")));
    }
}
