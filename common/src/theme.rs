//! Theme identifiers and the CSS custom properties they expand to.

use std::fmt::Display;
use std::str::FromStr;

pub const THEME_STORAGE_KEY: &str = "wms_theme";
pub const MODE_STORAGE_KEY: &str = "wms_mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeId {
    #[default]
    Indigo,
    Emerald,
    Amber,
    Slate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

pub const ALL_THEMES: [ThemeId; 4] = [ThemeId::Indigo, ThemeId::Emerald, ThemeId::Amber, ThemeId::Slate];

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Indigo => "indigo",
            ThemeId::Emerald => "emerald",
            ThemeId::Amber => "amber",
            ThemeId::Slate => "slate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeId::Indigo => "Indigo",
            ThemeId::Emerald => "Emerald",
            ThemeId::Amber => "Amber",
            ThemeId::Slate => "Slate",
        }
    }

    /// `(primary, primary-contrast, accent)` per mode.
    fn palette(&self, mode: Mode) -> (&'static str, &'static str, &'static str) {
        match (self, mode) {
            (ThemeId::Indigo, Mode::Light) => ("#3f51b5", "#ffffff", "#ff4081"),
            (ThemeId::Indigo, Mode::Dark) => ("#7986cb", "#0d0f1a", "#ff80ab"),
            (ThemeId::Emerald, Mode::Light) => ("#047857", "#ffffff", "#f59e0b"),
            (ThemeId::Emerald, Mode::Dark) => ("#34d399", "#022c22", "#fbbf24"),
            (ThemeId::Amber, Mode::Light) => ("#b45309", "#ffffff", "#2563eb"),
            (ThemeId::Amber, Mode::Dark) => ("#fbbf24", "#1c1002", "#60a5fa"),
            (ThemeId::Slate, Mode::Light) => ("#334155", "#ffffff", "#0ea5e9"),
            (ThemeId::Slate, Mode::Dark) => ("#94a3b8", "#0f172a", "#38bdf8"),
        }
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_THEMES
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme: {}", s))
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        })
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

/// Custom properties to set on `:root` for the given theme and mode.
pub fn css_variables(theme: ThemeId, mode: Mode) -> Vec<(&'static str, &'static str)> {
    let (primary, on_primary, accent) = theme.palette(mode);
    let (background, surface, text, muted, border) = match mode {
        Mode::Light => ("#f5f6fa", "#ffffff", "#1f2933", "#6b7280", "#e5e7eb"),
        Mode::Dark => ("#0b0d12", "#161a22", "#e5e7eb", "#9ca3af", "#2a2f3a"),
    };
    vec![
        ("--color-primary", primary),
        ("--color-on-primary", on_primary),
        ("--color-accent", accent),
        ("--color-background", background),
        ("--color-surface", surface),
        ("--color-text", text),
        ("--color-muted", muted),
        ("--color-border", border),
        ("--color-danger", "#e53935"),
        ("--color-success", "#2e7d32"),
    ]
}

/// Restores a stored selection, falling back to defaults for missing or stale values.
pub fn restore(theme: Option<&str>, mode: Option<&str>) -> (ThemeId, Mode) {
    (
        theme.and_then(|t| t.parse().ok()).unwrap_or_default(),
        mode.and_then(|m| m.parse().ok()).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_defines_the_same_variables() {
        let names: Vec<_> = css_variables(ThemeId::Indigo, Mode::Light)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        for theme in ALL_THEMES {
            for mode in [Mode::Light, Mode::Dark] {
                let vars = css_variables(theme, mode);
                let keys: Vec<_> = vars.iter().map(|(k, _)| *k).collect();
                assert_eq!(keys, names);
                assert!(vars.iter().all(|(_, v)| v.starts_with('#')));
            }
        }
    }

    #[test]
    fn light_and_dark_differ() {
        assert_ne!(
            css_variables(ThemeId::Emerald, Mode::Light),
            css_variables(ThemeId::Emerald, Mode::Dark)
        );
    }

    #[test]
    fn restore_falls_back_to_defaults() {
        assert_eq!(restore(Some("SLATE"), Some("dark")), (ThemeId::Slate, Mode::Dark));
        assert_eq!(restore(Some("neon"), None), (ThemeId::Indigo, Mode::Light));
        assert_eq!(Mode::Light.toggled(), Mode::Dark);
        assert_eq!(ThemeId::Amber.to_string().parse::<ThemeId>(), Ok(ThemeId::Amber));
    }
}
