//! Named color palettes for badges.
//!
//! The registry starts with a fixed set of presets and can be extended with
//! palettes read from a JSON file:
//!
//! ```json
//! { "mint": { "background": "#0b1412", "card": "#12201c", "title": "#d2f4ea",
//!             "subtitle": "#7fa89b", "bodyText": "#e9f7f2", "accent": "#3ddc97",
//!             "barTrack": "#26403a" } }
//! ```

use std::{collections::BTreeMap, path::Path};

use log::debug;
use serde::Deserialize;

use crate::clients::errors::{Error, Result};

/// The seven colors a badge is painted with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Palette {
    pub background: String,
    pub card: String,
    pub title: String,
    pub subtitle: String,
    pub body_text: String,
    pub accent: String,
    pub bar_track: String,
}

impl Palette {
    fn from_hex(colors: [&str; 7]) -> Self {
        let [background, card, title, subtitle, body_text, accent, bar_track] =
            colors.map(str::to_string);
        Palette {
            background,
            card,
            title,
            subtitle,
            body_text,
            accent,
            bar_track,
        }
    }

    /// Field name and value of every color, in declaration order.
    pub fn colors(&self) -> [(&'static str, &str); 7] {
        [
            ("background", self.background.as_str()),
            ("card", self.card.as_str()),
            ("title", self.title.as_str()),
            ("subtitle", self.subtitle.as_str()),
            ("bodyText", self.body_text.as_str()),
            ("accent", self.accent.as_str()),
            ("barTrack", self.bar_track.as_str()),
        ]
    }

    fn validate(&self, theme: &str) -> Result<()> {
        match self.colors().into_iter().find(|(_, v)| !is_hex_color(v)) {
            Some((field, value)) => Err(Error::InvalidColor {
                theme: theme.to_string(),
                field,
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
}

const BUILTIN: [(&str, [&str; 7]); 6] = [
    (
        "blue",
        ["#0d1117", "#161b22", "#c9d1d9", "#8b949e", "#e6edf3", "#58a6ff", "#30363d"],
    ),
    (
        "green",
        ["#0b140f", "#12211a", "#d1f2dc", "#7fa68d", "#e8f5ec", "#1db954", "#24382c"],
    ),
    (
        "warm",
        ["#1a1410", "#241b15", "#f4e1d2", "#b09078", "#fbeee4", "#ff8c42", "#3d2e24"],
    ),
    (
        "cool",
        ["#0f1419", "#16202a", "#cfe3f0", "#7f98ab", "#e6f1f8", "#4fd1c5", "#2a3945"],
    ),
    (
        "purple",
        ["#130f1c", "#1c1628", "#ddd2f4", "#9a8cb8", "#efe9fb", "#a371f7", "#342a4a"],
    ),
    (
        "pink",
        ["#1a0f15", "#26161f", "#f5d3e3", "#b6869d", "#fbe8f1", "#f778ba", "#452a38"],
    ),
];

/// Immutable lookup from theme name to palette, ordered by name.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Palette>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeRegistry {
    pub fn builtin() -> Self {
        ThemeRegistry {
            themes: BUILTIN
                .iter()
                .map(|(name, colors)| ((*name).to_string(), Palette::from_hex(*colors)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Theme> {
        self.themes.get(name).map(|palette| Theme {
            name: name.to_string(),
            palette: palette.clone(),
        })
    }

    pub fn resolve(&self, name: &str) -> Result<Theme> {
        self.get(name)
            .ok_or_else(|| Error::UnknownTheme(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn all(&self) -> Vec<Theme> {
        self.themes
            .iter()
            .map(|(name, palette)| Theme {
                name: name.clone(),
                palette: palette.clone(),
            })
            .collect()
    }

    // Custom palettes replace builtins with the same name. Nothing is merged if any
    // palette is invalid.
    pub fn extend_from_json(&mut self, json: &str) -> Result<()> {
        let custom: BTreeMap<String, Palette> = serde_json::from_str(json)?;
        for (name, palette) in &custom {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                return Err(Error::ConfigurationError(format!(
                    "theme name {name:?} may only contain letters, digits, '-' and '_'"
                )));
            }
            palette.validate(name)?;
        }
        debug!("Loaded {} custom themes", custom.len());
        self.themes.extend(custom);
        Ok(())
    }

    pub async fn load_file(&mut self, path: &Path) -> Result<()> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::ConfigurationError(format!("cannot read theme file {path:?}: {e}"))
        })?;
        self.extend_from_json(&json)
    }
}
