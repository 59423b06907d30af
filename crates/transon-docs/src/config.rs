//! Viewer configuration, read from a TOML file.
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::text::TextStyle;

pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 500;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Page heading.
    pub title: String,
    /// Caption under the heading; `_x_` underlines `x`.
    pub subtitle: String,
    pub tagline: String,
    /// Quiet window before a freshly opened playground scrolls into view.
    pub scroll_debounce_ms: u64,
    /// How payload values are written into the editors.
    pub text: TextStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Transon".to_owned(),
            subtitle: "_tran_sforms j_son_".to_owned(),
            tagline: "Homogenous JSON template engine".to_owned(),
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            text: TextStyle::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(error) => {
                log::info!(
                    "No viewer config at {} ({error}), using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }
}

/// One run of subtitle text, underlined or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionPart<'a> {
    pub text: &'a str,
    pub underlined: bool,
}

/// Split `_tran_sforms j_son_` into alternating plain and underlined runs.
pub fn caption_parts(caption: &str) -> Vec<CaptionPart<'_>> {
    caption
        .split('_')
        .enumerate()
        .filter(|(_, text)| !text.is_empty())
        .map(|(position, text)| CaptionPart {
            text,
            underlined: position % 2 == 1,
        })
        .collect()
}
