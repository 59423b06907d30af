//! Canonical textual form of payload values shown in the editors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum TextStyle {
    /// `{"a":1}`
    #[default]
    Compact,
    /// One member per line, indented by `indent` spaces.
    Pretty {
        #[serde(default = "default_indent")]
        indent: usize,
    },
}

fn default_indent() -> usize {
    2
}

impl TextStyle {
    pub fn pretty() -> Self {
        Self::Pretty {
            indent: default_indent(),
        }
    }

    pub fn to_text(&self, value: &Value) -> Result<String, serde_json::Error> {
        match self {
            Self::Compact => write_with(value, CompactFormatter),
            Self::Pretty { indent } => {
                let indent = " ".repeat(*indent);
                write_with(value, PrettyFormatter::with_indent(indent.as_bytes()))
            }
        }
    }
}

fn write_with<F: Formatter>(value: &Value, formatter: F) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
