use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width of the ranking key derived from the fingerprint/candidate XOR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyWidth {
    /// Rank on the low-order 64 bits of the XOR (default).
    ///
    /// Bit-compatible with existing deployments of this selection scheme.
    #[default]
    Low64,
    /// Rank on the full-width XOR, treated as an unsigned big-endian integer.
    Full,
}

impl fmt::Display for KeyWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyWidth::Low64 => f.write_str("low64"),
            KeyWidth::Full => f.write_str("full"),
        }
    }
}

impl FromStr for KeyWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low64" => Ok(KeyWidth::Low64),
            "full" => Ok(KeyWidth::Full),
            other => Err(format!("unknown key width: {other}")),
        }
    }
}

/// Configuration knobs for a selection call.
///
/// ```
/// # use seedselect_core::{KeyWidth, SelectionOptions};
/// let opts: SelectionOptions = serde_json::from_str(r#"{"key_width":"full"}"#).unwrap();
/// assert_eq!(opts.key_width(), KeyWidth::Full);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionOptions {
    key_width: KeyWidth,
}

impl SelectionOptions {
    /// Returns the configured ranking key width.
    ///
    /// ```
    /// # use seedselect_core::{KeyWidth, SelectionOptions};
    /// assert_eq!(SelectionOptions::default().key_width(), KeyWidth::Low64);
    /// ```
    #[must_use]
    pub fn key_width(&self) -> KeyWidth {
        self.key_width
    }

    /// Sets the ranking key width.
    ///
    /// ```
    /// # use seedselect_core::{KeyWidth, SelectionOptions};
    /// let opts = SelectionOptions::default().with_key_width(KeyWidth::Full);
    /// assert_eq!(opts.key_width(), KeyWidth::Full);
    /// ```
    #[must_use]
    pub fn with_key_width(mut self, key_width: KeyWidth) -> Self {
        self.key_width = key_width;
        self
    }
}
