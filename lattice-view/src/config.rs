//! Template Syntax Configuration
//!
//! The tokens the compiler looks for are not hard-coded. A [`Syntax`] holds
//! the directive prefix, the qualifier separator, the event shorthand and
//! the interpolation delimiters. The defaults match the familiar
//! `v-model` / `v-on:click` / `@click` / `{{ name }}` surface.
//!
//! Syntax can be loaded from JSON; missing fields fall back to defaults:
//!
//! ```rust,ignore
//! let syntax = Syntax::from_json(r#"{ "open": "[[", "close": "]]" }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tokens recognized by the template compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Syntax {
    /// Prefix marking an attribute as a directive (`v-`).
    pub directive_prefix: String,

    /// Separates a directive key from its qualifier (`:` in `v-on:click`).
    pub qualifier_separator: String,

    /// Shorthand prefix for event directives (`@` in `@click`).
    pub event_prefix: String,

    /// Opening interpolation delimiter.
    pub open: String,

    /// Closing interpolation delimiter.
    pub close: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            directive_prefix: "v-".to_string(),
            qualifier_separator: ":".to_string(),
            event_prefix: "@".to_string(),
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

impl Syntax {
    /// Parse syntax overrides from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
