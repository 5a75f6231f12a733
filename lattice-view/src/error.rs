//! Error types for the view layer.
//!
//! Binding failures are rare: most misconfigurations (an undeclared data
//! key, for instance) degrade to an empty value instead of an error. The
//! variants below cover the cases that cannot be expressed as a value.

use thiserror::Error;

/// Errors raised while compiling templates, mounting an app, or running an
/// event listener.
#[derive(Debug, Error)]
pub enum ViewError {
    /// An attribute used the directive prefix with a key that is not
    /// `model`, `text` or `on`.
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    /// An event directive (`v-on`) did not name an event.
    #[error("directive `{0}` requires an event name")]
    MissingEventName(String),

    /// An event listener referenced a method that was never registered.
    ///
    /// Raised when the listener fires, not when it is compiled.
    #[error("method `{0}` is not defined")]
    UnknownMethod(String),

    /// The mount selector did not match any node.
    #[error("no node matches mount selector `{0}`")]
    RootNotFound(String),

    /// A property that was not a top-level data key at mount time.
    #[error("`{0}` is not a data property of this app")]
    UnknownProperty(String),

    /// A user method failed.
    #[error("method `{method}` failed: {message}")]
    Method { method: String, message: String },

    /// Configuration or data could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = ViewError::UnknownMethod("save".into());
        assert_eq!(err.to_string(), "method `save` is not defined");

        let err = ViewError::MissingEventName("v-on".into());
        assert_eq!(err.to_string(), "directive `v-on` requires an event name");
    }

    #[test]
    fn json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ViewError = parse.unwrap_err().into();
        assert!(matches!(err, ViewError::Json(_)));
    }
}
