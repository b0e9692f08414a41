//! Error types for the galaxy generator.

use thiserror::Error;

/// Errors produced by parameter validation and generation.
#[derive(Debug, Error, PartialEq)]
pub enum GalaxyError {
    /// A parameter was outside its documented range (e.g. `branches = 0`).
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A parameter was NaN or infinite.
    #[error("parameter '{0}' must be finite")]
    NonFinite(String),

    /// A parameter existed in a JSON object but had the wrong type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl GalaxyError {
    /// Shorthand for [`GalaxyError::InvalidParameter`].
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        GalaxyError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_includes_name_and_reason() {
        let err = GalaxyError::invalid("branches", "must be at least 1");
        let msg = format!("{err}");
        assert!(msg.contains("branches"), "missing name in: {msg}");
        assert!(msg.contains("at least 1"), "missing reason in: {msg}");
    }

    #[test]
    fn non_finite_includes_name() {
        let err = GalaxyError::NonFinite("spin".into());
        let msg = format!("{err}");
        assert!(msg.contains("spin"), "missing name in: {msg}");
    }

    #[test]
    fn param_type_mismatch_includes_all_fields() {
        let err = GalaxyError::ParamTypeMismatch {
            name: "radius".into(),
            expected: "number".into(),
            got: "string".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("radius"), "missing param name in: {msg}");
        assert!(msg.contains("number"), "missing expected type in: {msg}");
        assert!(msg.contains("string"), "missing got type in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = GalaxyError::InvalidColor("bad hex".into());
        assert!(format!("{err}").contains("bad hex"));
    }

    #[test]
    fn io_includes_message() {
        let err = GalaxyError::Io("disk full".into());
        assert!(format!("{err}").contains("disk full"));
    }

    #[test]
    fn galaxy_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GalaxyError>();
    }

    #[test]
    fn galaxy_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<GalaxyError>();
    }
}
