//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: generation error (parameter out of range, non-finite value)
//! - 11: I/O error (recipe read, export write)
//! - 12: input error (bad color flag, bad JSON params, bad recipe file)
//! - 13: serialization error

use galaxy_core::GalaxyError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A generation-level error (invalid or non-finite parameter).
    Galaxy(GalaxyError),
    /// An I/O error (reading a recipe, writing an export).
    Io(String),
    /// A user input error (unparseable color, JSON or recipe).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Galaxy(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Galaxy(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<GalaxyError> for CliError {
    fn from(e: GalaxyError) -> Self {
        match e {
            GalaxyError::Io(msg) => CliError::Io(msg),
            GalaxyError::InvalidColor(msg) => CliError::Input(format!("invalid color: {msg}")),
            GalaxyError::ParamTypeMismatch { .. } => CliError::Input(e.to_string()),
            other => CliError::Galaxy(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn galaxy_error_exit_code_is_10() {
        let err = CliError::Galaxy(GalaxyError::invalid("branches", "must be at least 1"));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad color".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_galaxy_error_io_routes_to_cli_io() {
        let cli_err = CliError::from(GalaxyError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_galaxy_error_color_routes_to_cli_input() {
        let cli_err = CliError::from(GalaxyError::InvalidColor("#12".into()));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("#12"));
    }

    #[test]
    fn from_galaxy_error_type_mismatch_routes_to_cli_input() {
        let cli_err = CliError::from(GalaxyError::ParamTypeMismatch {
            name: "spin".into(),
            expected: "number".into(),
            got: "string".into(),
        });
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("spin"));
    }

    #[test]
    fn from_galaxy_error_invalid_parameter_routes_to_cli_galaxy() {
        let cli_err = CliError::from(GalaxyError::invalid("count", "must be non-negative"));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("count"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
