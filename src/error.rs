//! Error types for the rescisão client.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the form workflow can run into, from configuration
//! loading to the remote calculation call.

use thiserror::Error;

/// Message shown when the calculation service cannot be reached or answers
/// with something other than a usable payload.
pub const GENERIC_COMMUNICATION_MESSAGE: &str = "Failed to communicate with the server";

/// The main error type for the rescisão client.
///
/// # Example
///
/// ```
/// use rescisao_client::error::RescisaoError;
///
/// let error = RescisaoError::ServerReported {
///     message: "Dados não fornecidos".to_string(),
/// };
/// assert_eq!(error.to_string(), "Calculation service reported: Dados não fornecidos");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RescisaoError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds unusable values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A raw form field could not be coerced into its typed value.
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput {
        /// The form field that failed coercion.
        field: String,
        /// A description of what was wrong with the value.
        message: String,
    },

    /// One or more validation rules rejected the form snapshot.
    #[error("Validation failed: {}", errors.join("; "))]
    Validation {
        /// Every rule violation, in evaluation order.
        errors: Vec<String>,
    },

    /// Transport failure or non-success HTTP status.
    #[error("Communication error: {message}")]
    Communication {
        /// HTTP status when a response was received.
        status: Option<u16>,
        /// Server-supplied message, or the generic communication message.
        message: String,
    },

    /// The service answered but signalled a logical failure.
    #[error("Calculation service reported: {message}")]
    ServerReported {
        /// The message supplied by the service.
        message: String,
    },

    /// The key-value store backing the cache failed.
    #[error("Storage error: {message}")]
    Store {
        /// A description of the storage failure.
        message: String,
    },

    /// A submission was attempted while another one is outstanding.
    #[error("A submission is already in progress")]
    SubmissionInProgress,
}

impl RescisaoError {
    /// Builds a communication error carrying the generic message.
    pub fn communication(status: Option<u16>) -> Self {
        Self::Communication {
            status,
            message: GENERIC_COMMUNICATION_MESSAGE.to_string(),
        }
    }

    /// The text surfaced to the user in a notice.
    ///
    /// Server messages are shown verbatim; the other variants fall back to
    /// their display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Communication { message, .. } | Self::ServerReported { message } => {
                message.clone()
            }
            Self::InvalidInput { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A type alias for Results that return RescisaoError.
pub type RescisaoResult<T> = Result<T, RescisaoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = RescisaoError::ConfigNotFound {
            path: "/missing/rescisao.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rescisao.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = RescisaoError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_validation_error_joins_messages() {
        let error = RescisaoError::Validation {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(error.to_string(), "Validation failed: first; second");
    }

    #[test]
    fn test_communication_helper_uses_generic_message() {
        let error = RescisaoError::communication(Some(502));
        assert_eq!(
            error,
            RescisaoError::Communication {
                status: Some(502),
                message: GENERIC_COMMUNICATION_MESSAGE.to_string(),
            }
        );
        assert_eq!(error.user_message(), GENERIC_COMMUNICATION_MESSAGE);
    }

    #[test]
    fn test_server_reported_user_message_is_verbatim() {
        let error = RescisaoError::ServerReported {
            message: "time data '' does not match format '%Y-%m-%d'".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "time data '' does not match format '%Y-%m-%d'"
        );
    }

    #[test]
    fn test_submission_in_progress_displays() {
        assert_eq!(
            RescisaoError::SubmissionInProgress.to_string(),
            "A submission is already in progress"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<RescisaoError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> RescisaoResult<()> {
            Err(RescisaoError::Store {
                message: "disk full".to_string(),
            })
        }

        fn propagates_error() -> RescisaoResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
