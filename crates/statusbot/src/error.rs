//! Error types for lookups and commands.

use thiserror::Error;

/// Errors raised by the monitoring and wireless collaborators.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The site, sensor or client does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Network failure, timeout or undecodable response
    #[error("Request to {service} failed: {source}")]
    Request {
        /// Service that was called
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with an error status
    #[error("{service} returned {status}: {body}")]
    Status {
        /// Service that was called
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, for the logs
        body: String,
    },
}

impl LookupError {
    pub(crate) fn request(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Request { service, source }
    }
}

/// Errors that end a command with a single error message.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Bad argument shape; no lookup was attempted.
    #[error("{0}")]
    Validation(String),

    /// A collaborator lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Anything else
    #[error("An unknown error occurred: {0}")]
    Unexpected(String),
}

impl CommandError {
    /// Text shown to the user in Slack.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Lookup(LookupError::NotFound(message)) => {
                message.clone()
            }
            Self::Lookup(LookupError::Request { service, source }) if source.is_timeout() => {
                format!("The request to {service} took too long")
            }
            Self::Lookup(LookupError::Request { service, source }) if source.is_connect() => {
                format!("A connection could not be established to {service}")
            }
            Self::Lookup(LookupError::Request { service, .. }) => {
                format!("An unexpected request error occurred while contacting {service}")
            }
            Self::Lookup(LookupError::Status {
                service, status, ..
            }) => {
                format!("{service} returned an HTTP error ({status})")
            }
            Self::Unexpected(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let error = CommandError::Validation("Invalid site ID - Must be a valid 3-digit ID".into());
        assert_eq!(
            error.user_message(),
            "Invalid site ID - Must be a valid 3-digit ID"
        );
    }

    #[test]
    fn test_not_found_message_is_shown_verbatim() {
        let error: CommandError =
            LookupError::NotFound("Probe does not exist with site ID: 123".into()).into();
        assert_eq!(error.user_message(), "Probe does not exist with site ID: 123");
    }

    #[test]
    fn test_status_error_hides_body() {
        let error: CommandError = LookupError::Status {
            service: "PRTG",
            status: 500,
            body: "stack trace".into(),
        }
        .into();
        assert_eq!(error.user_message(), "PRTG returned an HTTP error (500)");
        assert!(error.to_string().contains("stack trace"));
    }

    #[test]
    fn test_unexpected_message() {
        let error = CommandError::Unexpected("task panicked".into());
        assert_eq!(error.user_message(), "An unknown error occurred: task panicked");
    }
}
