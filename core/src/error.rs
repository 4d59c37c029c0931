//! Error types for the Todoist API client.
//!
//! # Design
//! Transport problems carry the remote method name so a failed call can be
//! traced back to the operation that issued it. Application-level failures
//! reported through sentinel strings land in `Service` once they have been
//! recognised, or in `UnknownService` with the raw string when the operation
//! treats every string reply as an error.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `TodoistClient` and `Accounts` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The exchange could not be completed, or completed with a non-2xx status.
    #[error("Todoist API request for {method} failed: {reason}")]
    Transport { method: String, reason: String },

    /// Same as `Transport`, for calls made without a user token.
    #[error("Todoist service unavailable for {method}: {reason}")]
    ServiceUnavailable { method: String, reason: String },

    #[error("malformed JSON in {method} response: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Todoist rejected the request: {0}")]
    Service(ServiceErrorKind),

    #[error("Todoist returned an unknown error: {0}")]
    UnknownService(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid API token")]
    MissingToken,

    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Application errors the service reports through sentinel strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceErrorKind {
    #[error("email address is already registered")]
    AlreadyRegistered,

    #[error("password is too short")]
    PasswordTooShort,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid timezone")]
    InvalidTimezone,

    #[error("invalid full name")]
    InvalidFullName,

    #[error("project not found")]
    ProjectNotFound,

    #[error("item not found")]
    ItemNotFound,

    #[error("date string could not be parsed")]
    WrongDateSyntax,
}

impl ApiError {
    /// The remote method involved, when the error is tied to one.
    pub fn method(&self) -> Option<&str> {
        match self {
            ApiError::Transport { method, .. }
            | ApiError::ServiceUnavailable { method, .. }
            | ApiError::Decode { method, .. } => Some(method),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_names_the_method() {
        let err = ApiError::Transport {
            method: "getProjects".to_string(),
            reason: "HTTP 500: boom".to_string(),
        };
        assert_eq!(err.method(), Some("getProjects"));
        assert_eq!(
            err.to_string(),
            "Todoist API request for getProjects failed: HTTP 500: boom"
        );
    }

    #[test]
    fn auth_error_converts_into_api_error() {
        let err: ApiError = AuthError::MissingToken.into();
        assert!(matches!(err, ApiError::Auth(AuthError::MissingToken)));
        assert!(err.method().is_none());
    }
}
