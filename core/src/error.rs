//! Error types for the Places client.
//!
//! # Design
//! One closed enum covers every way a call can fail, split by where the
//! failure happened: before the request (`Validation`), on the wire
//! (`Transport`), in the HTTP envelope (`BadResponse`), in the JSON
//! (`Decode`), or in the upstream `status` field (`Api`). Callers compare by
//! variant, and the status predicates in `status.rs` sit on top of `Api`.

use thiserror::Error;

use crate::http::TransportError;
use crate::status::Status;

/// Errors returned by every `send` / `parse_response` in this crate.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The HTTP client failed to complete the round-trip.
    #[error("{0}")]
    Transport(#[source] TransportError),

    /// The server answered with something other than 200.
    #[error("bad resp {status}: {body}")]
    BadResponse { status: u16, body: String },

    /// The body was not a valid response document.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Well-formed response whose `status` was not `OK`.
    #[error("{}{}", .status, .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api {
        status: Status,
        message: Option<String>,
    },

    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Parameter combinations the Places API would reject.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("radius must be specified when RankByProminence is used")]
    InvalidByProminence,

    #[error("when RankByDistance is specified, one or more of keyword, name, or types is required")]
    InvalidByDistance,

    #[error("the search parameter cannot be empty")]
    EmptyQuery,

    #[error("no radius is specified. The radius is required when specifying a location")]
    MissingRadius,

    #[error("radius is too large, a maximum of 50 000 meters is allowed")]
    RadiusTooLarge,
}

pub type Result<T> = std::result::Result<T, PlacesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_without_message_displays_status_only() {
        let err = PlacesError::Api {
            status: Status::ZeroResults,
            message: None,
        };
        assert_eq!(err.to_string(), "ZERO_RESULTS");
    }

    #[test]
    fn api_error_with_message_appends_it() {
        let err = PlacesError::Api {
            status: Status::RequestDenied,
            message: Some("The provided API key is invalid.".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "REQUEST_DENIED: The provided API key is invalid."
        );
    }

    #[test]
    fn bad_response_includes_code_and_body() {
        let err = PlacesError::BadResponse {
            status: 503,
            body: "upstream unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "bad resp 503: upstream unavailable");
    }

    #[test]
    fn transport_error_keeps_its_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = PlacesError::Transport(Box::new(io));
        assert_eq!(err.to_string(), "connection refused");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn validation_error_converts_and_keeps_message() {
        let err: PlacesError = ValidationError::EmptyQuery.into();
        assert!(matches!(err, PlacesError::Validation(ValidationError::EmptyQuery)));
        assert_eq!(err.to_string(), "the search parameter cannot be empty");
    }
}
