//! Upstream status strings and the predicates that classify errors by them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlacesError;

/// The `status` field of every Places response.
///
/// Unrecognised strings are kept in `Other` so nothing the server sends is
/// lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
    Unknown,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::ZeroResults => "ZERO_RESULTS",
            Status::OverQueryLimit => "OVER_QUERY_LIMIT",
            Status::RequestDenied => "REQUEST_DENIED",
            Status::InvalidRequest => "INVALID_REQUEST",
            Status::NotFound => "NOT_FOUND",
            Status::Unknown => "UNKNOWN_ERROR",
            Status::Other(s) => s,
        }
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        match s {
            "OK" => Status::Ok,
            "ZERO_RESULTS" => Status::ZeroResults,
            "OVER_QUERY_LIMIT" => Status::OverQueryLimit,
            "REQUEST_DENIED" => Status::RequestDenied,
            "INVALID_REQUEST" => Status::InvalidRequest,
            "NOT_FOUND" => Status::NotFound,
            // Older responses used the short form.
            "UNKNOWN_ERROR" | "UNKNOWN" => Status::Unknown,
            other => Status::Other(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::from(s.as_str())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PlacesError {
    /// The upstream status carried by an `Api` error.
    pub fn status(&self) -> Option<&Status> {
        match self {
            PlacesError::Api { status, .. } => Some(status),
            _ => None,
        }
    }

    fn has_status(&self, expected: &Status) -> bool {
        self.status() == Some(expected)
    }

    /// Server-side failure; trying again may succeed.
    pub fn is_unknown(&self) -> bool {
        self.has_status(&Status::Unknown)
    }

    /// The search ran but matched nothing, e.g. a location in a remote area.
    pub fn is_zero_results(&self) -> bool {
        self.has_status(&Status::ZeroResults)
    }

    /// The key is over its quota.
    pub fn is_over_query_limit(&self) -> bool {
        self.has_status(&Status::OverQueryLimit)
    }

    /// Usually a missing or invalid key.
    pub fn is_request_denied(&self) -> bool {
        self.has_status(&Status::RequestDenied)
    }

    /// The query is malformed, typically a required parameter is missing.
    pub fn is_invalid_request(&self) -> bool {
        self.has_status(&Status::InvalidRequest)
    }

    /// The referenced place is not in the Places database.
    pub fn is_not_found(&self) -> bool {
        self.has_status(&Status::NotFound)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PlacesError::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PlacesError::Transport(_))
    }

    /// Transport failures and `UNKNOWN_ERROR` are the only outcomes worth
    /// repeating unchanged.
    pub fn is_retryable(&self) -> bool {
        self.is_transport() || self.is_unknown()
    }
}
