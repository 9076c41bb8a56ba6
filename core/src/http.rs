//! HTTP transport seam for the Places client.
//!
//! # Design
//! Requests and responses are plain data. Call builders produce an
//! `HttpRequest`, an `HttpClient` turns it into an `HttpResponse`, and the
//! call parses that response. The client is injected by the caller, so
//! timeouts, TLS and proxies are configured outside this crate. Hosts that
//! want to do the I/O themselves can skip `HttpClient` entirely and use the
//! `build_request` / `parse_response` pair on each call.

use std::error::Error;

/// Boxed error produced by an `HttpClient` when the round-trip itself fails
/// (connection refused, DNS, TLS, timeout).
pub type TransportError = Box<dyn Error + Send + Sync + 'static>;

/// A GET request described as plain data.
///
/// `query` is already URL-encoded and carries the API key, so only
/// `endpoint` is safe to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub endpoint: String,
    pub query: String,
}

impl HttpRequest {
    /// Full request URL, `endpoint?query`.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.endpoint.clone();
        }
        format!("{}?{}", self.endpoint, self.query)
    }

    /// Decoded query pairs, in encoded order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .into_owned()
            .collect()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes a GET round-trip.
///
/// Implementations must return non-2xx responses as `Ok` so the caller can
/// inspect the status and body; `Err` is reserved for transport failures.
pub trait HttpClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl HttpClient for ureq::Agent {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        match self.get(&request.url()).call() {
            Ok(mut response) => {
                let status = response.status().as_u16();
                let body = response.body_mut().read_to_string()?;
                Ok(HttpResponse { status, body })
            }
            // Agents built with `http_status_as_error(true)` drop the body.
            Err(ureq::Error::StatusCode(status)) => Ok(HttpResponse {
                status,
                body: String::new(),
            }),
            Err(err) => Err(Box::new(err)),
        }
    }
}

/// A `ureq` agent that reports 4xx/5xx responses as data rather than `Err`.
pub fn default_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}
