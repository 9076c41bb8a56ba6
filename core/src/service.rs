//! Entry point of the client: configuration plus call factories.
//!
//! # Design
//! `Service` holds the injected HTTP client, the API key and the base URL,
//! and never changes after construction apart from `set_base_url`. Each
//! factory returns a call that borrows the service, so one service can back
//! any number of calls. Response handling shared by all endpoints lives at
//! the bottom of this file.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::details::DetailsCall;
use crate::error::{PlacesError, Result};
use crate::http::{default_agent, HttpClient, HttpRequest, HttpResponse};
use crate::query::Query;
use crate::search::{NearbyCall, RadarSearchCall, TextSearchCall};
use crate::status::Status;
use crate::types::LatLng;

/// Public Google Places API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Client for the Places API.
#[derive(Clone)]
pub struct Service<C = ureq::Agent> {
    client: C,
    key: String,
    base_url: String,
}

impl Service<ureq::Agent> {
    /// Service backed by `http::default_agent()`.
    pub fn with_default_client(key: &str) -> Self {
        Self::new(default_agent(), key)
    }
}

impl<C: HttpClient> Service<C> {
    pub fn new(client: C, key: &str) -> Self {
        Self {
            client,
            key: key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the service somewhere else, e.g. a local stand-in.
    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Places within an area around `lat`,`lng`.
    pub fn nearby(&self, lat: f64, lng: f64) -> NearbyCall<'_, C> {
        NearbyCall::new(self, LatLng::new(lat, lng))
    }

    /// Places matching a free-text query such as "pizza in New York".
    pub fn text_search(&self, query: &str) -> TextSearchCall<'_, C> {
        TextSearchCall::new(self, query)
    }

    /// Up to 200 places within `radius` meters, with less detail per result.
    pub fn radar_search(&self, radius: f64, lat: f64, lng: f64) -> RadarSearchCall<'_, C> {
        RadarSearchCall::new(self, radius, LatLng::new(lat, lng))
    }

    /// Full record for one place.
    pub fn details(&self, place_id: &str) -> DetailsCall<'_, C> {
        DetailsCall::new(self, place_id)
    }

    pub(crate) fn query(&self) -> Query {
        Query::new(&self.key)
    }

    pub(crate) fn request(&self, path: &str, query: &Query) -> HttpRequest {
        HttpRequest {
            endpoint: format!("{}{path}", self.base_url),
            query: query.encode(),
        }
    }

    pub(crate) fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.client.execute(request).map_err(PlacesError::Transport)
    }
}

impl<C> fmt::Debug for Service<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// A decoded response that carries the upstream `status`.
pub(crate) trait Envelope: DeserializeOwned {
    fn status(&self) -> &Status;
    fn error_message(&self) -> Option<&str>;
}

/// Apply the shared error policy: non-200, then JSON, then `status`.
pub(crate) fn parse_envelope<T: Envelope>(response: HttpResponse) -> Result<T> {
    check_status(&response)?;
    let data: T = serde_json::from_str(&response.body)?;
    if *data.status() != Status::Ok {
        warn!(status = %data.status(), "places request returned non-OK status");
        return Err(PlacesError::Api {
            status: data.status().clone(),
            message: data.error_message().map(str::to_string),
        });
    }
    Ok(data)
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(status = response.status, "places request failed with HTTP error");
    Err(PlacesError::BadResponse {
        status: response.status,
        body: response.body.clone(),
    })
}
