//! Synchronous client for the Google Places API.
//!
//! # Overview
//! A `Service` holds the HTTP client, API key and base URL and hands out one
//! call builder per endpoint: Nearby, Text and Radar search, and Details.
//! A call validates its parameters, encodes a query string, issues a GET,
//! and decodes the JSON response, turning any non-`OK` upstream status into
//! a `PlacesError`.
//!
//! # Design
//! - The HTTP client is injected through the `HttpClient` trait; `ureq` is
//!   the default. Calls also expose `build_request` / `parse_response` so a
//!   host can perform the round-trip itself.
//! - `ZERO_RESULTS` is an error, identified with
//!   `PlacesError::is_zero_results`, not an empty success.
//! - Pagination is a separate driver (`paginate::collect_all`) on top of the
//!   search calls.

pub mod details;
pub mod error;
pub mod feature_type;
pub mod http;
pub mod paginate;
mod query;
pub mod search;
pub mod service;
pub mod status;
pub mod types;

pub use details::{DetailsCall, DetailsResponse};
pub use error::{PlacesError, Result, ValidationError};
pub use feature_type::FeatureType;
pub use http::{default_agent, HttpClient, HttpRequest, HttpResponse, TransportError};
pub use paginate::{collect_all, Paginate, PaginationOptions, PAGE_TOKEN_DELAY};
pub use search::{
    parse_search_response, NearbyCall, RadarSearchCall, SearchResponse, TextSearchCall,
    MAXIMUM_RADIUS,
};
pub use service::{Service, DEFAULT_BASE_URL};
pub use status::Status;
pub use types::{
    AddressComponent, AltId, AspectRating, DayTime, Geometry, LatLng, OpeningHours, Period, Photo,
    PlaceDetails, PriceLevel, RankBy, Review, Viewport,
};
