//! Nearby, Text and Radar search.
//!
//! # Design
//! Each call is a parameter bag borrowing its `Service`. Positional
//! parameters are fixed by the factory; everything else is a public field
//! the caller sets before `send`. `send` is `validate` → `build_request` →
//! HTTP → `parse_response`, and the two halves are public so a host can run
//! the I/O itself. A call may be sent again after setting `page_token`,
//! which is how `paginate::collect_all` walks result pages.
//!
//! With a page token set, the server reuses the original search parameters
//! and ignores everything else, so the query carries only the token and the
//! positional parameters.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::feature_type::FeatureType;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::query::non_empty;
use crate::service::{parse_envelope, Envelope, Service};
use crate::status::Status;
use crate::types::{LatLng, PlaceDetails, PriceLevel, RankBy};

/// Most search endpoints cap the radius at 50 km.
pub const MAXIMUM_RADIUS: f64 = 50_000.0;

const NEARBY_PATH: &str = "/nearbysearch/json";
const TEXT_SEARCH_PATH: &str = "/textsearch/json";
const RADAR_SEARCH_PATH: &str = "/radarsearch/json";

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceDetails>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Attributions that must be shown alongside the results.
    #[serde(default)]
    pub html_attributions: Vec<String>,
    /// Continuation token for the next 20 results. It becomes valid a short
    /// while after it is issued. An empty token decodes as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub next_page_token: Option<String>,
}

impl Envelope for SearchResponse {
    fn status(&self) -> &Status {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.filter(|t| !t.is_empty()))
}

/// Decode a search response and apply the shared error policy.
pub fn parse_search_response(response: HttpResponse) -> Result<SearchResponse> {
    parse_envelope(response)
}

// ---------------------------------------------------------------------------
// Nearby
// ---------------------------------------------------------------------------

/// Places within a specified area, optionally refined by keyword or type.
#[derive(Debug)]
pub struct NearbyCall<'a, C> {
    service: &'a Service<C>,
    location: LatLng,

    /// Matched against everything Google has indexed for a place.
    pub keyword: Option<String>,
    pub language: Option<String>,
    pub min_price: Option<PriceLevel>,
    pub max_price: Option<PriceLevel>,
    /// Matched against all names of a place, not only the listed one.
    pub name: Option<String>,
    pub open_now: bool,
    /// Meters. Required unless ranking by distance, where it is not sent.
    pub radius: f64,
    pub rank_by: RankBy,
    pub types: Vec<FeatureType>,
    pub zagat_selected: bool,
    pub page_token: Option<String>,
}

impl<'a, C: HttpClient> NearbyCall<'a, C> {
    pub(crate) fn new(service: &'a Service<C>, location: LatLng) -> Self {
        Self {
            service,
            location,
            keyword: None,
            language: None,
            min_price: None,
            max_price: None,
            name: None,
            open_now: false,
            radius: 0.0,
            rank_by: RankBy::Default,
            types: Vec::new(),
            zagat_selected: false,
            page_token: None,
        }
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if non_empty(&self.page_token).is_some() {
            return Ok(());
        }
        match self.rank_by {
            RankBy::Default | RankBy::Prominence => {
                if self.radius == 0.0 {
                    return Err(ValidationError::InvalidByProminence);
                }
            }
            RankBy::Distance => {
                if self.types.is_empty()
                    && non_empty(&self.name).is_none()
                    && non_empty(&self.keyword).is_none()
                {
                    return Err(ValidationError::InvalidByDistance);
                }
            }
        }
        Ok(())
    }

    pub fn build_request(&self) -> Result<HttpRequest> {
        self.validate()?;

        let mut query = self.service.query();
        query.add_location(self.location);

        if let Some(token) = non_empty(&self.page_token) {
            query.add("pagetoken", token);
            return Ok(self.service.request(NEARBY_PATH, &query));
        }

        query
            .add_text("keyword", self.keyword.as_deref())
            .add_text("language", self.language.as_deref())
            .add_price("minprice", self.min_price)
            .add_price("maxprice", self.max_price)
            .add_text("name", self.name.as_deref())
            .add_flag("opennow", self.open_now, "1")
            .add_text("rankby", self.rank_by.as_param())
            .add_flag("zagatselected", self.zagat_selected, "")
            .add_types(&self.types);
        if self.rank_by != RankBy::Distance && self.radius > 0.0 {
            query.add_radius(self.radius);
        }

        Ok(self.service.request(NEARBY_PATH, &query))
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<SearchResponse> {
        parse_search_response(response)
    }

    pub fn send(&self) -> Result<SearchResponse> {
        let request = self.build_request()?;
        debug!(
            endpoint = %request.endpoint,
            paged = self.page_token.is_some(),
            "sending nearby search"
        );
        let response = self.service.execute(&request)?;
        self.parse_response(response)
    }
}

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Places matching a text query, optionally biased towards a location.
#[derive(Debug)]
pub struct TextSearchCall<'a, C> {
    service: &'a Service<C>,
    query: String,

    /// Bias results towards this point. A zero coordinate counts as unset.
    pub location: Option<LatLng>,
    pub language: Option<String>,
    pub min_price: Option<PriceLevel>,
    pub max_price: Option<PriceLevel>,
    pub open_now: bool,
    /// Meters, at most `MAXIMUM_RADIUS`. Required with a location.
    pub radius: f64,
    pub types: Vec<FeatureType>,
    pub zagat_selected: bool,
    pub page_token: Option<String>,
}

impl<'a, C: HttpClient> TextSearchCall<'a, C> {
    pub(crate) fn new(service: &'a Service<C>, query: &str) -> Self {
        Self {
            service,
            query: query.to_string(),
            location: None,
            language: None,
            min_price: None,
            max_price: None,
            open_now: false,
            radius: 0.0,
            types: Vec::new(),
            zagat_selected: false,
            page_token: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn effective_location(&self) -> Option<LatLng> {
        self.location.filter(|l| !l.is_zero())
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if non_empty(&self.page_token).is_some() {
            return Ok(());
        }
        if self.query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        if self.effective_location().is_some() && self.radius == 0.0 {
            return Err(ValidationError::MissingRadius);
        }
        if self.radius > MAXIMUM_RADIUS {
            return Err(ValidationError::RadiusTooLarge);
        }
        Ok(())
    }

    pub fn build_request(&self) -> Result<HttpRequest> {
        self.validate()?;

        let mut query = self.service.query();

        if let Some(token) = non_empty(&self.page_token) {
            query.add("pagetoken", token);
            return Ok(self.service.request(TEXT_SEARCH_PATH, &query));
        }

        if let Some(location) = self.effective_location() {
            query.add_location(location);
        }
        query
            .add_types(&self.types)
            .add_text("language", self.language.as_deref())
            .add_text("query", Some(self.query.as_str()))
            .add_price("minprice", self.min_price)
            .add_price("maxprice", self.max_price)
            .add_flag("opennow", self.open_now, "1")
            .add_flag("zagatselected", self.zagat_selected, "");
        if self.radius > 0.0 {
            query.add_radius(self.radius);
        }

        Ok(self.service.request(TEXT_SEARCH_PATH, &query))
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<SearchResponse> {
        parse_search_response(response)
    }

    pub fn send(&self) -> Result<SearchResponse> {
        let request = self.build_request()?;
        debug!(
            endpoint = %request.endpoint,
            paged = self.page_token.is_some(),
            "sending text search"
        );
        let response = self.service.execute(&request)?;
        self.parse_response(response)
    }
}

// ---------------------------------------------------------------------------
// Radar search
// ---------------------------------------------------------------------------

/// Up to 200 places around a point, with less detail than the other
/// searches. The server enforces its own parameter rules.
#[derive(Debug)]
pub struct RadarSearchCall<'a, C> {
    service: &'a Service<C>,
    location: LatLng,
    radius: f64,

    pub keyword: Option<String>,
    pub min_price: Option<PriceLevel>,
    pub max_price: Option<PriceLevel>,
    pub open_now: bool,
    pub types: Vec<FeatureType>,
    pub zagat_selected: bool,
    pub page_token: Option<String>,
}

impl<'a, C: HttpClient> RadarSearchCall<'a, C> {
    pub(crate) fn new(service: &'a Service<C>, radius: f64, location: LatLng) -> Self {
        Self {
            service,
            location,
            radius,
            keyword: None,
            min_price: None,
            max_price: None,
            open_now: false,
            types: Vec::new(),
            zagat_selected: false,
            page_token: None,
        }
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn build_request(&self) -> Result<HttpRequest> {
        let mut query = self.service.query();
        query.add_location(self.location).add_radius(self.radius);

        if let Some(token) = non_empty(&self.page_token) {
            query.add("pagetoken", token);
            return Ok(self.service.request(RADAR_SEARCH_PATH, &query));
        }

        query
            .add_text("keyword", self.keyword.as_deref())
            .add_price("minprice", self.min_price)
            .add_price("maxprice", self.max_price)
            .add_flag("opennow", self.open_now, "1")
            .add_types(&self.types)
            .add_flag("zagatselected", self.zagat_selected, "");

        Ok(self.service.request(RADAR_SEARCH_PATH, &query))
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<SearchResponse> {
        parse_search_response(response)
    }

    pub fn send(&self) -> Result<SearchResponse> {
        let request = self.build_request()?;
        debug!(
            endpoint = %request.endpoint,
            paged = self.page_token.is_some(),
            "sending radar search"
        );
        let response = self.service.execute(&request)?;
        self.parse_response(response)
    }
}
