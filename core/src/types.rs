//! Wire types for the Places API.
//!
//! # Design
//! Every field the server may omit is an `Option` or a defaulted `Vec`, and
//! absent values are skipped again on serialization, so decoding a response
//! and encoding it back yields the same document. Nested records default
//! field by field, so one partial review or photo never fails the whole
//! response. Flags stay tri-state so an explicit `false` survives the round
//! trip. Empty lists are the one normalisation: `"types": []` re-encodes as
//! an absent key.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feature_type::FeatureType;

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_zero(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

/// A place's location, plus the recommended viewport when the server sends
/// one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// One component of a structured address, e.g. the locality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    pub types: Vec<String>,
    pub long_name: String,
    pub short_name: String,
}

/// Day of week (0 = Sunday) and `hhmm` time in the place's time zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayTime {
    pub day: u8,
    pub time: String,
}

/// An opening interval. Places open around the clock have an `open` of day
/// 0, time `0000`, and no `close`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    pub open: DayTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<DayTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub periods: Vec<Period>,
    /// Seven localized lines, one per weekday.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekday_text: Vec<String>,
}

/// Reference to an image usable with the Photo endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub photo_reference: String,
    pub height: u32,
    pub width: u32,
    pub html_attributions: Vec<String>,
}

/// Rating of a single attribute such as `food` or `service`, from 0 to 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectRating {
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<AspectRating>,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub rating: u8,
    pub text: String,
    /// Seconds since the Unix epoch.
    pub time: i64,
}

/// Alternative place ID, scoped to the application that created it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltId {
    pub place_id: String,
    pub scope: String,
}

/// Price level of a place. What each level costs varies by region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PriceLevel {
    Free = 0,
    Inexpensive = 1,
    Moderate = 2,
    Expensive = 3,
    VeryExpensive = 4,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("price level must be between 0 and 4, got {0}")]
pub struct InvalidPriceLevel(pub u8);

impl PriceLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PriceLevel {
    type Error = InvalidPriceLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PriceLevel::Free),
            1 => Ok(PriceLevel::Inexpensive),
            2 => Ok(PriceLevel::Moderate),
            3 => Ok(PriceLevel::Expensive),
            4 => Ok(PriceLevel::VeryExpensive),
            other => Err(InvalidPriceLevel(other)),
        }
    }
}

impl From<PriceLevel> for u8 {
    fn from(level: PriceLevel) -> Self {
        level.as_u8()
    }
}

/// Result ordering for Nearby search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankBy {
    /// Server default, which is prominence.
    #[default]
    Default,
    Prominence,
    Distance,
}

impl RankBy {
    /// Query value, `None` for the server default.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            RankBy::Default => None,
            RankBy::Prominence => Some("prominence"),
            RankBy::Distance => Some("distance"),
        }
    }
}

/// A place as returned by search and details requests.
///
/// Search results carry a subset of these fields; details carry most of
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDetails {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address_components: Vec<AddressComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub international_phone_number: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(alias = "permenantly_closed", skip_serializing_if = "Option::is_none")]
    pub permanently_closed: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub place_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alt_ids: Vec<AltId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<PriceLevel>,
    /// Aggregated user rating, 1.0 to 5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<FeatureType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Minutes offset from UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<AspectRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zagat_selected: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_level_decodes_from_integer() {
        let level: PriceLevel = serde_json::from_str("3").unwrap();
        assert_eq!(level, PriceLevel::Expensive);
        assert_eq!(serde_json::to_string(&level).unwrap(), "3");
    }

    #[test]
    fn price_level_rejects_out_of_range() {
        assert_eq!(PriceLevel::try_from(5), Err(InvalidPriceLevel(5)));
        assert!(serde_json::from_str::<PriceLevel>("7").is_err());
    }

    #[test]
    fn rank_by_default_has_no_param() {
        assert_eq!(RankBy::Default.as_param(), None);
        assert_eq!(RankBy::Distance.as_param(), Some("distance"));
    }

    #[test]
    fn misspelled_permanently_closed_is_accepted() {
        let place: PlaceDetails =
            serde_json::from_str(r#"{"place_id":"p","permenantly_closed":true}"#).unwrap();
        assert_eq!(place.permanently_closed, Some(true));
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["permanently_closed"], true);
    }

    #[test]
    fn empty_object_decodes_to_default_place() {
        let place: PlaceDetails = serde_json::from_str("{}").unwrap();
        assert_eq!(place, PlaceDetails::default());
        assert_eq!(serde_json::to_string(&place).unwrap(), "{}");
    }

    #[test]
    fn always_open_period_has_no_close() {
        let hours: OpeningHours = serde_json::from_str(
            r#"{"open_now":true,"periods":[{"open":{"day":0,"time":"0000"}}]}"#,
        )
        .unwrap();
        assert_eq!(hours.open_now, Some(true));
        assert!(hours.periods[0].close.is_none());
    }

    #[test]
    fn partial_review_and_photo_decode_to_zero_values() {
        let place: PlaceDetails = serde_json::from_str(
            r#"{
                "name": "X",
                "reviews": [{"author_name": "A", "rating": 5, "text": "ok"}],
                "photos": [{"photo_reference": "ref"}],
                "address_components": [{"long_name": "Paris"}],
                "opening_hours": {"periods": [{"open": {"time": "0900"}}]}
            }"#,
        )
        .unwrap();
        assert_eq!(place.reviews[0].author_name, "A");
        assert_eq!(place.reviews[0].time, 0);
        assert_eq!(place.photos[0].photo_reference, "ref");
        assert_eq!((place.photos[0].height, place.photos[0].width), (0, 0));
        assert_eq!(place.address_components[0].short_name, "");
        let hours = place.opening_hours.unwrap();
        assert_eq!(hours.periods[0].open.day, 0);
        assert_eq!(hours.periods[0].open.time, "0900");
    }

    #[test]
    fn explicit_false_flags_survive_round_trip() {
        let input = serde_json::json!({
            "name": "X",
            "place_id": "p",
            "permanently_closed": false,
            "zagat_selected": false
        });
        let place: PlaceDetails = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(place.permanently_closed, Some(false));
        assert_eq!(place.zagat_selected, Some(false));
        assert_eq!(serde_json::to_value(&place).unwrap(), input);
    }

    #[test]
    fn empty_types_list_is_dropped_on_encode() {
        let place: PlaceDetails = serde_json::from_str(r#"{"place_id":"p","types":[]}"#).unwrap();
        assert_eq!(serde_json::to_string(&place).unwrap(), r#"{"place_id":"p"}"#);
    }

    #[test]
    fn aspect_type_maps_to_kind() {
        let aspect: AspectRating = serde_json::from_str(r#"{"type":"food","rating":3}"#).unwrap();
        assert_eq!(aspect.kind, "food");
        assert_eq!(aspect.rating, 3);
    }
}
