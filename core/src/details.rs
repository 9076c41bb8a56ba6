//! Place Details: the full record for a single place ID.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::query::non_empty;
use crate::service::{parse_envelope, Envelope, Service};
use crate::status::Status;
use crate::types::PlaceDetails;

const DETAILS_PATH: &str = "/details/json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub result: PlaceDetails,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub html_attributions: Vec<String>,
}

impl Envelope for DetailsResponse {
    fn status(&self) -> &Status {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Lookup of one place by ID.
#[derive(Debug)]
pub struct DetailsCall<'a, C> {
    service: &'a Service<C>,
    place_id: String,

    /// Extra response sections, e.g. `review_summary`.
    pub extensions: Option<String>,
    pub language: Option<String>,
}

impl<'a, C: HttpClient> DetailsCall<'a, C> {
    pub(crate) fn new(service: &'a Service<C>, place_id: &str) -> Self {
        Self {
            service,
            place_id: place_id.to_string(),
            extensions: None,
            language: None,
        }
    }

    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    pub fn build_request(&self) -> HttpRequest {
        let mut query = self.service.query();
        query
            .add_text("extensions", non_empty(&self.extensions))
            .add_text("language", non_empty(&self.language))
            .add("placeid", self.place_id.as_str());
        self.service.request(DETAILS_PATH, &query)
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<DetailsResponse> {
        parse_envelope(response)
    }

    pub fn send(&self) -> Result<DetailsResponse> {
        let request = self.build_request();
        debug!(endpoint = %request.endpoint, "sending place details");
        let response = self.service.execute(&request)?;
        self.parse_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlacesError;
    use crate::http::fake::FakeClient;

    const OK_BODY: &str = r#"{
        "html_attributions": [],
        "result": {
            "formatted_address": "5 Avenue Anatole France, 75007 Paris, France",
            "name": "Eiffel Tower",
            "place_id": "ChIJLU7jZClu5kcR4PcOOO6p3I0",
            "rating": 4.6,
            "website": "https://www.toureiffel.paris/"
        },
        "status": "OK"
    }"#;

    fn service_with(client: FakeClient) -> Service<FakeClient> {
        let mut service = Service::new(client, "testkey");
        service.set_base_url("http://localhost:3000");
        service
    }

    #[test]
    fn query_with_all_options() {
        let service = service_with(FakeClient::new());
        let mut call = service.details("ChIJLU7jZClu5kcR4PcOOO6p3I0");
        call.language = Some("en".to_string());
        call.extensions = Some("review_summary".to_string());
        let req = call.build_request();
        assert_eq!(
            req.url(),
            "http://localhost:3000/details/json?extensions=review_summary&key=testkey\
             &language=en&placeid=ChIJLU7jZClu5kcR4PcOOO6p3I0"
        );
    }

    #[test]
    fn query_with_place_id_only() {
        let service = service_with(FakeClient::new());
        let req = service.details("invalid_request").build_request();
        assert_eq!(req.query, "key=testkey&placeid=invalid_request");
    }

    #[test]
    fn ok_response_decodes_result() {
        let service = service_with(FakeClient::new().respond(200, OK_BODY));
        let resp = service.details("ChIJLU7jZClu5kcR4PcOOO6p3I0").send().unwrap();
        assert_eq!(resp.result.name, "Eiffel Tower");
        assert_eq!(resp.result.website.as_deref(), Some("https://www.toureiffel.paris/"));
        assert_eq!(resp.result.rating, Some(4.6));
    }

    #[test]
    fn invalid_request_status_is_api_error() {
        let body = r#"{"html_attributions":[],"status":"INVALID_REQUEST"}"#;
        let service = service_with(FakeClient::new().respond(200, body));
        let err = service.details("invalid_request").send().unwrap_err();
        assert!(err.is_invalid_request());
        assert_eq!(err.to_string(), "INVALID_REQUEST");
    }

    #[test]
    fn not_found_status_is_classified() {
        let body = r#"{"html_attributions":[],"status":"NOT_FOUND"}"#;
        let service = service_with(FakeClient::new().respond(200, body));
        assert!(service.details("gone").send().unwrap_err().is_not_found());
    }

    #[test]
    fn non_200_with_empty_body() {
        let service = service_with(FakeClient::new().respond(400, ""));
        let err = service.details("notok").send().unwrap_err();
        assert_eq!(err.to_string(), "bad resp 400: ");
    }

    #[test]
    fn string_body_is_decode_error() {
        let service = service_with(FakeClient::new().respond(200, r#""invalid json""#));
        let err = service.details("invalid_json").send().unwrap_err();
        assert!(matches!(err, PlacesError::Decode(_)));
    }

    #[test]
    fn partial_nested_records_keep_ok_result() {
        let service = service_with(FakeClient::new());
        let body = r#"{"status":"OK","result":{"name":"X",
            "reviews":[{"author_name":"A","rating":5,"text":"ok"}],
            "photos":[{"photo_reference":"ref"}]}}"#;
        let resp = service
            .details("p")
            .parse_response(HttpResponse {
                status: 200,
                body: body.to_string(),
            })
            .unwrap();
        assert_eq!(resp.result.name, "X");
        assert_eq!(resp.result.reviews[0].time, 0);
        assert_eq!(resp.result.photos[0].height, 0);
    }

    #[test]
    fn details_response_round_trips() {
        let body = include_str!("../../test-vectors/fixtures/details_full.json");
        let decoded: DetailsResponse = serde_json::from_str(body).unwrap();
        let original: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(serde_json::to_value(&decoded).unwrap(), original);
        assert_eq!(decoded.result.reviews.len(), 1);
        assert_eq!(decoded.result.alt_ids[0].scope, "APP");
    }
}
