use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const TEST_KEY: &str = "testkey";
pub const PAGE_SIZE: usize = 20;
/// Unclaimed page tokens are dropped this long after they become usable.
pub const TOKEN_TTL: Duration = Duration::from_secs(300);
pub const EIFFEL_TOWER_ID: &str = "ChIJLU7jZClu5kcR4PcOOO6p3I0";

/// Centre of the generated cafe cluster (San Francisco).
pub const SF: (f64, f64) = (37.7833, -122.4167);

type Params = HashMap<String, String>;

#[derive(Clone, Debug)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub types: Vec<String>,
    pub vicinity: String,
    pub formatted_address: String,
    pub rating: f64,
    pub price_level: Option<u8>,
    pub open_now: bool,
    pub website: Option<String>,
}

impl Place {
    fn summary(&self) -> Value {
        let mut value = json!({
            "place_id": self.place_id,
            "name": self.name,
            "geometry": { "location": { "lat": self.lat, "lng": self.lng } },
            "types": self.types,
            "vicinity": self.vicinity,
            "rating": self.rating,
            "opening_hours": { "open_now": self.open_now },
        });
        if let Some(level) = self.price_level {
            value["price_level"] = level.into();
        }
        value
    }

    fn radar(&self) -> Value {
        json!({
            "place_id": self.place_id,
            "geometry": { "location": { "lat": self.lat, "lng": self.lng } },
        })
    }

    fn detailed(&self) -> Value {
        let mut value = self.summary();
        value["formatted_address"] = self.formatted_address.clone().into();
        value["url"] = format!("https://maps.google.com/?q={}", self.place_id).into();
        if let Some(website) = &self.website {
            value["website"] = website.clone().into();
        }
        value
    }

    fn distance_to(&self, lat: f64, lng: f64) -> f64 {
        let dy = (self.lat - lat) * 110_540.0;
        let dx = (self.lng - lng) * 111_320.0 * lat.to_radians().cos();
        (dx * dx + dy * dy).sqrt()
    }

    fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .types
                .iter()
                .any(|t| needle.contains(&t.replace('_', " ")))
    }
}

/// 45 cafes and 3 bars around `SF`, plus the Eiffel Tower.
pub fn sample_places() -> Vec<Place> {
    let mut places: Vec<Place> = (0..45)
        .map(|i| Place {
            place_id: format!("cafe-{i:02}"),
            name: format!("Cafe {i:02}"),
            lat: SF.0 + f64::from(i) * 0.0005,
            lng: SF.1,
            types: vec!["cafe".into(), "food".into(), "establishment".into()],
            vicinity: format!("{} Market St, San Francisco", 100 + i),
            formatted_address: format!("{} Market St, San Francisco, CA, USA", 100 + i),
            rating: 3.5 + f64::from(i % 3) * 0.5,
            price_level: Some((i % 4 + 1) as u8),
            open_now: i % 2 == 0,
            website: None,
        })
        .collect();

    places.extend((0..3).map(|i| Place {
        place_id: format!("bar-{i}"),
        name: format!("Bar {i}"),
        lat: SF.0 - f64::from(i + 1) * 0.001,
        lng: SF.1 + 0.001,
        types: vec!["bar".into(), "night_club".into(), "establishment".into()],
        vicinity: format!("{} Valencia St, San Francisco", 10 + i),
        formatted_address: format!("{} Valencia St, San Francisco, CA, USA", 10 + i),
        rating: 4.0,
        price_level: None,
        open_now: true,
        website: None,
    }));

    places.push(Place {
        place_id: EIFFEL_TOWER_ID.into(),
        name: "Eiffel Tower".into(),
        lat: 48.8583701,
        lng: 2.2944813,
        types: vec!["premise".into(), "point_of_interest".into(), "establishment".into()],
        vicinity: "5 Avenue Anatole France, Paris".into(),
        formatted_address: "5 Avenue Anatole France, 75007 Paris, France".into(),
        rating: 4.6,
        price_level: Some(2),
        open_now: true,
        website: Some("https://www.toureiffel.paris/".into()),
    });

    places
}

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub api_key: String,
    /// How long a page token stays unusable after it is issued.
    pub token_delay: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_key: TEST_KEY.to_string(),
            token_delay: Duration::ZERO,
        }
    }
}

struct PendingPage {
    issued: Instant,
    results: Vec<Value>,
}

struct Inner {
    config: MockConfig,
    places: Vec<Place>,
    tokens: RwLock<HashMap<String, PendingPage>>,
}

type Db = Arc<Inner>;

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let db: Db = Arc::new(Inner {
        config,
        places: sample_places(),
        tokens: RwLock::new(HashMap::new()),
    });
    Router::new()
        .route("/nearbysearch/json", get(nearby_search))
        .route("/textsearch/json", get(text_search))
        .route("/radarsearch/json", get(radar_search))
        .route("/details/json", get(details))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn status_only(status: &str, message: Option<&str>) -> Response {
    let mut body = json!({ "html_attributions": [], "results": [], "status": status });
    if let Some(message) = message {
        body["error_message"] = message.into();
    }
    Json(body).into_response()
}

fn check_key(db: &Db, params: &Params) -> Result<(), Response> {
    match params.get("key") {
        Some(key) if *key == db.config.api_key => Ok(()),
        Some(_) => Err(status_only(
            "REQUEST_DENIED",
            Some("The provided API key is invalid."),
        )),
        None => Err(status_only(
            "REQUEST_DENIED",
            Some("You must use an API key to authenticate each request."),
        )),
    }
}

fn parse_location(params: &Params) -> Option<(f64, f64)> {
    let (lat, lng) = params.get("location")?.split_once(',')?;
    Some((lat.trim().parse().ok()?, lng.trim().parse().ok()?))
}

fn parse_radius(params: &Params) -> Option<f64> {
    params.get("radius")?.parse().ok()
}

fn type_filter(params: &Params) -> Vec<&str> {
    params
        .get("types")
        .map(|t| t.split('|').filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

fn passes_common_filters(place: &Place, params: &Params) -> bool {
    let types = type_filter(params);
    if !types.is_empty() && !place.types.iter().any(|t| types.contains(&t.as_str())) {
        return false;
    }
    if params.get("opennow").is_some_and(|v| v == "1") && !place.open_now {
        return false;
    }
    if let Some(min) = params.get("minprice").and_then(|v| v.parse::<u8>().ok()) {
        if place.price_level.is_some_and(|p| p < min) {
            return false;
        }
    }
    if let Some(max) = params.get("maxprice").and_then(|v| v.parse::<u8>().ok()) {
        if place.price_level.is_some_and(|p| p > max) {
            return false;
        }
    }
    true
}

/// Serve the first page and park the rest behind a fresh token.
async fn paged(db: &Db, mut results: Vec<Value>) -> Response {
    if results.is_empty() {
        return status_only("ZERO_RESULTS", None);
    }
    let rest = if results.len() > PAGE_SIZE {
        results.split_off(PAGE_SIZE)
    } else {
        Vec::new()
    };
    let mut body = json!({ "html_attributions": [], "results": results, "status": "OK" });
    if !rest.is_empty() {
        let token = Uuid::new_v4().simple().to_string();
        let expiry = db.config.token_delay + TOKEN_TTL;
        let mut tokens = db.tokens.write().await;
        tokens.retain(|_, page| page.issued.elapsed() < expiry);
        tokens.insert(
            token.clone(),
            PendingPage {
                issued: Instant::now(),
                results: rest,
            },
        );
        body["next_page_token"] = token.into();
    }
    Json(body).into_response()
}

async fn next_page(db: &Db, token: &str) -> Response {
    // A token is spent once its page is served; early use leaves it parked.
    let results = {
        let mut tokens = db.tokens.write().await;
        match tokens.get(token) {
            Some(page) if page.issued.elapsed() >= db.config.token_delay => {}
            _ => return status_only("INVALID_REQUEST", None),
        }
        match tokens.remove(token) {
            Some(page) => page.results,
            None => return status_only("INVALID_REQUEST", None),
        }
    };
    paged(db, results).await
}

async fn nearby_search(State(db): State<Db>, Query(params): Query<Params>) -> Response {
    if let Err(denied) = check_key(&db, &params) {
        return denied;
    }
    if let Some(token) = params.get("pagetoken") {
        return next_page(&db, token).await;
    }
    let Some((lat, lng)) = parse_location(&params) else {
        return status_only("INVALID_REQUEST", None);
    };
    let by_distance = params.get("rankby").is_some_and(|r| r == "distance");
    let radius = parse_radius(&params);
    if !by_distance && radius.is_none() {
        return status_only("INVALID_REQUEST", None);
    }

    let mut matches: Vec<&Place> = db
        .places
        .iter()
        .filter(|p| by_distance || radius.is_some_and(|r| p.distance_to(lat, lng) <= r))
        .filter(|p| params.get("keyword").map_or(true, |k| p.matches_text(k)))
        .filter(|p| {
            params
                .get("name")
                .map_or(true, |n| p.name.to_lowercase().contains(&n.to_lowercase()))
        })
        .filter(|p| passes_common_filters(p, &params))
        .collect();
    if by_distance {
        matches.sort_by(|a, b| a.distance_to(lat, lng).total_cmp(&b.distance_to(lat, lng)));
    }

    paged(&db, matches.into_iter().map(Place::summary).collect()).await
}

async fn text_search(State(db): State<Db>, Query(params): Query<Params>) -> Response {
    if let Err(denied) = check_key(&db, &params) {
        return denied;
    }
    if let Some(token) = params.get("pagetoken") {
        return next_page(&db, token).await;
    }
    let Some(query) = params.get("query").filter(|q| !q.is_empty()) else {
        return status_only("INVALID_REQUEST", None);
    };
    let area = parse_location(&params).zip(parse_radius(&params));

    let matches: Vec<Value> = db
        .places
        .iter()
        .filter(|p| p.matches_text(query))
        .filter(|p| area.map_or(true, |((lat, lng), r)| p.distance_to(lat, lng) <= r))
        .filter(|p| passes_common_filters(p, &params))
        .map(|p| {
            let mut value = p.summary();
            value["formatted_address"] = p.formatted_address.clone().into();
            value
        })
        .collect();

    paged(&db, matches).await
}

async fn radar_search(State(db): State<Db>, Query(params): Query<Params>) -> Response {
    if let Err(denied) = check_key(&db, &params) {
        return denied;
    }
    if let Some(token) = params.get("pagetoken") {
        return next_page(&db, token).await;
    }
    let (Some((lat, lng)), Some(radius)) = (parse_location(&params), parse_radius(&params)) else {
        return status_only("INVALID_REQUEST", None);
    };

    let matches: Vec<Value> = db
        .places
        .iter()
        .filter(|p| p.distance_to(lat, lng) <= radius)
        .filter(|p| params.get("keyword").map_or(true, |k| p.matches_text(k)))
        .filter(|p| passes_common_filters(p, &params))
        .map(Place::radar)
        .collect();

    if matches.is_empty() {
        return status_only("ZERO_RESULTS", None);
    }
    Json(json!({ "html_attributions": [], "results": matches, "status": "OK" })).into_response()
}

async fn details(State(db): State<Db>, Query(params): Query<Params>) -> Response {
    if let Err(denied) = check_key(&db, &params) {
        return denied;
    }
    let Some(place_id) = params.get("placeid") else {
        return status_only("INVALID_REQUEST", None);
    };
    match place_id.as_str() {
        "invalid_request" => return status_only("INVALID_REQUEST", None),
        "invalid_json" => return (StatusCode::OK, "\"invalid json\"").into_response(),
        "notok" => return (StatusCode::BAD_REQUEST, "").into_response(),
        _ => {}
    }
    match db.places.iter().find(|p| p.place_id == *place_id) {
        Some(place) => Json(json!({
            "html_attributions": [],
            "result": place.detailed(),
            "status": "OK",
        }))
        .into_response(),
        None => Json(json!({ "html_attributions": [], "status": "NOT_FOUND" })).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sample_data_has_unique_ids() {
        let places = sample_places();
        let mut ids: Vec<_> = places.iter().map(|p| p.place_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), places.len());
    }

    #[test]
    fn location_parses_lat_lng_pair() {
        let p = params(&[("location", "37.783300,-122.416700")]);
        assert_eq!(parse_location(&p), Some((37.7833, -122.4167)));
        assert_eq!(parse_location(&params(&[("location", "nope")])), None);
    }

    #[test]
    fn distance_is_roughly_meters() {
        let place = &sample_places()[1];
        let d = place.distance_to(SF.0, SF.1);
        assert!((50.0..60.0).contains(&d), "got {d}");
    }

    #[test]
    fn text_match_uses_name_and_types() {
        let cafe = &sample_places()[0];
        assert!(cafe.matches_text("Cafe 00"));
        assert!(cafe.matches_text("cafes in san francisco"));
        assert!(!cafe.matches_text("museum"));
    }

    #[test]
    fn type_filter_splits_on_pipe() {
        let p = params(&[("types", "bar|cafe")]);
        assert_eq!(type_filter(&p), ["bar", "cafe"]);
    }

    #[test]
    fn summary_omits_missing_price_level() {
        let bar = sample_places()
            .into_iter()
            .find(|p| p.place_id == "bar-0")
            .unwrap();
        assert!(bar.summary().get("price_level").is_none());
    }
}
