use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use places_core::PaginationOptions;

#[derive(Parser, Debug, Clone)]
#[command(name = "places", about = "Search the Google Places web service")]
pub struct Config {
    /// Places API key.
    #[arg(long, env = "PLACES_API_KEY", hide_env_values = true)]
    pub key: String,

    /// Override the API root, e.g. a local mock server.
    #[arg(long, env = "PLACES_BASE_URL")]
    pub base_url: Option<String>,

    /// Wait between page requests, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub page_delay_ms: u64,

    /// Stop after this many result pages.
    #[arg(long)]
    pub max_pages: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    pub fn pagination(&self) -> PaginationOptions {
        PaginationOptions {
            delay: Duration::from_millis(self.page_delay_ms),
            max_pages: self.max_pages,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Places around a point, every page.
    Nearby(NearbyArgs),
    /// Places matching a text query, every page.
    Text(TextArgs),
    /// Place IDs and locations around a point.
    Radar(RadarArgs),
    /// Full record for one place.
    Details(DetailsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct Filters {
    /// Feature type, repeatable.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    #[arg(long)]
    pub keyword: Option<String>,

    #[arg(long)]
    pub open_now: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NearbyArgs {
    #[arg(long, default_value_t = 37.7833, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, default_value_t = -122.4167, allow_negative_numbers = true)]
    pub lng: f64,

    /// Meters. Ignored with --by-distance.
    #[arg(long, default_value_t = 500.0)]
    pub radius: f64,

    /// Rank by distance instead of prominence.
    #[arg(long)]
    pub by_distance: bool,

    #[command(flatten)]
    pub filters: Filters,
}

#[derive(Args, Debug, Clone)]
pub struct TextArgs {
    pub query: String,

    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    pub radius: f64,

    #[command(flatten)]
    pub filters: Filters,
}

#[derive(Args, Debug, Clone)]
pub struct RadarArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    #[arg(long)]
    pub radius: f64,

    #[command(flatten)]
    pub filters: Filters,
}

#[derive(Args, Debug, Clone)]
pub struct DetailsArgs {
    pub place_id: String,

    #[arg(long)]
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_defaults_to_san_francisco_cafes() {
        let config =
            Config::try_parse_from(["places", "--key", "k", "nearby", "--type", "cafe"]).unwrap();
        let Command::Nearby(args) = &config.command else {
            panic!("expected nearby, got {:?}", config.command);
        };
        assert_eq!((args.lat, args.lng), (37.7833, -122.4167));
        assert_eq!(args.radius, 500.0);
        assert_eq!(args.filters.types, ["cafe"]);
        assert!(!args.by_distance);
    }

    #[test]
    fn pagination_flags() {
        let config = Config::try_parse_from([
            "places",
            "--key",
            "k",
            "--page-delay-ms",
            "0",
            "--max-pages",
            "2",
            "text",
            "Google",
        ])
        .unwrap();
        let options = config.pagination();
        assert_eq!(options.delay, Duration::ZERO);
        assert_eq!(options.max_pages, Some(2));
    }

    #[test]
    fn default_page_delay_is_two_seconds() {
        let config = Config::try_parse_from(["places", "--key", "k", "details", "abc"]).unwrap();
        assert_eq!(config.pagination().delay, Duration::from_secs(2));
        assert!(config.max_pages.is_none());
    }

    #[test]
    fn radar_needs_radius() {
        let err = Config::try_parse_from(["places", "--key", "k", "radar", "--lat", "1", "--lng", "2"]);
        assert!(err.is_err());
    }

    #[test]
    fn negative_coordinates_parse() {
        let config = Config::try_parse_from([
            "places", "--key", "k", "text", "pizza", "--lat", "-33.86", "--lng", "151.2", "--radius", "100",
        ])
        .unwrap();
        let Command::Text(args) = &config.command else {
            panic!("expected text, got {:?}", config.command);
        };
        assert_eq!(args.lat, Some(-33.86));
        assert_eq!(args.lng, Some(151.2));
    }
}
