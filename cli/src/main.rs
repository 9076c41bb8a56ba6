use anyhow::Context;
use clap::Parser;
use places_core::{
    collect_all, FeatureType, HttpClient, LatLng, PaginationOptions, PlaceDetails, RankBy,
    Service,
};
use tracing_subscriber::EnvFilter;

use crate::config::{Command, Config, Filters};

mod config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    let mut service = Service::with_default_client(&config.key);
    if let Some(base_url) = &config.base_url {
        service.set_base_url(base_url);
    }
    tracing::debug!(?service, "configured");

    match run(&service, &config.command, &config.pagination()) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) if err.is_zero_results() => {
            println!("no results");
            Ok(())
        }
        Err(err) => Err(err).context("places request failed"),
    }
}

/// Execute one subcommand and render its output, one line per entry.
fn run<C: HttpClient>(
    service: &Service<C>,
    command: &Command,
    options: &PaginationOptions,
) -> places_core::Result<Vec<String>> {
    match command {
        Command::Nearby(args) => {
            let mut call = service.nearby(args.lat, args.lng);
            call.radius = args.radius;
            if args.by_distance {
                call.rank_by = RankBy::Distance;
            }
            call.keyword = args.filters.keyword.clone();
            call.open_now = args.filters.open_now;
            call.types = feature_types(&args.filters);

            let resp = collect_all(&mut call, options)?;
            tracing::info!(results = resp.results.len(), "nearby search done");
            Ok(resp.results.iter().map(|p| p.name.clone()).collect())
        }
        Command::Text(args) => {
            let mut call = service.text_search(&args.query);
            call.location = args.lat.zip(args.lng).map(|(lat, lng)| LatLng::new(lat, lng));
            call.radius = args.radius;
            call.open_now = args.filters.open_now;
            call.types = feature_types(&args.filters);

            let resp = collect_all(&mut call, options)?;
            tracing::info!(results = resp.results.len(), "text search done");
            Ok(resp.results.iter().map(|p| p.name.clone()).collect())
        }
        Command::Radar(args) => {
            let mut call = service.radar_search(args.radius, args.lat, args.lng);
            call.keyword = args.filters.keyword.clone();
            call.open_now = args.filters.open_now;
            call.types = feature_types(&args.filters);

            let resp = call.send()?;
            Ok(resp.results.iter().map(radar_line).collect())
        }
        Command::Details(args) => {
            let mut call = service.details(&args.place_id);
            call.language = args.language.clone();

            let resp = call.send()?;
            Ok(details_lines(&resp.result))
        }
    }
}

fn feature_types(filters: &Filters) -> Vec<FeatureType> {
    filters.types.iter().cloned().map(FeatureType::from).collect()
}

fn radar_line(place: &PlaceDetails) -> String {
    match &place.geometry {
        Some(g) => format!("{} {:.6},{:.6}", place.place_id, g.location.lat, g.location.lng),
        None => place.place_id.clone(),
    }
}

fn details_lines(place: &PlaceDetails) -> Vec<String> {
    let mut lines = vec![place.name.clone()];
    lines.extend(place.formatted_address.clone());
    lines.extend(place.international_phone_number.clone());
    lines.extend(place.website.clone());
    if let Some(rating) = place.rating {
        lines.push(format!("rating {rating}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use mock_server::{MockConfig, EIFFEL_TOWER_ID, TEST_KEY};

    use super::*;

    fn start_server() -> SocketAddr {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run_with(listener, MockConfig::default()).await
            })
            .unwrap();
        });

        addr
    }

    fn run_args(args: &[&str]) -> places_core::Result<Vec<String>> {
        let addr = start_server();
        let mut argv = vec!["places", "--key", TEST_KEY, "--page-delay-ms", "0"];
        argv.extend_from_slice(args);
        let config = Config::try_parse_from(argv).unwrap();

        let mut service = Service::with_default_client(&config.key);
        service.set_base_url(&format!("http://{addr}"));
        run(&service, &config.command, &config.pagination())
    }

    #[test]
    fn nearby_prints_every_page() {
        let lines = run_args(&["nearby", "--radius", "5000", "--type", "cafe"]).unwrap();
        assert_eq!(lines.len(), 45);
        assert!(lines.iter().all(|name| name.starts_with("Cafe")));
    }

    #[test]
    fn max_pages_limits_output() {
        let lines = run_args(&["--max-pages", "2", "text", "cafe"]).unwrap();
        assert_eq!(lines.len(), 40);
    }

    #[test]
    fn details_prints_the_record() {
        let lines = run_args(&["details", EIFFEL_TOWER_ID]).unwrap();
        assert_eq!(lines[0], "Eiffel Tower");
        assert!(lines.contains(&"https://www.toureiffel.paris/".to_string()));
    }

    #[test]
    fn radar_prints_ids_with_coordinates() {
        let lines = run_args(&["radar", "--lat", "37.7833", "--lng", "-122.4167", "--radius", "5000", "--type", "bar"])
            .unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("bar-"));
    }

    #[test]
    fn zero_results_surface_as_error() {
        let err = run_args(&["nearby", "--lat", "-45", "--lng", "170", "--radius", "100"]).unwrap_err();
        assert!(err.is_zero_results());
    }

    #[test]
    fn radar_line_without_geometry_is_the_id() {
        let place = PlaceDetails {
            place_id: "abc".to_string(),
            ..PlaceDetails::default()
        };
        assert_eq!(radar_line(&place), "abc");
    }
}
