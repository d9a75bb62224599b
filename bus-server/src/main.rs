use std::process::ExitCode;

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use bus_server::cache::{CacheConfig, CachedStore};
use bus_server::domain::{CityId, StopId};
use bus_server::search::{Itinerary, ItineraryEngine, SearchConfig, SearchError, SearchRequest};
use bus_server::store::InMemoryStore;

const USAGE: &str =
    "usage: bus-server <network.json> <origin-id> <destination-id> <YYYY-MM-DD> [--by-city]";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    let Ok(origin) = args[2].parse::<i64>() else {
        eprintln!("invalid origin id: {}", args[2]);
        return ExitCode::FAILURE;
    };
    let Ok(destination) = args[3].parse::<i64>() else {
        eprintln!("invalid destination id: {}", args[3]);
        return ExitCode::FAILURE;
    };
    let Ok(travel_date) = NaiveDate::parse_from_str(&args[4], "%Y-%m-%d") else {
        eprintln!("invalid date: {} (expected YYYY-MM-DD)", args[4]);
        return ExitCode::FAILURE;
    };
    let by_city = args.iter().any(|arg| arg == "--by-city");

    let store = match InMemoryStore::from_json_file(&args[1]) {
        Ok(store) => store,
        Err(error) => {
            eprintln!("failed to load network from {}: {error}", args[1]);
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} enrollments from {}", store.len(), args[1]);

    let cached = CachedStore::new(store, &CacheConfig::default());
    let config = SearchConfig::default();
    let engine = ItineraryEngine::new(&cached, &config);

    let request = if by_city {
        SearchRequest::between_cities(CityId(origin), CityId(destination), travel_date)
    } else {
        SearchRequest::between_stops(StopId(origin), StopId(destination), travel_date)
    };

    match engine.search(&request).await {
        Ok(outcome) => {
            println!(
                "Found {} itinerary option(s), {} candidates examined:",
                outcome.itineraries.len(),
                outcome.candidates_examined
            );
            println!();
            for (index, itinerary) in outcome.itineraries.iter().enumerate() {
                print_itinerary(index + 1, itinerary);
            }
            ExitCode::SUCCESS
        }
        Err(SearchError::NotFound) => {
            println!("No itinerary found for this origin/destination/date.");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("search failed: {error}");
            ExitCode::FAILURE
        }
    }
}

fn print_itinerary(index: usize, itinerary: &Itinerary) {
    let kind = if itinerary.is_direct() {
        "direct"
    } else {
        "1 transfer"
    };
    println!(
        "Option {index} ({kind}): {} min, cost {:.2}",
        itinerary.total_duration.num_minutes(),
        itinerary.total_cost
    );
    for hop in &itinerary.hops {
        println!(
            "  {}. {}  {}  ->  {}  {}  ({}, {} {})",
            hop.position,
            hop.boarding_time.format("%Y-%m-%d %H:%M"),
            hop.boarding_full_name,
            hop.alighting_time.format("%Y-%m-%d %H:%M"),
            hop.alighting_full_name,
            hop.company_name,
            hop.vehicle_kind,
            hop.vehicle_number,
        );
    }
    println!();
}
