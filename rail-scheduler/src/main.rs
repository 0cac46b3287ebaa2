use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rail_scheduler::config::ServerConfig;
use rail_scheduler::timetable::Timetable;
use rail_scheduler::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Everything is loaded and validated before the server accepts requests
    let timetable = match Timetable::load(&config.stations_path, &config.trips_path) {
        Ok(timetable) => timetable,
        Err(e) => {
            error!("Failed to load schedule: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(AppState::new(timetable));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "Failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Rail scheduler listening on http://{}", config.bind_addr);
    info!("API endpoints:");
    info!("  GET /schedule                 - Full schedule");
    info!("  GET /stations                 - Station list");
    info!("  GET /stations/lookup?name=    - Find a station by name");
    info!("  GET /stations/:id/schedule    - One station's schedule");
    info!("  GET /service?from=&to=        - Is there any service?");
    info!("  GET /service/nonstop?from=&to= - Is there nonstop service?");
    info!("  GET /route?from=&to=&cost=&after= - Best route");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
