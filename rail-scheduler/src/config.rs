//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable overriding the listen address.
pub const ADDR_ENV_VAR: &str = "RAIL_SCHEDULER_ADDR";

/// Listen address used when [`ADDR_ENV_VAR`] is unset.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Error building the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Wrong number of command line arguments
    #[error("usage: {program} <stations.dat> <trains.dat>")]
    Usage { program: String },

    /// Listen address could not be parsed
    #[error("invalid listen address {value:?} in RAIL_SCHEDULER_ADDR")]
    InvalidAddr { value: String },
}

/// Configuration parameters for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Station data file.
    pub stations_path: PathBuf,

    /// Trip data file.
    pub trips_path: PathBuf,

    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Create a configuration with the default listen address.
    pub fn new(stations_path: impl Into<PathBuf>, trips_path: impl Into<PathBuf>) -> Self {
        Self {
            stations_path: stations_path.into(),
            trips_path: trips_path.into(),
            bind_addr: default_addr(),
        }
    }

    /// Build from command line arguments (including the program name) and
    /// an optional listen address taken from the environment.
    pub fn from_args<I>(args: I, addr: Option<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "rail-scheduler".to_string());
        let rest: Vec<String> = args.collect();

        let [stations_path, trips_path] = <[String; 2]>::try_from(rest)
            .map_err(|_| ConfigError::Usage { program })?;

        let mut config = Self::new(stations_path, trips_path);
        if let Some(value) = addr {
            config.bind_addr = value
                .parse()
                .map_err(|_| ConfigError::InvalidAddr { value })?;
        }

        Ok(config)
    }

    /// Build from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args(std::env::args(), std::env::var(ADDR_ENV_VAR).ok())
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}
