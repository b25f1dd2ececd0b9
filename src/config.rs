use std::env;
use std::net::SocketAddr;

use crate::error::Error;
use crate::pricing::{is_valid_commission_rate, DEFAULT_COMMISSION_RATE};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_address: SocketAddr,
    pub commission_rate: f64,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        if let Err(err) = dotenv::dotenv() {
            tracing::debug!("no .env file loaded: {}", err);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| Error::config_error("DATABASE_URL is not set"))?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .map_err(|_| Error::config_error("DATABASE_MAX_CONNECTIONS is not a number"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into())
            .parse()
            .map_err(|_| Error::config_error("BIND_ADDRESS is not a socket address"))?;

        let commission_rate = match lookup("COMMISSION_RATE") {
            Some(value) => value
                .parse()
                .map_err(|_| Error::config_error("COMMISSION_RATE is not a number"))?,
            None => DEFAULT_COMMISSION_RATE,
        };

        if !is_valid_commission_rate(commission_rate) {
            return Err(Error::config_error("COMMISSION_RATE must be within [0, 1]"));
        }

        Ok(Self {
            database_url,
            max_connections,
            bind_address,
            commission_rate,
        })
    }
}
