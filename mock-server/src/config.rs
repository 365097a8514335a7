//! Server configuration from the environment (and `.env`, when present).

use std::net::{IpAddr, SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {key}='{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Config {
    /// `HOST` defaults to `127.0.0.1`, `PORT` to `8000`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let host: IpAddr = host.parse().map_err(|_| ConfigError::Invalid {
            key: "HOST",
            value: host.clone(),
        })?;

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            Err(_) => 8000,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
        })
    }
}
