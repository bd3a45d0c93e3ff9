// config
use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/media_catalog";
pub const DEFAULT_PORT: u16 = 8080;
pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Drop and reload both collections from the bundled datasets before serving.
    pub reset_db: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::load(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, which resolves a variable name to its value.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let supplied = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let database_url =
            supplied("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let port = match supplied("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?,
            None => DEFAULT_PORT,
        };
        let reset_db = supplied("RESET_DB").is_some();

        // Log which settings came from the environment (NOT their values!)
        let configured: Vec<&str> = ["DATABASE_URL", "PORT", "RESET_DB"]
            .into_iter()
            .filter(|key| supplied(key).is_some())
            .collect();
        info!("Config supplied by environment: {:?}", configured);

        Ok(Config {
            database_url,
            port,
            reset_db,
        })
    }

    pub fn uses_memory_storage(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::load(|key| vars.get(key).cloned())
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(
            config,
            Config {
                database_url: DEFAULT_DATABASE_URL.to_string(),
                port: 8080,
                reset_db: false,
            }
        );
        assert_eq!(config.bind_address().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db:5432/media"),
            ("PORT", "9000"),
            ("RESET_DB", "true"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://db:5432/media");
        assert_eq!(config.port, 9000);
        assert!(config.reset_db);
        assert!(!config.uses_memory_storage());
        assert!(load(&[("DATABASE_URL", "memory://")]).unwrap().uses_memory_storage());
    }

    #[test]
    fn any_non_empty_reset_flag_counts() {
        assert!(load(&[("RESET_DB", "0")]).unwrap().reset_db);
        assert!(!load(&[("RESET_DB", "")]).unwrap().reset_db);
    }

    #[test]
    fn rejects_bad_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(load(&[("PORT", "70000")]).is_err());
    }
}
