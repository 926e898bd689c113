use std::{env, fmt::Display, net::IpAddr, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: try_load("DATABASE_URL", "sqlite:quoteboard.db"),
            host: try_load("HOST", "127.0.0.1"),
            port: try_load("PORT", "8080"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("invalid {key} value: {e}");
        })
        .expect("environment misconfigured")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let port: u16 = try_load("QUOTEBOARD_TEST_UNSET_PORT", "8080");
        assert_eq!(port, 8080);
    }
}
