use dotenvy::dotenv;
use std::net::SocketAddr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: u64,
    pub listen_addr: SocketAddr,
    pub allow_db_reset: bool,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        tracing::info!("Config loaded");

        Ok(config)
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let jwt_expiration_minutes = match lookup("JWT_EXPIRATION_MINUTES") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "JWT_EXPIRATION_MINUTES",
                value,
            })?,
            None => 60,
        };

        let listen_addr = match lookup("APP_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "APP_ADDR",
                value,
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let allow_db_reset = match lookup("ALLOW_DB_RESET") {
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "ALLOW_DB_RESET",
                        value,
                    });
                }
            },
            None => false,
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration_minutes,
            listen_addr,
            allow_db_reset,
            admin_email: lookup("ADMIN_EMAIL"),
            admin_password: lookup("ADMIN_PASSWORD"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "mysql://u:p@localhost/brewery"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_expiration_minutes, 60);
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:3000");
        assert!(!config.allow_db_reset);
        assert_eq!(config.admin_email, None);
    }

    #[test]
    fn missing_secret_is_reported() {
        let result = Config::from_lookup(lookup(&[("DATABASE_URL", "mysql://localhost/b")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "mysql://localhost/b"),
            ("JWT_SECRET", "s"),
            ("JWT_EXPIRATION_MINUTES", "soon"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "JWT_EXPIRATION_MINUTES", .. })
        ));
    }
}
