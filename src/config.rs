use std::env;

/// Runtime settings for the web server, read from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// Key used to sign flash message cookies. A random key is generated when unset.
    pub secret_key: Option<String>,
    /// Directory holding the tera templates.
    pub templates_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "app.db".to_string(),
            address: "127.0.0.1".to_string(),
            port: 8080,
            secret_key: None,
            templates_dir: "templates".to_string(),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from environment variables, falling back to defaults.
    ///
    /// `.env` is expected to be loaded by the caller beforehand.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT value `{value}`");
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            address: lookup("ADDRESS").unwrap_or(defaults.address),
            port,
            secret_key: lookup("SECRET_KEY").filter(|value| !value.is_empty()),
            templates_dir: lookup("TEMPLATES_DIR").unwrap_or(defaults.templates_dir),
        }
    }

    /// Glob pattern handed to tera when loading templates.
    pub fn templates_glob(&self) -> String {
        format!("{}/**/*", self.templates_dir.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_uses_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.database_url, "app.db");
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.secret_key.is_none());
        assert_eq!(config.templates_glob(), "templates/**/*");
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sales.db"),
            ("ADDRESS", "0.0.0.0"),
            ("PORT", "9000"),
            ("SECRET_KEY", "s3cret"),
            ("TEMPLATES_DIR", "/srv/templates/"),
        ]));

        assert_eq!(config.database_url, "sales.db");
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.secret_key.as_deref(), Some("s3cret"));
        assert_eq!(config.templates_glob(), "/srv/templates/**/*");
    }

    #[test]
    fn from_lookup_ignores_bad_port_and_empty_secret() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty"), ("SECRET_KEY", "")]));

        assert_eq!(config.port, 8080);
        assert!(config.secret_key.is_none());
    }
}
