//! Load config: defaults, then `config/<APP_ENV>.json`, then environment variables.

use crate::config::types::Config;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Directory searched for `<APP_ENV>.json` overlays.
pub const CONFIG_DIR: &str = "config";

impl Config {
    /// Build the process config once at start. Reads `.env` if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let mut config = match std::env::var("APP_ENV") {
            Ok(env) if !env.is_empty() => {
                let path = PathBuf::from(CONFIG_DIR).join(format!("{}.json", env));
                Self::from_file(&path)?
            }
            _ => Config::default(),
        };
        config.apply_env(|k| std::env::var(k).ok())?;
        Ok(config)
    }

    /// Fields missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Override fields from variables returned by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DATABASE_URL") {
            self.db.url = Some(v);
        }
        if let Some(v) = lookup("DB_HOST") {
            self.db.host = v;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.db.name = v;
        }
        if let Some(v) = lookup("DB_USER") {
            self.db.user = v;
        }
        if let Some(v) = lookup("DB_PASS") {
            self.db.pass = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.db.port = parse_port("DB_PORT", v)?;
        }
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_port("PORT", v)?;
        }
        Ok(())
    }
}

fn parse_port(var: &'static str, value: String) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.server.port, 3000);
        assert_eq!(c.db.host, "localhost");
        assert_eq!(c.db.name, "database");
        assert_eq!(c.db.port, 5432);
        assert!(c.db.url.is_none());
    }

    #[test]
    fn partial_overlay_keeps_defaults() {
        let c = Config::from_json(r#"{ "db": { "name": "todos_test", "port": 5433 }, "server": { "port": 8080 } }"#)
            .unwrap();
        assert_eq!(c.db.name, "todos_test");
        assert_eq!(c.db.port, 5433);
        assert_eq!(c.db.user, "username");
        assert_eq!(c.server.port, 8080);
        assert_eq!(c.server.host, "0.0.0.0");
    }

    #[test]
    fn env_overrides_file() {
        let vars: HashMap<&str, &str> = [("DB_HOST", "db.internal"), ("PORT", "9000")].into_iter().collect();
        let mut c = Config::default();
        c.apply_env(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(c.db.host, "db.internal");
        assert_eq!(c.server.port, 9000);
        assert_eq!(c.server.addr(), "0.0.0.0:9000");
    }

    #[test]
    fn bad_port_is_an_error() {
        let mut c = Config::default();
        let err = c
            .apply_env(|k| (k == "DB_PORT").then(|| "fifty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "DB_PORT", .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::from_file(Path::new("config/does-not-exist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn connect_options_prefer_url() {
        let mut c = Config::default();
        c.db.url = Some("postgres://u:p@example:6543/other".into());
        let opts = c.db.connect_options().unwrap();
        assert_eq!(opts.get_database(), Some("other"));
        assert_eq!(opts.get_port(), 6543);
    }
}
