use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

pub const DEFAULT_SECRET_KEY: &str = "secret";

/// Deployment profile, selected with `APP_ENV`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Dev,
    Test,
    Prod,
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnv::Dev => write!(f, "dev"),
            AppEnv::Test => write!(f, "test"),
            AppEnv::Prod => write!(f, "prod"),
        }
    }
}

impl FromStr for AppEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(AppEnv::Dev),
            "test" | "testing" => Ok(AppEnv::Test),
            "prod" | "production" => Ok(AppEnv::Prod),
            other => Err(AppError::ConfigError(format!(
                "Unknown environment '{other}', expected dev, test or prod"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: AppEnv,
    pub debug: bool,
    pub secret_key: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Log every SQL statement.
    #[serde(default)]
    pub echo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Falls back to `secret_key` when empty.
    #[serde(default)]
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

impl Config {
    /// Reads `APP_ENV` and loads the matching profile.
    pub fn from_env() -> AppResult<Self> {
        let environment = match env::var("APP_ENV") {
            Ok(v) => v.parse()?,
            Err(_) => AppEnv::default(),
        };
        Self::load(environment)
    }

    pub fn load(environment: AppEnv) -> AppResult<Self> {
        Self::load_from(environment, env::vars().collect())
    }

    /// Profile defaults, then the optional TOML file, then `PIZZA_*`
    /// variables, then the plain `DATABASE_URL` / `SECRET_KEY` /
    /// `JWT_SECRET_KEY` overrides, all read from `vars`.
    pub fn load_from(environment: AppEnv, vars: HashMap<String, String>) -> AppResult<Self> {
        let config_path = vars
            .get("CONFIG_PATH")
            .cloned()
            .unwrap_or_else(|| format!("config/{environment}"));
        let database_url = vars.get("DATABASE_URL").cloned();
        let secret_key = vars.get("SECRET_KEY").cloned();
        let jwt_secret = vars.get("JWT_SECRET_KEY").cloned();

        let builder = Self::defaults(environment)?
            .add_source(File::with_name(&config_path).required(false))
            .add_source(
                Environment::with_prefix("PIZZA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("database.url", database_url)?
            .set_override_option("secret_key", secret_key)?
            .set_override_option("jwt.secret", jwt_secret)?;

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.finalize();
        config.validate()?;
        Ok(config)
    }

    /// Built-in settings for each profile, without any external source.
    pub fn defaults(environment: AppEnv) -> AppResult<ConfigBuilder<DefaultState>> {
        let (debug, database_url, max_connections, echo) = match environment {
            AppEnv::Dev => (true, "sqlite://db.sqlite3?mode=rwc", 5_i64, true),
            AppEnv::Test => (false, "sqlite::memory:", 1, false),
            AppEnv::Prod => (false, "", 10, false),
        };

        let builder = config::Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("debug", debug)?
            .set_default("secret_key", DEFAULT_SECRET_KEY)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000_i64)?
            .set_default("database.url", database_url)?
            .set_default("database.max_connections", max_connections)?
            .set_default("database.echo", echo)?
            .set_default("jwt.secret", "")?
            .set_default("jwt.access_token_expires_in", 30 * 60_i64)?
            .set_default("jwt.refresh_token_expires_in", 30 * 24 * 60 * 60_i64)?;

        Ok(builder)
    }

    fn finalize(&mut self) {
        if self.jwt.secret.is_empty() {
            self.jwt.secret = self.secret_key.clone();
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.url.is_empty() {
            return Err(AppError::ConfigError(format!(
                "DATABASE_URL must be set for the {} environment",
                self.environment
            )));
        }
        if self.jwt.access_token_expires_in <= 0 || self.jwt.refresh_token_expires_in <= 0 {
            return Err(AppError::ConfigError(
                "Token lifetimes must be positive".to_string(),
            ));
        }
        if self.environment == AppEnv::Prod && self.jwt.secret == DEFAULT_SECRET_KEY {
            return Err(AppError::ConfigError(
                "SECRET_KEY or JWT_SECRET_KEY must be set in production".to_string(),
            ));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// URL with any password replaced, for log lines.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &self.url[scheme_end + 3..at];
                match credentials.split_once(':') {
                    Some((user, _)) => format!(
                        "{}{}:***{}",
                        &self.url[..scheme_end + 3],
                        user,
                        &self.url[at..]
                    ),
                    None => self.url.clone(),
                }
            }
            _ => self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(environment: AppEnv) -> Config {
        let mut config: Config = Config::defaults(environment)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        config.finalize();
        config
    }

    #[test]
    fn test_parse_app_env() {
        assert_eq!("dev".parse::<AppEnv>().unwrap(), AppEnv::Dev);
        assert_eq!("Production".parse::<AppEnv>().unwrap(), AppEnv::Prod);
        assert_eq!(" test ".parse::<AppEnv>().unwrap(), AppEnv::Test);
        assert!("staging".parse::<AppEnv>().is_err());
    }

    #[test]
    fn test_dev_defaults() {
        let config = build(AppEnv::Dev);
        assert!(config.debug);
        assert!(config.database.echo);
        assert!(config.database.url.starts_with("sqlite://"));
        assert_eq!(config.jwt.access_token_expires_in, 1800);
        assert_eq!(config.jwt.refresh_token_expires_in, 2_592_000);
        assert_eq!(config.jwt.secret, DEFAULT_SECRET_KEY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_test_defaults_use_memory_database() {
        let config = build(AppEnv::Test);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 1);
        assert!(!config.debug);
    }

    #[test]
    fn test_prod_requires_database_and_secret() {
        let mut config = build(AppEnv::Prod);
        assert!(config.validate().is_err());

        config.database.url = "postgres://pizza:hunter2@db/pizza".to_string();
        assert!(config.validate().is_err());

        config.jwt.secret = "a-real-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redacted_url() {
        let db = DatabaseConfig {
            url: "postgres://pizza:hunter2@db:5432/pizza".to_string(),
            max_connections: 1,
            echo: false,
        };
        assert_eq!(db.redacted_url(), "postgres://pizza:***@db:5432/pizza");

        let db = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            echo: false,
        };
        assert_eq!(db.redacted_url(), "sqlite::memory:");
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_layers_file_then_prefixed_then_plain_variables() {
        let path = env::temp_dir().join(format!("pizza-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "secret_key = \"from-file\"\n\n[server]\nhost = \"0.0.0.0\"\nport = 7000\n\n[database]\nurl = \"sqlite://file.db\"\n",
        )
        .unwrap();
        let config_path = path.to_string_lossy().to_string();

        let from_file = Config::load_from(
            AppEnv::Prod,
            vars(&[("CONFIG_PATH", &config_path)]),
        )
        .unwrap();
        assert_eq!(from_file.server.host, "0.0.0.0");
        assert_eq!(from_file.server.port, 7000);
        assert_eq!(from_file.database.url, "sqlite://file.db");
        assert_eq!(from_file.jwt.secret, "from-file");

        let layered = Config::load_from(
            AppEnv::Prod,
            vars(&[
                ("CONFIG_PATH", &config_path),
                ("PIZZA_SERVER__PORT", "9123"),
                ("PIZZA_DATABASE__URL", "sqlite://prefixed.db"),
                ("DATABASE_URL", "sqlite://x.db"),
                ("SECRET_KEY", "app-secret"),
            ]),
        )
        .unwrap();
        assert_eq!(layered.server.host, "0.0.0.0");
        assert_eq!(layered.server.port, 9123);
        assert_eq!(layered.database.url, "sqlite://x.db");
        assert_eq!(layered.secret_key, "app-secret");
        assert_eq!(layered.jwt.secret, "app-secret");

        let jwt_wins = Config::load_from(
            AppEnv::Prod,
            vars(&[
                ("CONFIG_PATH", &config_path),
                ("SECRET_KEY", "app-secret"),
                ("JWT_SECRET_KEY", "jwt-secret"),
            ]),
        )
        .unwrap();
        assert_eq!(jwt_wins.secret_key, "app-secret");
        assert_eq!(jwt_wins.jwt.secret, "jwt-secret");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_without_file_uses_profile_defaults() {
        let config = Config::load_from(
            AppEnv::Test,
            vars(&[("CONFIG_PATH", "/nonexistent/pizza-config")]),
        )
        .unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.server.port, 8000);

        let missing_db = Config::load_from(
            AppEnv::Prod,
            vars(&[
                ("CONFIG_PATH", "/nonexistent/pizza-config"),
                ("JWT_SECRET_KEY", "jwt-secret"),
            ]),
        );
        assert!(matches!(missing_db, Err(AppError::ConfigError(_))));
    }
}
