use config::{Config, ConfigError, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::convert::{TryFrom, TryInto};
use std::env::var;
use std::fmt;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// The single origin browsers may call the API from
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default)]
    pub require_ssl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    Local,
    CI,
    Production,
}

/// Reads `configuration/base.yaml`, then the file for the environment named by
/// `APP_ENVIRONMENT` (defaults to `local`), then any `APP_*` environment variables.
///
/// Nested keys are separated by `__`, ie. `APP_APPLICATION__PORT=5001`
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            File::from(configuration_directory.join(format!("{}.yaml", environment)))
                .required(true),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

impl Settings {
    pub fn set_database_name(&mut self, name: String) {
        self.database.database_name = name;
    }
}

impl DatabaseSettings {
    /// Connection options for the server itself, used to create
    /// databases before the application's one exists
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(&self.password)
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::CI => "ci",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ci" => Ok(Self::CI),
            "production" => Ok(Self::Production),
            other => Err(format!("{} is not a supported environment", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing_ignores_case() {
        let env: Environment = String::from("Production").try_into().unwrap();
        assert_eq!(env, Environment::Production);
        let env: Environment = String::from("CI").try_into().unwrap();
        assert_eq!(env, Environment::CI);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let err = Environment::try_from(String::from("staging")).unwrap_err();
        assert_eq!(err, "staging is not a supported environment");
    }

    #[test]
    fn environment_names_match_configuration_files() {
        for env in [Environment::Local, Environment::CI, Environment::Production] {
            assert_eq!(env.to_string(), env.as_str());
        }
    }
}
