use std::path::PathBuf;

use store::StoreMode;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "withdrawals.json";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
    #[error("Invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

pub struct Config {
    pub port: u16,
    pub data_file: PathBuf,
    pub password: String,
    pub store_mode: StoreMode,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| std::env::var(name).ok())
    }

    fn load<F: Fn(&'static str) -> Option<String>>(get: F) -> Result<Self, ConfigError> {
        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let data_file = get("WITHDRAWALS_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        let password = get("WITHDRAWALS_PASSWORD")
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingEnv("WITHDRAWALS_PASSWORD"))?;

        let store_mode = match get("WITHDRAWALS_STORE_MODE") {
            Some(value) => value
                .parse::<StoreMode>()
                .map_err(|_| ConfigError::InvalidValue { name: "WITHDRAWALS_STORE_MODE", value })?,
            None => StoreMode::default(),
        };

        Ok(Self { port, data_file: data_file.into(), password, store_mode })
    }
}
