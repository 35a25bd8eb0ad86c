use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub pricing: PricingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

/// Flat per-traveler surcharges, in minor currency units. Kept in
/// configuration so deployments can tune them without a rebuild.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingRules {
    #[serde(default = "default_destination_fee")]
    pub destination_fee: i64,
    #[serde(default = "default_travel_document_fee")]
    pub travel_document_fee: i64,
    #[serde(default = "default_insurance_fee")]
    pub insurance_fee: i64,
}

fn default_destination_fee() -> i64 {
    500
}
fn default_travel_document_fee() -> i64 {
    300
}
fn default_insurance_fee() -> i64 {
    200
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file; optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables with a STELLAR prefix,
            // e.g. STELLAR__SERVER__PORT=8080
            .add_source(config::Environment::with_prefix("STELLAR").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
