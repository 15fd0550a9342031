use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::gate::{GateConfig, SessionConfig, VerificationCacheConfig};
use super::logging::LoggingConfig;
use super::remote::RemoteConfig;

/// Prefix for environment overrides, e.g. `PORTALGATE_REMOTE__BASE_URL`.
pub const ENV_PREFIX: &str = "PORTALGATE_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: where to listen, how to log, which remote service
/// to talk to and which paths the gate protects.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub session: SessionConfig,
    /// Short-lived cache of positive verification results. Off when absent.
    #[serde(default)]
    pub verification_cache: Option<VerificationCacheConfig>,
}

/// The figment used at runtime: `./config.yaml` overlaid with `PORTALGATE_*` variables.
pub fn runtime_figment() -> Figment {
    Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Extracts the current config version out of any figment.
pub fn extract(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from `./config.yaml` plus environment overrides, exiting on error.
pub fn load_config() -> ConfigV1 {
    match extract(&runtime_figment()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Could not render configuration schema: {}", e),
    }
}
