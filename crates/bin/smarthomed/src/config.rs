//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use smarthome_app::services::catalog_service::CatalogSeed;
use smarthome_app::services::reading_service::AggregationConfig;
use smarthome_domain::actuator::ActuatorModel;
use smarthome_domain::id::{
    ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId,
};
use smarthome_domain::period::Delta;
use smarthome_domain::sensor::{SensorModel, SensorType};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Aggregation engine settings.
    pub aggregation: AggregationSettings,
    /// Catalog entries seeded at startup.
    pub catalog: CatalogSettings,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Tolerance and catalog names used by the aggregations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Simultaneity tolerance and window length, in seconds.
    pub delta_seconds: u32,
    pub temperature_sensor_model: String,
    pub power_sensor_model: String,
    pub grid_meter_device_type: String,
    pub power_source_meter_device_type: String,
}

/// Reference data made sure to exist at startup.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub device_types: Vec<String>,
    pub sensor_types: Vec<SensorTypeEntry>,
    pub sensor_models: Vec<SensorModelEntry>,
    pub actuator_types: Vec<String>,
    pub actuator_models: Vec<ActuatorModelEntry>,
}

/// `[[catalog.sensor_types]]` entry.
#[derive(Debug, Deserialize)]
pub struct SensorTypeEntry {
    pub name: String,
    pub unit: String,
}

/// `[[catalog.sensor_models]]` entry.
#[derive(Debug, Deserialize)]
pub struct SensorModelEntry {
    pub name: String,
    /// Sensor type name followed by its unit, e.g. `TemperatureCelsius`.
    pub sensor_type_id: String,
}

/// `[[catalog.actuator_models]]` entry.
#[derive(Debug, Deserialize)]
pub struct ActuatorModelEntry {
    pub name: String,
    pub actuator_type: String,
}

impl Config {
    /// Load configuration from `smarthome.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smarthome.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SMARTHOME_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SMARTHOME_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SMARTHOME_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("SMARTHOME_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.aggregation_config()?;
        self.catalog_seed()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Typed settings for the reading service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a zero delta or a blank name.
    pub fn aggregation_config(&self) -> Result<AggregationConfig, ConfigError> {
        let settings = &self.aggregation;
        Ok(AggregationConfig {
            delta: Delta::from_secs(settings.delta_seconds)
                .map_err(|_| invalid("aggregation.delta_seconds must be positive"))?,
            temperature_sensor_model: SensorModelName::new(&settings.temperature_sensor_model)
                .map_err(|_| invalid("aggregation.temperature_sensor_model is blank"))?,
            power_sensor_model: SensorModelName::new(&settings.power_sensor_model)
                .map_err(|_| invalid("aggregation.power_sensor_model is blank"))?,
            grid_meter_device_type: DeviceTypeName::new(&settings.grid_meter_device_type)
                .map_err(|_| invalid("aggregation.grid_meter_device_type is blank"))?,
            power_source_meter_device_type: DeviceTypeName::new(
                &settings.power_source_meter_device_type,
            )
            .map_err(|_| invalid("aggregation.power_source_meter_device_type is blank"))?,
        })
    }

    /// Catalog entries to seed at startup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when an entry has a blank name.
    pub fn catalog_seed(&self) -> Result<CatalogSeed, ConfigError> {
        let catalog = &self.catalog;
        let device_types = catalog
            .device_types
            .iter()
            .map(|name| {
                DeviceTypeName::new(name).map_err(|_| invalid("catalog device type is blank"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let sensor_types = catalog
            .sensor_types
            .iter()
            .map(|entry| {
                SensorType::new(&entry.name, &entry.unit)
                    .map_err(|_| invalid("catalog sensor type needs a name and a unit"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let sensor_models = catalog
            .sensor_models
            .iter()
            .map(|entry| {
                Ok(SensorModel {
                    name: SensorModelName::new(&entry.name)
                        .map_err(|_| invalid("catalog sensor model is blank"))?,
                    sensor_type_id: SensorTypeId::new(&entry.sensor_type_id)
                        .map_err(|_| invalid("catalog sensor model needs a sensor type"))?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let actuator_types = catalog
            .actuator_types
            .iter()
            .map(|name| {
                ActuatorTypeName::new(name).map_err(|_| invalid("catalog actuator type is blank"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let actuator_models = catalog
            .actuator_models
            .iter()
            .map(|entry| {
                Ok(ActuatorModel {
                    name: ActuatorModelName::new(&entry.name)
                        .map_err(|_| invalid("catalog actuator model is blank"))?,
                    actuator_type: ActuatorTypeName::new(&entry.actuator_type)
                        .map_err(|_| invalid("catalog actuator model needs an actuator type"))?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(CatalogSeed {
            device_types,
            sensor_types,
            sensor_models,
            actuator_types,
            actuator_models,
        })
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Validation(message.to_string())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:smarthome.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            delta_seconds: 3600,
            temperature_sensor_model: "SensorOfTemperature".to_string(),
            power_sensor_model: "SensorOfPowerConsumption".to_string(),
            grid_meter_device_type: "GridPowerMeter".to_string(),
            power_source_meter_device_type: "PowerSourcePowerMeter".to_string(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            device_types: [
                "GridPowerMeter",
                "PowerSourcePowerMeter",
                "Thermometer",
                "Heater",
                "Fan",
            ]
            .map(String::from)
            .to_vec(),
            sensor_types: vec![
                SensorTypeEntry {
                    name: "Temperature".to_string(),
                    unit: "Celsius".to_string(),
                },
                SensorTypeEntry {
                    name: "PowerConsumption".to_string(),
                    unit: "Watt".to_string(),
                },
                SensorTypeEntry {
                    name: "Humidity".to_string(),
                    unit: "Percentage".to_string(),
                },
            ],
            sensor_models: vec![
                SensorModelEntry {
                    name: "SensorOfTemperature".to_string(),
                    sensor_type_id: "TemperatureCelsius".to_string(),
                },
                SensorModelEntry {
                    name: "SensorOfPowerConsumption".to_string(),
                    sensor_type_id: "PowerConsumptionWatt".to_string(),
                },
                SensorModelEntry {
                    name: "SensorOfScalePercentage".to_string(),
                    sensor_type_id: "HumidityPercentage".to_string(),
                },
            ],
            actuator_types: ["OnOff", "BlindRoller", "Limiter", "DecimalLimiter"]
                .map(String::from)
                .to_vec(),
            actuator_models: [
                ("ActuatorOfOnOffSwitch", "OnOff"),
                ("ActuatorOfBlindRoller", "BlindRoller"),
                ("ActuatorOfLimiter", "Limiter"),
                ("ActuatorOfDecimalLimiter", "DecimalLimiter"),
            ]
            .map(|(name, actuator_type)| ActuatorModelEntry {
                name: name.to_string(),
                actuator_type: actuator_type.to_string(),
            })
            .into(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:smarthome.db?mode=rwc");
        assert_eq!(config.aggregation.delta_seconds, 3600);
        assert_eq!(config.catalog.actuator_types.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.aggregation.grid_meter_device_type, "GridPowerMeter");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [aggregation]
            delta_seconds = 900
            temperature_sensor_model = 'Thermo'
            power_sensor_model = 'Watts'
            grid_meter_device_type = 'Grid'
            power_source_meter_device_type = 'Solar'

            [catalog]
            device_types = ['Grid', 'Solar']
            actuator_types = ['Switch']

            [[catalog.sensor_types]]
            name = 'Power'
            unit = 'W'

            [[catalog.sensor_models]]
            name = 'Watts'
            sensor_type_id = 'PowerW'

            [[catalog.actuator_models]]
            name = 'Relay'
            actuator_type = 'Switch'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");

        let aggregation = config.aggregation_config().unwrap();
        assert_eq!(aggregation.delta.as_secs(), 900);
        assert_eq!(aggregation.grid_meter_device_type.as_str(), "Grid");

        let seed = config.catalog_seed().unwrap();
        assert_eq!(seed.device_types.len(), 2);
        assert_eq!(seed.sensor_types[0].id.as_str(), "PowerW");
        assert_eq!(seed.sensor_models[0].sensor_type_id.as_str(), "PowerW");
        assert_eq!(seed.actuator_types.len(), 1);
        assert_eq!(seed.actuator_models[0].actuator_type.as_str(), "Switch");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_delta() {
        let mut config = Config::default();
        config.aggregation.delta_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("delta_seconds")
        ));
    }

    #[test]
    fn should_reject_blank_aggregation_name() {
        let mut config = Config::default();
        config.aggregation.power_sensor_model = "  ".to_string();
        assert!(config.aggregation_config().is_err());
    }

    #[test]
    fn should_reject_blank_catalog_entry() {
        let mut config = Config::default();
        config.catalog.device_types.push(String::new());
        assert!(config.catalog_seed().is_err());
    }

    #[test]
    fn should_reject_actuator_model_without_type() {
        let mut config = Config::default();
        config.catalog.actuator_models.push(ActuatorModelEntry {
            name: "Relay".to_string(),
            actuator_type: " ".to_string(),
        });
        assert!(matches!(
            config.catalog_seed(),
            Err(ConfigError::Validation(msg)) if msg.contains("actuator type")
        ));
    }

    #[test]
    fn should_seed_default_actuator_models_with_known_types() {
        let seed = Config::default().catalog_seed().unwrap();
        assert!(
            seed.actuator_models
                .iter()
                .all(|m| seed.actuator_types.contains(&m.actuator_type))
        );
    }

    #[test]
    fn should_seed_default_catalog_with_aggregation_names() {
        let config = Config::default();
        let seed = config.catalog_seed().unwrap();
        let aggregation = config.aggregation_config().unwrap();

        assert!(seed.device_types.contains(&aggregation.grid_meter_device_type));
        assert!(
            seed.device_types
                .contains(&aggregation.power_source_meter_device_type)
        );
        assert!(
            seed.sensor_models
                .iter()
                .any(|m| m.name == aggregation.temperature_sensor_model)
        );
        assert!(
            seed.sensor_models
                .iter()
                .any(|m| m.name == aggregation.power_sensor_model)
        );
    }

    #[test]
    fn should_format_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
