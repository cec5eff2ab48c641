//! [`Storage`] bundle over one `SQLite` pool.

use sqlx::SqlitePool;

use smarthome_app::ports::Storage;

use crate::actuator_repo::SqliteActuatorRepository;
use crate::catalog_repo::{
    SqliteActuatorModelRepository, SqliteActuatorTypeRepository, SqliteDeviceTypeRepository,
    SqliteSensorModelRepository, SqliteSensorTypeRepository,
};
use crate::device_repo::SqliteDeviceRepository;
use crate::house_repo::SqliteHouseRepository;
use crate::reading_repo::SqliteReadingRepository;
use crate::room_repo::SqliteRoomRepository;
use crate::sensor_repo::SqliteSensorRepository;

/// Every repository, sharing a single connection pool.
///
/// Cloning is cheap: each repository only clones the pool handle.
#[derive(Clone)]
pub struct SqliteStorage {
    houses: SqliteHouseRepository,
    rooms: SqliteRoomRepository,
    device_types: SqliteDeviceTypeRepository,
    devices: SqliteDeviceRepository,
    sensor_types: SqliteSensorTypeRepository,
    sensor_models: SqliteSensorModelRepository,
    sensors: SqliteSensorRepository,
    readings: SqliteReadingRepository,
    actuator_types: SqliteActuatorTypeRepository,
    actuator_models: SqliteActuatorModelRepository,
    actuators: SqliteActuatorRepository,
}

impl SqliteStorage {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            houses: SqliteHouseRepository::new(pool.clone()),
            rooms: SqliteRoomRepository::new(pool.clone()),
            device_types: SqliteDeviceTypeRepository::new(pool.clone()),
            devices: SqliteDeviceRepository::new(pool.clone()),
            sensor_types: SqliteSensorTypeRepository::new(pool.clone()),
            sensor_models: SqliteSensorModelRepository::new(pool.clone()),
            sensors: SqliteSensorRepository::new(pool.clone()),
            readings: SqliteReadingRepository::new(pool.clone()),
            actuator_types: SqliteActuatorTypeRepository::new(pool.clone()),
            actuator_models: SqliteActuatorModelRepository::new(pool.clone()),
            actuators: SqliteActuatorRepository::new(pool),
        }
    }
}

impl Storage for SqliteStorage {
    type Houses = SqliteHouseRepository;
    type Rooms = SqliteRoomRepository;
    type DeviceTypes = SqliteDeviceTypeRepository;
    type Devices = SqliteDeviceRepository;
    type SensorTypes = SqliteSensorTypeRepository;
    type SensorModels = SqliteSensorModelRepository;
    type Sensors = SqliteSensorRepository;
    type Readings = SqliteReadingRepository;
    type ActuatorTypes = SqliteActuatorTypeRepository;
    type ActuatorModels = SqliteActuatorModelRepository;
    type Actuators = SqliteActuatorRepository;

    fn houses(&self) -> &Self::Houses {
        &self.houses
    }

    fn rooms(&self) -> &Self::Rooms {
        &self.rooms
    }

    fn device_types(&self) -> &Self::DeviceTypes {
        &self.device_types
    }

    fn devices(&self) -> &Self::Devices {
        &self.devices
    }

    fn sensor_types(&self) -> &Self::SensorTypes {
        &self.sensor_types
    }

    fn sensor_models(&self) -> &Self::SensorModels {
        &self.sensor_models
    }

    fn sensors(&self) -> &Self::Sensors {
        &self.sensors
    }

    fn readings(&self) -> &Self::Readings {
        &self.readings
    }

    fn actuator_types(&self) -> &Self::ActuatorTypes {
        &self.actuator_types
    }

    fn actuator_models(&self) -> &Self::ActuatorModels {
        &self.actuator_models
    }

    fn actuators(&self) -> &Self::Actuators {
        &self.actuators
    }
}
