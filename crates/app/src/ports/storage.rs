//! Storage port — repository traits for persistence.
//!
//! Methods return `impl Future + Send` so services stay usable from
//! multi-threaded runtimes without boxing.
//!
//! Listing methods return rows in insertion order.

use std::future::Future;

use smarthome_domain::actuator::{Actuator, ActuatorModel, ActuatorType};
use smarthome_domain::device::{Device, DeviceType};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::House;
use smarthome_domain::id::{
    ActuatorId, ActuatorModelName, ActuatorTypeName, DeviceId, DeviceTypeName, HouseName,
    ReadingId, RoomId, SensorId, SensorModelName, SensorTypeId,
};
use smarthome_domain::reading::Reading;
use smarthome_domain::room::Room;
use smarthome_domain::sensor::{Sensor, SensorModel, SensorType};
use smarthome_domain::time::Timestamp;

pub trait HouseRepository {
    fn create(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send;

    fn get_by_name(
        &self,
        name: &HouseName,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<House>, SmartHomeError>> + Send;

    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send;
}

pub trait RoomRepository {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send;

    fn find_by_house(
        &self,
        house_name: &HouseName,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send;
}

pub trait DeviceTypeRepository {
    fn create(
        &self,
        device_type: DeviceType,
    ) -> impl Future<Output = Result<DeviceType, SmartHomeError>> + Send;

    fn get_by_name(
        &self,
        name: &DeviceTypeName,
    ) -> impl Future<Output = Result<Option<DeviceType>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceType>, SmartHomeError>> + Send;
}

pub trait DeviceRepository {
    fn create(&self, device: Device)
    -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;

    fn update(&self, device: Device)
    -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    fn find_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;

    /// Ids of every device of the given type, in insertion order.
    fn find_ids_by_device_type(
        &self,
        device_type: &DeviceTypeName,
    ) -> impl Future<Output = Result<Vec<DeviceId>, SmartHomeError>> + Send;
}

pub trait SensorTypeRepository {
    fn create(
        &self,
        sensor_type: SensorType,
    ) -> impl Future<Output = Result<SensorType, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: &SensorTypeId,
    ) -> impl Future<Output = Result<Option<SensorType>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<SensorType>, SmartHomeError>> + Send;
}

pub trait SensorModelRepository {
    fn create(
        &self,
        model: SensorModel,
    ) -> impl Future<Output = Result<SensorModel, SmartHomeError>> + Send;

    fn get_by_name(
        &self,
        name: &SensorModelName,
    ) -> impl Future<Output = Result<Option<SensorModel>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<SensorModel>, SmartHomeError>> + Send;

    fn find_by_sensor_type(
        &self,
        sensor_type_id: &SensorTypeId,
    ) -> impl Future<Output = Result<Vec<SensorModel>, SmartHomeError>> + Send;
}

pub trait SensorRepository {
    fn create(&self, sensor: Sensor)
    -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    fn find_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: &SensorModelName,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    fn find_ids_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: &SensorModelName,
    ) -> impl Future<Output = Result<Vec<SensorId>, SmartHomeError>> + Send;
}

pub trait ReadingRepository {
    fn create(
        &self,
        reading: Reading,
    ) -> impl Future<Output = Result<Reading, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: ReadingId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send;

    /// Readings of `sensor_id` with `start <= recorded_at <= end`, oldest first.
    fn find_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<Reading>, SmartHomeError>> + Send;

    /// Same selection as [`find_by_sensor_in_period`](Self::find_by_sensor_in_period), ids only.
    fn find_ids_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<ReadingId>, SmartHomeError>> + Send;

    fn find_latest_by_sensor(
        &self,
        sensor_id: SensorId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send;
}

pub trait ActuatorTypeRepository {
    fn create(
        &self,
        actuator_type: ActuatorType,
    ) -> impl Future<Output = Result<ActuatorType, SmartHomeError>> + Send;

    fn get_by_name(
        &self,
        name: &ActuatorTypeName,
    ) -> impl Future<Output = Result<Option<ActuatorType>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<ActuatorType>, SmartHomeError>> + Send;
}

pub trait ActuatorModelRepository {
    fn create(
        &self,
        model: ActuatorModel,
    ) -> impl Future<Output = Result<ActuatorModel, SmartHomeError>> + Send;

    fn get_by_name(
        &self,
        name: &ActuatorModelName,
    ) -> impl Future<Output = Result<Option<ActuatorModel>, SmartHomeError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<ActuatorModel>, SmartHomeError>> + Send;

    fn find_by_actuator_type(
        &self,
        actuator_type: &ActuatorTypeName,
    ) -> impl Future<Output = Result<Vec<ActuatorModel>, SmartHomeError>> + Send;
}

pub trait ActuatorRepository {
    fn create(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send;

    fn get_by_id(
        &self,
        id: ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send;

    fn find_ids_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<ActuatorId>, SmartHomeError>> + Send;
}

/// The full family of repositories behind one storage backend.
///
/// Services are generic over a single `Storage` instead of one parameter per
/// repository. Implementations are expected to be cheap to clone.
pub trait Storage: Clone + Send + Sync + 'static {
    type Houses: HouseRepository + Send + Sync;
    type Rooms: RoomRepository + Send + Sync;
    type DeviceTypes: DeviceTypeRepository + Send + Sync;
    type Devices: DeviceRepository + Send + Sync;
    type SensorTypes: SensorTypeRepository + Send + Sync;
    type SensorModels: SensorModelRepository + Send + Sync;
    type Sensors: SensorRepository + Send + Sync;
    type Readings: ReadingRepository + Send + Sync;
    type ActuatorTypes: ActuatorTypeRepository + Send + Sync;
    type ActuatorModels: ActuatorModelRepository + Send + Sync;
    type Actuators: ActuatorRepository + Send + Sync;

    fn houses(&self) -> &Self::Houses;
    fn rooms(&self) -> &Self::Rooms;
    fn device_types(&self) -> &Self::DeviceTypes;
    fn devices(&self) -> &Self::Devices;
    fn sensor_types(&self) -> &Self::SensorTypes;
    fn sensor_models(&self) -> &Self::SensorModels;
    fn sensors(&self) -> &Self::Sensors;
    fn readings(&self) -> &Self::Readings;
    fn actuator_types(&self) -> &Self::ActuatorTypes;
    fn actuator_models(&self) -> &Self::ActuatorModels;
    fn actuators(&self) -> &Self::Actuators;
}
