//! In-memory repositories shared by the service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

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

use crate::ports::{
    ActuatorModelRepository, ActuatorRepository, ActuatorTypeRepository, DeviceRepository, DeviceTypeRepository, HouseRepository, ReadingRepository, RoomRepository,
    SensorModelRepository, SensorRepository, SensorTypeRepository, Storage,
};

/// Keyed store that remembers insertion order.
struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K: Clone + Eq + std::hash::Hash, V: Clone> Table<K, V> {
    fn upsert(&mut self, key: K, value: V) {
        if self.rows.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.rows.get(key).cloned()
    }

    fn values(&self) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|k| self.rows.get(k).cloned())
            .collect()
    }
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct InMemoryHouseRepo(Mutex<Table<HouseName, House>>);

impl HouseRepository for InMemoryHouseRepo {
    async fn create(&self, house: House) -> Result<House, SmartHomeError> {
        self.0
            .lock()
            .unwrap()
            .upsert(house.name.clone(), house.clone());
        Ok(house)
    }

    async fn get_by_name(&self, name: &HouseName) -> Result<Option<House>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(name))
    }

    async fn get_all(&self) -> Result<Vec<House>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }

    async fn update(&self, house: House) -> Result<House, SmartHomeError> {
        self.create(house).await
    }
}

#[derive(Default)]
pub struct InMemoryRoomRepo(Mutex<Table<RoomId, Room>>);

impl RoomRepository for InMemoryRoomRepo {
    async fn create(&self, room: Room) -> Result<Room, SmartHomeError> {
        self.0.lock().unwrap().upsert(room.id, room.clone());
        Ok(room)
    }

    async fn get_by_id(&self, id: RoomId) -> Result<Option<Room>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(&id))
    }

    async fn get_all(&self) -> Result<Vec<Room>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }

    async fn find_by_house(&self, house_name: &HouseName) -> Result<Vec<Room>, SmartHomeError> {
        let rooms = self.0.lock().unwrap().values();
        Ok(rooms
            .into_iter()
            .filter(|r| &r.house_name == house_name)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryDeviceTypeRepo(Mutex<Table<DeviceTypeName, DeviceType>>);

impl DeviceTypeRepository for InMemoryDeviceTypeRepo {
    async fn create(&self, device_type: DeviceType) -> Result<DeviceType, SmartHomeError> {
        self.0
            .lock()
            .unwrap()
            .upsert(device_type.name.clone(), device_type.clone());
        Ok(device_type)
    }

    async fn get_by_name(
        &self,
        name: &DeviceTypeName,
    ) -> Result<Option<DeviceType>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(name))
    }

    async fn get_all(&self) -> Result<Vec<DeviceType>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }
}

#[derive(Default)]
pub struct InMemoryDeviceRepo(Mutex<Table<DeviceId, Device>>);

impl DeviceRepository for InMemoryDeviceRepo {
    async fn create(&self, device: Device) -> Result<Device, SmartHomeError> {
        self.0.lock().unwrap().upsert(device.id, device.clone());
        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(&id))
    }

    async fn get_all(&self) -> Result<Vec<Device>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }

    async fn update(&self, device: Device) -> Result<Device, SmartHomeError> {
        self.create(device).await
    }

    async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Device>, SmartHomeError> {
        let devices = self.0.lock().unwrap().values();
        Ok(devices.into_iter().filter(|d| d.room_id == room_id).collect())
    }

    async fn find_ids_by_device_type(
        &self,
        device_type: &DeviceTypeName,
    ) -> Result<Vec<DeviceId>, SmartHomeError> {
        let devices = self.0.lock().unwrap().values();
        Ok(devices
            .into_iter()
            .filter(|d| &d.device_type == device_type)
            .map(|d| d.id)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySensorTypeRepo(Mutex<Table<SensorTypeId, SensorType>>);

impl SensorTypeRepository for InMemorySensorTypeRepo {
    async fn create(&self, sensor_type: SensorType) -> Result<SensorType, SmartHomeError> {
        self.0
            .lock()
            .unwrap()
            .upsert(sensor_type.id.clone(), sensor_type.clone());
        Ok(sensor_type)
    }

    async fn get_by_id(&self, id: &SensorTypeId) -> Result<Option<SensorType>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(id))
    }

    async fn get_all(&self) -> Result<Vec<SensorType>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }
}

#[derive(Default)]
pub struct InMemorySensorModelRepo(Mutex<Table<SensorModelName, SensorModel>>);

impl SensorModelRepository for InMemorySensorModelRepo {
    async fn create(&self, model: SensorModel) -> Result<SensorModel, SmartHomeError> {
        self.0
            .lock()
            .unwrap()
            .upsert(model.name.clone(), model.clone());
        Ok(model)
    }

    async fn get_by_name(
        &self,
        name: &SensorModelName,
    ) -> Result<Option<SensorModel>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(name))
    }

    async fn get_all(&self) -> Result<Vec<SensorModel>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }

    async fn find_by_sensor_type(
        &self,
        sensor_type_id: &SensorTypeId,
    ) -> Result<Vec<SensorModel>, SmartHomeError> {
        let models = self.0.lock().unwrap().values();
        Ok(models
            .into_iter()
            .filter(|m| &m.sensor_type_id == sensor_type_id)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySensorRepo(Mutex<Table<SensorId, Sensor>>);

impl SensorRepository for InMemorySensorRepo {
    async fn create(&self, sensor: Sensor) -> Result<Sensor, SmartHomeError> {
        self.0.lock().unwrap().upsert(sensor.id, sensor.clone());
        Ok(sensor)
    }

    async fn get_by_id(&self, id: SensorId) -> Result<Option<Sensor>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(&id))
    }

    async fn get_all(&self) -> Result<Vec<Sensor>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }

    async fn find_by_device(&self, device_id: DeviceId) -> Result<Vec<Sensor>, SmartHomeError> {
        let sensors = self.0.lock().unwrap().values();
        Ok(sensors
            .into_iter()
            .filter(|s| s.device_id == device_id)
            .collect())
    }

    async fn find_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: &SensorModelName,
    ) -> Result<Vec<Sensor>, SmartHomeError> {
        let sensors = self.0.lock().unwrap().values();
        Ok(sensors
            .into_iter()
            .filter(|s| s.device_id == device_id && &s.model == model)
            .collect())
    }

    async fn find_ids_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: &SensorModelName,
    ) -> Result<Vec<SensorId>, SmartHomeError> {
        let sensors = self.find_by_device_and_model(device_id, model).await?;
        Ok(sensors.into_iter().map(|s| s.id).collect())
    }
}

#[derive(Default)]
pub struct InMemoryReadingRepo(Mutex<Vec<Reading>>);

impl InMemoryReadingRepo {
    fn in_period(&self, sensor_id: SensorId, start: Timestamp, end: Timestamp) -> Vec<Reading> {
        let mut readings: Vec<Reading> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.sensor_id == sensor_id && r.recorded_at >= start && r.recorded_at <= end)
            .cloned()
            .collect();
        readings.sort_by_key(|r| r.recorded_at);
        readings
    }
}

impl ReadingRepository for InMemoryReadingRepo {
    async fn create(&self, reading: Reading) -> Result<Reading, SmartHomeError> {
        self.0.lock().unwrap().push(reading.clone());
        Ok(reading)
    }

    async fn get_by_id(&self, id: ReadingId) -> Result<Option<Reading>, SmartHomeError> {
        Ok(self.0.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Reading>, SmartHomeError> {
        Ok(self.in_period(sensor_id, start, end))
    }

    async fn find_ids_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ReadingId>, SmartHomeError> {
        Ok(self
            .in_period(sensor_id, start, end)
            .into_iter()
            .map(|r| r.id)
            .collect())
    }

    async fn find_latest_by_sensor(
        &self,
        sensor_id: SensorId,
    ) -> Result<Option<Reading>, SmartHomeError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.sensor_id == sensor_id)
            .max_by_key(|r| r.recorded_at)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryActuatorTypeRepo(Mutex<Table<ActuatorTypeName, ActuatorType>>);

impl ActuatorTypeRepository for InMemoryActuatorTypeRepo {
    async fn create(&self, actuator_type: ActuatorType) -> Result<ActuatorType, SmartHomeError> {
        self.0
            .lock()
            .unwrap()
            .upsert(actuator_type.name.clone(), actuator_type.clone());
        Ok(actuator_type)
    }

    async fn get_by_name(
        &self,
        name: &ActuatorTypeName,
    ) -> Result<Option<ActuatorType>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(name))
    }

    async fn get_all(&self) -> Result<Vec<ActuatorType>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }
}

#[derive(Default)]
pub struct InMemoryActuatorModelRepo(Mutex<Table<ActuatorModelName, ActuatorModel>>);

impl ActuatorModelRepository for InMemoryActuatorModelRepo {
    async fn create(&self, model: ActuatorModel) -> Result<ActuatorModel, SmartHomeError> {
        self.0
            .lock()
            .unwrap()
            .upsert(model.name.clone(), model.clone());
        Ok(model)
    }

    async fn get_by_name(
        &self,
        name: &ActuatorModelName,
    ) -> Result<Option<ActuatorModel>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(name))
    }

    async fn get_all(&self) -> Result<Vec<ActuatorModel>, SmartHomeError> {
        Ok(self.0.lock().unwrap().values())
    }

    async fn find_by_actuator_type(
        &self,
        actuator_type: &ActuatorTypeName,
    ) -> Result<Vec<ActuatorModel>, SmartHomeError> {
        let models = self.0.lock().unwrap().values();
        Ok(models
            .into_iter()
            .filter(|m| &m.actuator_type == actuator_type)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryActuatorRepo(Mutex<Table<ActuatorId, Actuator>>);

impl ActuatorRepository for InMemoryActuatorRepo {
    async fn create(&self, actuator: Actuator) -> Result<Actuator, SmartHomeError> {
        self.0.lock().unwrap().upsert(actuator.id, actuator.clone());
        Ok(actuator)
    }

    async fn get_by_id(&self, id: ActuatorId) -> Result<Option<Actuator>, SmartHomeError> {
        Ok(self.0.lock().unwrap().get(&id))
    }

    async fn find_ids_by_device(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<ActuatorId>, SmartHomeError> {
        let actuators = self.0.lock().unwrap().values();
        Ok(actuators
            .into_iter()
            .filter(|a| a.device_id == device_id)
            .map(|a| a.id)
            .collect())
    }
}

/// Shared-state storage: clones see the same rows.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    houses: Arc<InMemoryHouseRepo>,
    rooms: Arc<InMemoryRoomRepo>,
    device_types: Arc<InMemoryDeviceTypeRepo>,
    devices: Arc<InMemoryDeviceRepo>,
    sensor_types: Arc<InMemorySensorTypeRepo>,
    sensor_models: Arc<InMemorySensorModelRepo>,
    sensors: Arc<InMemorySensorRepo>,
    readings: Arc<InMemoryReadingRepo>,
    actuator_types: Arc<InMemoryActuatorTypeRepo>,
    actuator_models: Arc<InMemoryActuatorModelRepo>,
    actuators: Arc<InMemoryActuatorRepo>,
}

impl Storage for InMemoryStorage {
    type Houses = InMemoryHouseRepo;
    type Rooms = InMemoryRoomRepo;
    type DeviceTypes = InMemoryDeviceTypeRepo;
    type Devices = InMemoryDeviceRepo;
    type SensorTypes = InMemorySensorTypeRepo;
    type SensorModels = InMemorySensorModelRepo;
    type Sensors = InMemorySensorRepo;
    type Readings = InMemoryReadingRepo;
    type ActuatorTypes = InMemoryActuatorTypeRepo;
    type ActuatorModels = InMemoryActuatorModelRepo;
    type Actuators = InMemoryActuatorRepo;

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
