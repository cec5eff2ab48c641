//! Fixtures shared by the repository tests.

use sqlx::SqlitePool;

use smarthome_app::ports::{DeviceRepository, HouseRepository, RoomRepository, SensorRepository};
use smarthome_domain::device::Device;
use smarthome_domain::house::{Address, Country, Gps, House, Location};
use smarthome_domain::id::{DeviceTypeName, HouseName, SensorModelName};
use smarthome_domain::room::{Dimensions, Room};
use smarthome_domain::sensor::Sensor;

use crate::device_repo::SqliteDeviceRepository;
use crate::house_repo::SqliteHouseRepository;
use crate::pool::Config;
use crate::room_repo::SqliteRoomRepository;
use crate::sensor_repo::SqliteSensorRepository;

pub(crate) async fn pool() -> SqlitePool {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .unwrap();
    db.pool().clone()
}

pub(crate) fn house(name: &str) -> House {
    House::new(
        HouseName::new(name).unwrap(),
        Location {
            address: Address {
                street: "Rua das Flores".to_string(),
                number: "10".to_string(),
                zip_code: "4050-262".to_string(),
                city: "Porto".to_string(),
                country: Country::Portugal,
            },
            gps: Gps {
                latitude: 41.14,
                longitude: -8.61,
            },
        },
    )
    .unwrap()
}

/// Insert a house and one room in it.
pub(crate) async fn room(pool: &SqlitePool) -> Room {
    let house = house("Casa");
    let house_name = house.name.clone();
    if SqliteHouseRepository::new(pool.clone())
        .get_by_name(&house_name)
        .await
        .unwrap()
        .is_none()
    {
        SqliteHouseRepository::new(pool.clone())
            .create(house)
            .await
            .unwrap();
    }
    let room = Room::builder()
        .name("Living room")
        .house_name(house_name)
        .dimensions(Dimensions {
            width: 5.0,
            height: 2.6,
            length: 6.0,
        })
        .build()
        .unwrap();
    SqliteRoomRepository::new(pool.clone())
        .create(room)
        .await
        .unwrap()
}

/// Insert a device of `device_type`, with its room and house.
pub(crate) async fn device(pool: &SqlitePool, device_type: &str) -> Device {
    let room = room(pool).await;
    let device = Device::builder()
        .name(device_type)
        .device_type(DeviceTypeName::new(device_type).unwrap())
        .room_id(room.id)
        .build()
        .unwrap();
    SqliteDeviceRepository::new(pool.clone())
        .create(device)
        .await
        .unwrap()
}

/// Insert a sensor of `model` on a fresh device.
pub(crate) async fn sensor(pool: &SqlitePool, model: &str) -> Sensor {
    let device = device(pool, "Meter").await;
    SqliteSensorRepository::new(pool.clone())
        .create(Sensor::new(
            device.id,
            SensorModelName::new(model).unwrap(),
        ))
        .await
        .unwrap()
}
