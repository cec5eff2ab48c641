//! Room service — use-cases for rooms inside houses.

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{HouseName, RoomId};
use smarthome_domain::room::{Dimensions, Room};

use crate::ports::{HouseRepository, RoomRepository, Storage};
use crate::services::found;

/// Application service for rooms.
pub struct RoomService<S> {
    storage: S,
}

impl<S: Storage> RoomService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Add a room to an existing house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the house does not exist,
    /// [`SmartHomeError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, dimensions), fields(house = %house_name))]
    pub async fn add_room(
        &self,
        house_name: HouseName,
        name: String,
        floor: i32,
        dimensions: Dimensions,
    ) -> Result<Room, SmartHomeError> {
        let house = self.storage.houses().get_by_name(&house_name).await?;
        found(house, "House", &house_name)?;

        let room = Room::builder()
            .name(name)
            .house_name(house_name)
            .floor(floor)
            .dimensions(dimensions)
            .build()?;
        self.storage.rooms().create(room).await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no room has `id`.
    #[tracing::instrument(skip(self))]
    pub async fn get_room(&self, id: RoomId) -> Result<Room, SmartHomeError> {
        let room = self.storage.rooms().get_by_id(id).await?;
        found(room, "Room", id)
    }

    /// List all rooms.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, SmartHomeError> {
        self.storage.rooms().get_all().await
    }

    /// List the rooms of one house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the house does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn list_rooms_in_house(
        &self,
        house_name: &HouseName,
    ) -> Result<Vec<Room>, SmartHomeError> {
        let house = self.storage.houses().get_by_name(house_name).await?;
        found(house, "House", house_name)?;
        self.storage.rooms().find_by_house(house_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStorage;
    use smarthome_domain::error::ValidationError;
    use smarthome_domain::house::{Address, Country, Gps, House, Location};

    fn dims() -> Dimensions {
        Dimensions {
            width: 4.0,
            height: 2.7,
            length: 5.0,
        }
    }

    fn house_name() -> HouseName {
        HouseName::new("Casa").unwrap()
    }

    async fn make_service() -> RoomService<InMemoryStorage> {
        let storage = InMemoryStorage::default();
        let house = House::new(
            house_name(),
            Location {
                address: Address {
                    street: "Rua Direita".to_string(),
                    number: "3".to_string(),
                    zip_code: "1000-001".to_string(),
                    city: "Lisboa".to_string(),
                    country: Country::Portugal,
                },
                gps: Gps {
                    latitude: 38.7,
                    longitude: -9.1,
                },
            },
        )
        .unwrap();
        storage.houses().create(house).await.unwrap();
        RoomService::new(storage)
    }

    #[tokio::test]
    async fn should_add_room_when_house_exists() {
        let svc = make_service().await;

        let room = svc
            .add_room(house_name(), "Kitchen".to_string(), 0, dims())
            .await
            .unwrap();

        let fetched = svc.get_room(room.id).await.unwrap();
        assert_eq!(fetched.name, "Kitchen");
        assert_eq!(fetched.house_name, house_name());
    }

    #[tokio::test]
    async fn should_return_not_found_when_house_missing() {
        let svc = make_service().await;

        let result = svc
            .add_room(
                HouseName::new("Other").unwrap(),
                "Kitchen".to_string(),
                0,
                dims(),
            )
            .await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_room_with_negative_width() {
        let svc = make_service().await;

        let result = svc
            .add_room(
                house_name(),
                "Hall".to_string(),
                1,
                Dimensions {
                    width: -1.0,
                    ..dims()
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(SmartHomeError::Validation(
                ValidationError::NonPositiveDimension { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn should_list_rooms_of_house() {
        let svc = make_service().await;
        svc.add_room(house_name(), "Kitchen".to_string(), 0, dims())
            .await
            .unwrap();
        svc.add_room(house_name(), "Bedroom".to_string(), 1, dims())
            .await
            .unwrap();

        let rooms = svc.list_rooms_in_house(&house_name()).await.unwrap();
        let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Kitchen", "Bedroom"]);
        assert_eq!(svc.list_rooms().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_return_not_found_when_room_missing() {
        let svc = make_service().await;
        let result = svc.get_room(RoomId::new()).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }
}
