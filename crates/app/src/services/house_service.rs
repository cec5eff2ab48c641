//! House service — use-cases for houses and their locations.

use smarthome_domain::error::{ConflictError, SmartHomeError};
use smarthome_domain::house::{Country, House, Location};
use smarthome_domain::id::HouseName;

use crate::ports::{HouseRepository, Storage};
use crate::services::found;

/// Application service for houses.
pub struct HouseService<S> {
    storage: S,
}

impl<S: Storage> HouseService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Register a new house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Conflict`] when a house with the same name
    /// exists, [`SmartHomeError::Validation`] when the location is invalid, or
    /// a storage error.
    #[tracing::instrument(skip(self, location), fields(house = %name))]
    pub async fn add_house(
        &self,
        name: HouseName,
        location: Location,
    ) -> Result<House, SmartHomeError> {
        let repo = self.storage.houses();
        if repo.get_by_name(&name).await?.is_some() {
            return Err(ConflictError {
                entity: "House",
                id: name.to_string(),
            }
            .into());
        }
        let house = House::new(name, location)?;
        repo.create(house).await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no house has that name.
    #[tracing::instrument(skip(self))]
    pub async fn get_house(&self, name: &HouseName) -> Result<House, SmartHomeError> {
        let house = self.storage.houses().get_by_name(name).await?;
        found(house, "House", name)
    }

    /// List all houses.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_houses(&self) -> Result<Vec<House>, SmartHomeError> {
        self.storage.houses().get_all().await
    }

    /// Replace the location of an existing house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown house,
    /// [`SmartHomeError::Validation`] for an invalid location, or a storage error.
    #[tracing::instrument(skip(self, location))]
    pub async fn configure_location(
        &self,
        name: &HouseName,
        location: Location,
    ) -> Result<House, SmartHomeError> {
        let mut house = self.get_house(name).await?;
        house.configure_location(location)?;
        self.storage.houses().update(house).await
    }

    /// Names of the countries a house can be located in.
    #[must_use]
    pub fn available_countries(&self) -> Vec<String> {
        Country::available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStorage;
    use smarthome_domain::error::ValidationError;
    use smarthome_domain::house::{Address, Gps};

    fn make_service() -> HouseService<InMemoryStorage> {
        HouseService::new(InMemoryStorage::default())
    }

    fn paris() -> Location {
        Location {
            address: Address {
                street: "Rue de Rivoli".to_string(),
                number: "1".to_string(),
                zip_code: "75001".to_string(),
                city: "Paris".to_string(),
                country: Country::France,
            },
            gps: Gps {
                latitude: 48.86,
                longitude: 2.35,
            },
        }
    }

    fn name(value: &str) -> HouseName {
        HouseName::new(value).unwrap()
    }

    #[tokio::test]
    async fn should_add_house_when_name_is_free() {
        let svc = make_service();

        let house = svc.add_house(name("Maison"), paris()).await.unwrap();
        assert_eq!(house.name, name("Maison"));

        let fetched = svc.get_house(&name("Maison")).await.unwrap();
        assert_eq!(fetched, house);
    }

    #[tokio::test]
    async fn should_return_conflict_when_house_already_exists() {
        let svc = make_service();
        svc.add_house(name("Maison"), paris()).await.unwrap();

        let result = svc.add_house(name("Maison"), paris()).await;
        assert!(matches!(result, Err(SmartHomeError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_reject_house_with_invalid_zip_code() {
        let svc = make_service();
        let mut location = paris();
        location.address.zip_code = "7500".to_string();

        let result = svc.add_house(name("Maison"), location).await;
        assert!(matches!(
            result,
            Err(SmartHomeError::Validation(
                ValidationError::InvalidZipCode { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_house_missing() {
        let svc = make_service();
        let result = svc.get_house(&name("Nowhere")).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_configure_location_of_existing_house() {
        let svc = make_service();
        svc.add_house(name("Maison"), paris()).await.unwrap();

        let mut moved = paris();
        moved.address.city = "Lyon".to_string();
        moved.address.zip_code = "69001".to_string();
        svc.configure_location(&name("Maison"), moved.clone())
            .await
            .unwrap();

        let fetched = svc.get_house(&name("Maison")).await.unwrap();
        assert_eq!(fetched.location, moved);
    }

    #[tokio::test]
    async fn should_fail_to_configure_location_of_unknown_house() {
        let svc = make_service();
        let result = svc.configure_location(&name("Nowhere"), paris()).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_houses() {
        let svc = make_service();
        svc.add_house(name("A"), paris()).await.unwrap();
        svc.add_house(name("B"), paris()).await.unwrap();

        let all = svc.list_houses().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn should_list_four_available_countries() {
        assert_eq!(make_service().available_countries().len(), 4);
    }
}
