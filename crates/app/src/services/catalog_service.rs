//! Catalog service — device types, sensor types and models, actuator types and models.
//!
//! Catalogs are reference data loaded at startup through [`CatalogService::seed`]
//! and read by the other services.

use smarthome_domain::actuator::{ActuatorModel, ActuatorType};
use smarthome_domain::device::DeviceType;
use smarthome_domain::error::{ConflictError, SmartHomeError};
use smarthome_domain::id::{
    ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId,
};
use smarthome_domain::sensor::{SensorModel, SensorType};

use crate::ports::{
    ActuatorModelRepository, ActuatorTypeRepository, DeviceTypeRepository, SensorModelRepository,
    SensorTypeRepository, Storage,
};
use crate::services::found;

/// Catalog entries to make sure exist.
#[derive(Debug, Clone, Default)]
pub struct CatalogSeed {
    pub device_types: Vec<DeviceTypeName>,
    pub sensor_types: Vec<SensorType>,
    pub sensor_models: Vec<SensorModel>,
    pub actuator_types: Vec<ActuatorTypeName>,
    pub actuator_models: Vec<ActuatorModel>,
}

/// How many entries [`CatalogService::seed`] actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub device_types: usize,
    pub sensor_types: usize,
    pub sensor_models: usize,
    pub actuator_types: usize,
    pub actuator_models: usize,
}

/// Application service for the catalogs.
pub struct CatalogService<S> {
    storage: S,
}

impl<S: Storage> CatalogService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Insert every seed entry that is not already present.
    ///
    /// Running it twice with the same seed inserts nothing the second time.
    /// Types are inserted before models so a model may refer to a type from
    /// the same seed.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when a sensor or actuator model
    /// refers to an unknown type, or a storage error.
    #[tracing::instrument(skip_all)]
    pub async fn seed(&self, seed: CatalogSeed) -> Result<SeedReport, SmartHomeError> {
        let mut report = SeedReport::default();

        for name in seed.device_types {
            if self.storage.device_types().get_by_name(&name).await?.is_none() {
                self.storage.device_types().create(DeviceType { name }).await?;
                report.device_types += 1;
            }
        }
        for sensor_type in seed.sensor_types {
            if self
                .storage
                .sensor_types()
                .get_by_id(&sensor_type.id)
                .await?
                .is_none()
            {
                self.storage.sensor_types().create(sensor_type).await?;
                report.sensor_types += 1;
            }
        }
        for model in seed.sensor_models {
            if self
                .storage
                .sensor_models()
                .get_by_name(&model.name)
                .await?
                .is_none()
            {
                self.add_sensor_model(model).await?;
                report.sensor_models += 1;
            }
        }
        for name in seed.actuator_types {
            if self
                .storage
                .actuator_types()
                .get_by_name(&name)
                .await?
                .is_none()
            {
                self.storage
                    .actuator_types()
                    .create(ActuatorType { name })
                    .await?;
                report.actuator_types += 1;
            }
        }
        for model in seed.actuator_models {
            if self
                .storage
                .actuator_models()
                .get_by_name(&model.name)
                .await?
                .is_none()
            {
                self.add_actuator_model(model).await?;
                report.actuator_models += 1;
            }
        }

        tracing::info!(
            device_types = report.device_types,
            sensor_types = report.sensor_types,
            sensor_models = report.sensor_models,
            actuator_types = report.actuator_types,
            actuator_models = report.actuator_models,
            "catalog seeded"
        );
        Ok(report)
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::Conflict`] when the type already exists.
    pub async fn add_device_type(&self, name: DeviceTypeName) -> Result<DeviceType, SmartHomeError> {
        let repo = self.storage.device_types();
        if repo.get_by_name(&name).await?.is_some() {
            return Err(ConflictError {
                entity: "DeviceType",
                id: name.to_string(),
            }
            .into());
        }
        repo.create(DeviceType { name }).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_device_types(&self) -> Result<Vec<DeviceType>, SmartHomeError> {
        self.storage.device_types().get_all().await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::Conflict`] when the type already exists.
    pub async fn add_sensor_type(&self, sensor_type: SensorType) -> Result<SensorType, SmartHomeError> {
        let repo = self.storage.sensor_types();
        if repo.get_by_id(&sensor_type.id).await?.is_some() {
            return Err(ConflictError {
                entity: "SensorType",
                id: sensor_type.id.to_string(),
            }
            .into());
        }
        repo.create(sensor_type).await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no sensor type has `id`.
    pub async fn get_sensor_type(&self, id: &SensorTypeId) -> Result<SensorType, SmartHomeError> {
        let sensor_type = self.storage.sensor_types().get_by_id(id).await?;
        found(sensor_type, "SensorType", id)
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_sensor_types(&self) -> Result<Vec<SensorType>, SmartHomeError> {
        self.storage.sensor_types().get_all().await
    }

    /// Register a sensor model measuring an existing sensor type.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the sensor type is unknown and
    /// [`SmartHomeError::Conflict`] when the model already exists.
    pub async fn add_sensor_model(&self, model: SensorModel) -> Result<SensorModel, SmartHomeError> {
        let sensor_type = self
            .storage
            .sensor_types()
            .get_by_id(&model.sensor_type_id)
            .await?;
        found(sensor_type, "SensorType", &model.sensor_type_id)?;

        let repo = self.storage.sensor_models();
        if repo.get_by_name(&model.name).await?.is_some() {
            return Err(ConflictError {
                entity: "SensorModel",
                id: model.name.to_string(),
            }
            .into());
        }
        repo.create(model).await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no sensor model has `name`.
    pub async fn get_sensor_model(&self, name: &SensorModelName) -> Result<SensorModel, SmartHomeError> {
        let model = self.storage.sensor_models().get_by_name(name).await?;
        found(model, "SensorModel", name)
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_sensor_models(&self) -> Result<Vec<SensorModel>, SmartHomeError> {
        self.storage.sensor_models().get_all().await
    }

    /// Models measuring the given sensor type.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the sensor type is unknown.
    pub async fn list_sensor_models_of_type(
        &self,
        sensor_type_id: &SensorTypeId,
    ) -> Result<Vec<SensorModel>, SmartHomeError> {
        self.get_sensor_type(sensor_type_id).await?;
        self.storage
            .sensor_models()
            .find_by_sensor_type(sensor_type_id)
            .await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no actuator type has `name`.
    pub async fn get_actuator_type(
        &self,
        name: &ActuatorTypeName,
    ) -> Result<ActuatorType, SmartHomeError> {
        let actuator_type = self.storage.actuator_types().get_by_name(name).await?;
        found(actuator_type, "ActuatorType", name)
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_actuator_types(&self) -> Result<Vec<ActuatorType>, SmartHomeError> {
        self.storage.actuator_types().get_all().await
    }

    /// Register an actuator model of an existing actuator type.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the actuator type is unknown
    /// and [`SmartHomeError::Conflict`] when the model already exists.
    pub async fn add_actuator_model(
        &self,
        model: ActuatorModel,
    ) -> Result<ActuatorModel, SmartHomeError> {
        self.get_actuator_type(&model.actuator_type).await?;

        let repo = self.storage.actuator_models();
        if repo.get_by_name(&model.name).await?.is_some() {
            return Err(ConflictError {
                entity: "ActuatorModel",
                id: model.name.to_string(),
            }
            .into());
        }
        repo.create(model).await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no actuator model has `name`.
    pub async fn get_actuator_model(
        &self,
        name: &ActuatorModelName,
    ) -> Result<ActuatorModel, SmartHomeError> {
        let model = self.storage.actuator_models().get_by_name(name).await?;
        found(model, "ActuatorModel", name)
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_actuator_models(&self) -> Result<Vec<ActuatorModel>, SmartHomeError> {
        self.storage.actuator_models().get_all().await
    }

    /// Models of the given actuator type.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the actuator type is unknown.
    pub async fn list_actuator_models_of_type(
        &self,
        actuator_type: &ActuatorTypeName,
    ) -> Result<Vec<ActuatorModel>, SmartHomeError> {
        self.get_actuator_type(actuator_type).await?;
        self.storage
            .actuator_models()
            .find_by_actuator_type(actuator_type)
            .await
    }
}
