//! Reading service — recording readings and the periodic aggregation engine.
//!
//! Two aggregations run over stored readings:
//! - the maximum instantaneous temperature difference between two devices,
//!   pairing readings taken within `delta` seconds of each other;
//! - the peak power consumption, where the period is cut into windows of
//!   `delta` seconds and each window sums the average of every grid-meter and
//!   power-source sensor.

use std::collections::BTreeMap;

use smarthome_domain::aggregation;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, DeviceTypeName, ReadingId, SensorId, SensorModelName};
use smarthome_domain::period::{Delta, Period, PeriodError};
use smarthome_domain::reading::Reading;
use smarthome_domain::time::{self, Timestamp};

use crate::ports::{DeviceRepository, ReadingRepository, SensorRepository, Storage};
use crate::services::found;

/// Names and tolerance the aggregations run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Simultaneity tolerance, also used as the window length.
    pub delta: Delta,
    pub temperature_sensor_model: SensorModelName,
    pub power_sensor_model: SensorModelName,
    pub grid_meter_device_type: DeviceTypeName,
    pub power_source_meter_device_type: DeviceTypeName,
}

/// Why an aggregation produced no value.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("invalid period: {0}")]
    InvalidPeriod(#[from] PeriodError),

    #[error("no device of type {0}")]
    MissingDevice(DeviceTypeName),

    #[error("device {0} has no matching sensor")]
    MissingSensors(DeviceId),

    #[error("no readings in the requested period")]
    NoReadings,

    #[error("no pair of readings within the tolerance")]
    NoReadingsWithinTolerance,

    #[error("no window with positive consumption")]
    NoPositivePeak,

    #[error(transparent)]
    Repository(#[from] SmartHomeError),
}

/// Application service for readings and aggregations.
pub struct ReadingService<S> {
    storage: S,
    config: AggregationConfig,
}

impl<S: Storage> ReadingService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S, config: AggregationConfig) -> Self {
        Self { storage, config }
    }

    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Record a reading for an existing sensor.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown sensor and
    /// [`SmartHomeError::Validation`] for a non-finite value.
    #[tracing::instrument(skip(self))]
    pub async fn add_reading(
        &self,
        sensor_id: SensorId,
        value: f64,
        recorded_at: Option<Timestamp>,
    ) -> Result<Reading, SmartHomeError> {
        let sensor = self.storage.sensors().get_by_id(sensor_id).await?;
        found(sensor, "Sensor", sensor_id)?;

        let mut builder = Reading::builder().sensor_id(sensor_id).value(value);
        if let Some(at) = recorded_at {
            builder = builder.recorded_at(at);
        }
        let reading = builder.build()?;
        self.storage.readings().create(reading).await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no reading has `id`.
    #[tracing::instrument(skip(self))]
    pub async fn get_reading(&self, id: ReadingId) -> Result<Reading, SmartHomeError> {
        let reading = self.storage.readings().get_by_id(id).await?;
        found(reading, "Reading", id)
    }

    /// Most recent reading of a sensor.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the sensor is unknown or has
    /// never reported.
    #[tracing::instrument(skip(self))]
    pub async fn latest_reading(&self, sensor_id: SensorId) -> Result<Reading, SmartHomeError> {
        let sensor = self.storage.sensors().get_by_id(sensor_id).await?;
        found(sensor, "Sensor", sensor_id)?;
        let reading = self
            .storage
            .readings()
            .find_latest_by_sensor(sensor_id)
            .await?;
        found(reading, "Reading of sensor", sensor_id)
    }

    /// Readings of every sensor of a device within a period, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] for an invalid period and
    /// [`SmartHomeError::NotFound`] for an unknown device.
    #[tracing::instrument(skip(self))]
    pub async fn readings_for_device(
        &self,
        device_id: DeviceId,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Vec<Reading>, SmartHomeError> {
        let period = Period::new(start, end, time::now())
            .map_err(smarthome_domain::error::ValidationError::from)?;
        let device = self.storage.devices().get_by_id(device_id).await?;
        found(device, "Device", device_id)?;

        let mut readings = Vec::new();
        for sensor in self.storage.sensors().find_by_device(device_id).await? {
            readings.extend(
                self.storage
                    .readings()
                    .find_by_sensor_in_period(sensor.id, period.start(), period.end())
                    .await?,
            );
        }
        readings.sort_by_key(|r| r.recorded_at);
        Ok(readings)
    }

    /// Ids of [`readings_for_device`](Self::readings_for_device).
    ///
    /// # Errors
    ///
    /// Same as [`readings_for_device`](Self::readings_for_device).
    #[tracing::instrument(skip(self))]
    pub async fn reading_ids_for_device(
        &self,
        device_id: DeviceId,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Vec<ReadingId>, SmartHomeError> {
        let period = Period::new(start, end, time::now())
            .map_err(smarthome_domain::error::ValidationError::from)?;
        let device = self.storage.devices().get_by_id(device_id).await?;
        found(device, "Device", device_id)?;

        let mut ids = Vec::new();
        for sensor in self.storage.sensors().find_by_device(device_id).await? {
            ids.extend(
                self.storage
                    .readings()
                    .find_ids_by_sensor_in_period(sensor.id, period.start(), period.end())
                    .await?,
            );
        }
        Ok(ids)
    }

    /// Largest temperature gap between two devices over readings taken within
    /// `delta` seconds of each other.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidPeriod`] for a bad period,
    /// [`AggregationError::MissingSensors`] when a device has no temperature
    /// sensor, [`AggregationError::NoReadings`] when either side reported
    /// nothing, and [`AggregationError::NoReadingsWithinTolerance`] when no
    /// pair was close enough in time.
    #[tracing::instrument(skip(self))]
    pub async fn max_instant_temperature_difference(
        &self,
        device_a: DeviceId,
        device_b: DeviceId,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<f64, AggregationError> {
        let period = Period::new(start, end, time::now())?;
        let model = &self.config.temperature_sensor_model;

        let sensors_a = self.sensor_ids(device_a, model).await?;
        let sensors_b = self.sensor_ids(device_b, model).await?;

        let readings_a = self.readings_in(&sensors_a, period.start(), period.end()).await?;
        let readings_b = self.readings_in(&sensors_b, period.start(), period.end()).await?;
        if readings_a.is_empty() || readings_b.is_empty() {
            return Err(AggregationError::NoReadings);
        }
        tracing::debug!(
            left = readings_a.len(),
            right = readings_b.len(),
            "comparing temperature readings"
        );

        aggregation::max_instant_difference(&readings_a, &readings_b, self.config.delta)
            .ok_or(AggregationError::NoReadingsWithinTolerance)
    }

    /// Highest total power consumption over the windows of a period.
    ///
    /// Only the first grid-meter device is read. Power-source meters are
    /// optional and all of them are read. A grid meter without a power sensor
    /// contributes nothing to the totals.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidPeriod`] for a bad period,
    /// [`AggregationError::MissingDevice`] when there is no grid meter, and
    /// [`AggregationError::NoPositivePeak`] when every window totals zero.
    #[tracing::instrument(skip(self))]
    pub async fn peak_power_consumption(
        &self,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<f64, AggregationError> {
        let period = Period::new(start, end, time::now())?;
        let config = &self.config;

        let grid_meters = self
            .storage
            .devices()
            .find_ids_by_device_type(&config.grid_meter_device_type)
            .await?;
        let Some(&grid_meter) = grid_meters.first() else {
            return Err(AggregationError::MissingDevice(
                config.grid_meter_device_type.clone(),
            ));
        };
        if grid_meters.len() > 1 {
            tracing::warn!(
                count = grid_meters.len(),
                used = %grid_meter,
                "several grid meters found, using the first one"
            );
        }

        let power_sources = self
            .storage
            .devices()
            .find_ids_by_device_type(&config.power_source_meter_device_type)
            .await?;
        let mut sensors = Vec::new();
        for device_id in std::iter::once(grid_meter).chain(power_sources) {
            sensors.extend(
                self.storage
                    .sensors()
                    .find_ids_by_device_and_model(device_id, &config.power_sensor_model)
                    .await?,
            );
        }

        tracing::debug!(sensors = sensors.len(), "computing peak power consumption");

        let mut totals = Vec::new();
        for window in period.split(config.delta) {
            let mut averages = BTreeMap::new();
            for &sensor_id in &sensors {
                let readings = self
                    .storage
                    .readings()
                    .find_by_sensor_in_period(sensor_id, window.start, window.end)
                    .await?;
                averages.insert(sensor_id, aggregation::average(&readings));
            }
            totals.push(aggregation::window_total(&averages));
        }

        aggregation::peak(totals).ok_or(AggregationError::NoPositivePeak)
    }

    /// Sensor ids of a device for a model, failing when there are none.
    async fn sensor_ids(
        &self,
        device_id: DeviceId,
        model: &SensorModelName,
    ) -> Result<Vec<SensorId>, AggregationError> {
        let ids = self
            .storage
            .sensors()
            .find_ids_by_device_and_model(device_id, model)
            .await?;
        if ids.is_empty() {
            return Err(AggregationError::MissingSensors(device_id));
        }
        Ok(ids)
    }

    async fn readings_in(
        &self,
        sensors: &[SensorId],
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Reading>, SmartHomeError> {
        let mut readings = Vec::new();
        for &sensor_id in sensors {
            readings.extend(
                self.storage
                    .readings()
                    .find_by_sensor_in_period(sensor_id, start, end)
                    .await?,
            );
        }
        Ok(readings)
    }
}
