//! Reading — an immutable, timestamped measurement produced by a sensor.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{ReadingId, SensorId};
use crate::time::Timestamp;

/// A single numeric measurement taken by a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: ReadingId,
    pub sensor_id: SensorId,
    pub value: f64,
    pub recorded_at: Timestamp,
}

impl Reading {
    /// Create a builder for constructing a [`Reading`].
    #[must_use]
    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteReading`] for `NaN` or infinite values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.value.is_finite() {
            return Err(ValidationError::NonFiniteReading);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Reading`].
#[derive(Debug, Default)]
pub struct ReadingBuilder {
    id: Option<ReadingId>,
    sensor_id: Option<SensorId>,
    value: f64,
    recorded_at: Option<Timestamp>,
}

impl ReadingBuilder {
    #[must_use]
    pub fn id(mut self, id: ReadingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn sensor_id(mut self, sensor_id: SensorId) -> Self {
        self.sensor_id = Some(sensor_id);
        self
    }

    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn recorded_at(mut self, recorded_at: Timestamp) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Consume the builder, validate, and return a [`Reading`].
    ///
    /// A missing timestamp defaults to the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteReading`] if the value is not finite.
    pub fn build(self) -> Result<Reading, ValidationError> {
        let reading = Reading {
            id: self.id.unwrap_or_default(),
            sensor_id: self.sensor_id.unwrap_or_default(),
            value: self.value,
            recorded_at: self.recorded_at.unwrap_or_else(crate::time::now),
        };
        reading.validate()?;
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_build_reading_with_all_fields() {
        let sensor_id = SensorId::new();
        let at = now();
        let reading = Reading::builder()
            .sensor_id(sensor_id)
            .value(21.5)
            .recorded_at(at)
            .build()
            .unwrap();

        assert_eq!(reading.sensor_id, sensor_id);
        assert!((reading.value - 21.5).abs() < f64::EPSILON);
        assert_eq!(reading.recorded_at, at);
    }

    #[test]
    fn should_reject_nan_value() {
        let result = Reading::builder().value(f64::NAN).build();
        assert_eq!(result, Err(ValidationError::NonFiniteReading));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let reading = Reading::builder().value(3.0).build().unwrap();
        let json = serde_json::to_string(&reading).unwrap();
        let parsed: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reading);
    }
}
