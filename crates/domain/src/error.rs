//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHomeError`] via `#[from]`.

use crate::period::PeriodError;

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflict")]
    Conflict(#[from] ConflictError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("street number must not be empty")]
    EmptyStreetNumber,

    #[error("unsupported country: {0}")]
    UnsupportedCountry(String),

    #[error("zip code {zip_code} does not match the format of {country}")]
    InvalidZipCode { zip_code: String, country: String },

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("{dimension} must be strictly positive, got {value}")]
    NonPositiveDimension { dimension: &'static str, value: f64 },

    #[error("reading value must be finite")]
    NonFiniteReading,

    #[error("device is already inactive")]
    DeviceAlreadyInactive,

    #[error("delta must be strictly positive")]
    ZeroDelta,

    #[error("invalid period")]
    InvalidPeriod(#[from] PeriodError),
}

/// A referenced aggregate does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An aggregate with the same identity already exists.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_validation_error_when_converted() {
        let err: SmartHomeError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            SmartHomeError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_describe_missing_aggregate() {
        let err = NotFoundError {
            entity: "Room",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Room abc not found");
    }

    #[test]
    fn should_wrap_period_error_as_validation() {
        let err: ValidationError = PeriodError::EndInFuture.into();
        assert_eq!(err, ValidationError::InvalidPeriod(PeriodError::EndInFuture));
    }
}
