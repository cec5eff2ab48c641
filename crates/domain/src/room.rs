//! Room — a space inside a house that holds devices.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{HouseName, RoomId};

/// A room on a given floor of a house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub house_name: HouseName,
    pub floor: i32,
    pub dimensions: Dimensions,
}

/// Width, height and length of a room, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

impl Dimensions {
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveDimension`] naming the first
    /// dimension that is not strictly positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (dimension, value) in [
            ("width", self.width),
            ("height", self.height),
            ("length", self.length),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ValidationError::NonPositiveDimension { dimension, value });
            }
        }
        Ok(())
    }
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `name` is blank, or the
    /// dimension error from [`Dimensions::validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.dimensions.validate()
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    house_name: Option<HouseName>,
    floor: i32,
    dimensions: Option<Dimensions>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn house_name(mut self, house_name: HouseName) -> Self {
        self.house_name = Some(house_name);
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    #[must_use]
    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if the name or the house name is
    /// missing, and [`ValidationError::NonPositiveDimension`] if dimensions are
    /// missing or not strictly positive.
    pub fn build(self) -> Result<Room, ValidationError> {
        let house_name = self.house_name.ok_or(ValidationError::EmptyName)?;
        let dimensions = self
            .dimensions
            .ok_or(ValidationError::NonPositiveDimension {
                dimension: "width",
                value: 0.0,
            })?;
        let room = Room {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            house_name,
            floor: self.floor,
            dimensions,
        };
        room.validate()?;
        Ok(room)
    }
}
