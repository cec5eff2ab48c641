//! House — the root aggregate owning rooms, identified by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::HouseName;

/// A house and where it stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub name: HouseName,
    pub location: Location,
}

impl House {
    /// Create a house after validating its location.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the location is invalid.
    pub fn new(name: HouseName, location: Location) -> Result<Self, ValidationError> {
        location.validate()?;
        Ok(Self { name, location })
    }

    /// Replace the location of the house.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the new location is invalid; the
    /// house is left unchanged.
    pub fn configure_location(&mut self, location: Location) -> Result<(), ValidationError> {
        location.validate()?;
        self.location = location;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: Address,
    pub gps: Gps,
}

impl Location {
    /// # Errors
    ///
    /// Returns the first failing address or GPS predicate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.address.validate()?;
        self.gps.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub zip_code: String,
    pub city: String,
    pub country: Country,
}

impl Address {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank street or city,
    /// [`ValidationError::EmptyStreetNumber`] for a blank number and
    /// [`ValidationError::InvalidZipCode`] when the zip code does not follow
    /// the country format.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.street.trim().is_empty() || self.city.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.number.trim().is_empty() {
            return Err(ValidationError::EmptyStreetNumber);
        }
        if !self.country.accepts_zip_code(&self.zip_code) {
            return Err(ValidationError::InvalidZipCode {
                zip_code: self.zip_code.clone(),
                country: self.country.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gps {
    pub latitude: f64,
    pub longitude: f64,
}

impl Gps {
    /// # Errors
    ///
    /// Returns [`ValidationError::LatitudeOutOfRange`] or
    /// [`ValidationError::LongitudeOutOfRange`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Countries the system knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Country {
    UnitedStates,
    France,
    Portugal,
    Spain,
}

impl Country {
    pub const ALL: [Self; 4] = [Self::UnitedStates, Self::France, Self::Portugal, Self::Spain];

    /// Display names of every supported country.
    #[must_use]
    pub fn available() -> Vec<String> {
        Self::ALL.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::UnitedStates => "United States of America",
            Self::France => "France",
            Self::Portugal => "Portugal",
            Self::Spain => "Spain",
        }
    }

    /// Whether `zip_code` follows the postal format of this country.
    ///
    /// Portugal uses `dddd-ddd`; the others use five digits.
    #[must_use]
    pub fn accepts_zip_code(self, zip_code: &str) -> bool {
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        match self {
            Self::Portugal => match zip_code.split_once('-') {
                Some((head, tail)) => {
                    head.len() == 4 && tail.len() == 3 && all_digits(head) && all_digits(tail)
                }
                None => false,
            },
            Self::UnitedStates | Self::France | Self::Spain => {
                zip_code.len() == 5 && all_digits(zip_code)
            }
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Country {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|country| country.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnsupportedCountry(s.to_owned()))
    }
}

impl TryFrom<String> for Country {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Country> for String {
    fn from(value: Country) -> Self {
        value.display_name().to_owned()
    }
}
