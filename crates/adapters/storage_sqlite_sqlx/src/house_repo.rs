//! `SQLite` implementation of [`HouseRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::HouseRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::{Address, Country, Gps, House, Location};
use smarthome_domain::id::HouseName;

use crate::codec::decode_error;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`House`].
struct Wrapper(House);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<House> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let name: String = row.try_get("name")?;
        let country: String = row.try_get("country")?;

        Ok(Self(House {
            name: HouseName::new(name).map_err(decode_error)?,
            location: Location {
                address: Address {
                    street: row.try_get("street")?,
                    number: row.try_get("number")?,
                    zip_code: row.try_get("zip_code")?,
                    city: row.try_get("city")?,
                    country: country.parse::<Country>().map_err(decode_error)?,
                },
                gps: Gps {
                    latitude: row.try_get("latitude")?,
                    longitude: row.try_get("longitude")?,
                },
            },
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO houses (name, street, number, zip_code, city, country, latitude, longitude)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_NAME: &str = "SELECT * FROM houses WHERE name = ?";
const SELECT_ALL: &str = "SELECT * FROM houses ORDER BY rowid";
const UPDATE: &str = r"
    UPDATE houses
    SET street = ?, number = ?, zip_code = ?, city = ?, country = ?, latitude = ?, longitude = ?
    WHERE name = ?
";

/// `SQLite`-backed house repository.
#[derive(Clone)]
pub struct SqliteHouseRepository {
    pool: SqlitePool,
}

impl SqliteHouseRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HouseRepository for SqliteHouseRepository {
    fn create(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let address = &house.location.address;
            sqlx::query(INSERT)
                .bind(house.name.as_str())
                .bind(&address.street)
                .bind(&address.number)
                .bind(&address.zip_code)
                .bind(&address.city)
                .bind(address.country.display_name())
                .bind(house.location.gps.latitude)
                .bind(house.location.gps.longitude)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(house)
        }
    }

    fn get_by_name(
        &self,
        name: &HouseName,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME)
                .bind(name)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<House>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let address = &house.location.address;
            sqlx::query(UPDATE)
                .bind(&address.street)
                .bind(&address.number)
                .bind(&address.zip_code)
                .bind(&address.city)
                .bind(address.country.display_name())
                .bind(house.location.gps.latitude)
                .bind(house.location.gps.longitude)
                .bind(house.name.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(house)
        }
    }
}
