//! # smarthome-domain
//!
//! Pure domain model for the smarthome backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Houses** (named, located aggregates owning rooms)
//! - Define **Rooms**, **Devices**, **Sensors** and **Actuators**, plus the
//!   device-type, sensor-type/model and actuator-type/model catalogs
//! - Define **Readings** (immutable timestamped measurements)
//! - Validate **Periods** and split them into windows
//! - Provide the pure **aggregation** functions used by the reading service
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod period;
pub mod time;

pub mod actuator;
pub mod aggregation;
pub mod device;
pub mod house;
pub mod reading;
pub mod room;
pub mod sensor;
