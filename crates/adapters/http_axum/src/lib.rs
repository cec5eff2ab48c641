//! # smarthome-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** for houses, rooms, devices, sensors,
//!   readings and the catalogs (`/api/houses`, `/api/devices`, …)
//! - Expose the aggregation engine (`/api/readings/peak-power-consumption`,
//!   `/api/readings/max-temperature-difference`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `smarthome-app` (for port traits and services) and
//! `smarthome-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
