//! robostore - Persistence layer for a screen-automation controller
//!
//! JSON-file stores for automation records (actions, tasks, schedules) and
//! captured screen artifacts, plus field-similarity resolution of untyped
//! capture payloads.

pub mod config;
pub mod model;
pub mod observability;
pub mod schema;
pub mod store;
