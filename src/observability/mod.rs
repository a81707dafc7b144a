//! Observability for robostore.
//!
//! # Principles
//!
//! 1. Structured logs (JSON), one line per event
//! 2. Deterministic output (sorted fields, no timestamps)
//! 3. No side effects on store execution
//! 4. No async or background threads
//!
//! The logger is passed into store constructors as a value; there is no
//! module-level logging state.

mod logger;

pub use logger::{Logger, Severity};
