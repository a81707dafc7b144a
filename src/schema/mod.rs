//! Schema registry and type resolution for robostore
//!
//! Captured payloads arrive untyped. This module decides which registered
//! record shape a payload is, by comparing the payload's field names
//! against each schema's field set, then decodes it through that shape.
//!
//! # Design Principles
//!
//! - Scoring looks at field names only, never at values
//! - Resolution is deterministic: same registry, same input, same answer
//! - Registration order breaks ties, so it is part of the contract
//! - Decode is all-or-nothing; a matched-but-invalid payload is an error

mod errors;
mod registry;
mod resolver;
mod types;

pub use errors::{ResolveError, ResolveResult};
pub use registry::{SchemaEntry, SchemaRegistry};
pub use resolver::{Resolved, TypeResolver};
pub use types::Schema;
