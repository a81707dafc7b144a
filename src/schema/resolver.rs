//! Field-similarity resolution of raw payloads to registered schemas.
//!
//! Resolution semantics:
//! - Every registered schema is scored by Jaccard similarity over field
//!   names; values are never inspected during scoring
//! - A score of exactly 1.0 is accepted immediately, skipping later entries
//! - Otherwise the highest score wins; ties go to the earlier registration
//! - A best score of zero means no schema is even a candidate
//! - The winning schema's typed decode is all-or-nothing

use serde_json::{Map, Value};

use super::errors::{ResolveError, ResolveResult};
use super::registry::{SchemaEntry, SchemaRegistry};
use crate::model::Document;

/// A successful resolution: which schema won, how well it matched, and the
/// decoded record.
#[derive(Debug)]
pub struct Resolved {
    /// Name of the winning schema.
    pub schema: &'static str,
    /// Jaccard similarity between the input's keys and the winning
    /// schema's field set.
    pub similarity: f64,
    /// The payload decoded through the winning schema.
    pub document: Document,
}

/// Resolves untyped payloads against a schema registry.
///
/// Resolution is a pure function of the registry and the input: it does
/// not log, does not mutate, and returns the same answer for the same
/// input every time. Because ties go to the earlier registration, the
/// registry's order is part of the resolver's contract.
pub struct TypeResolver<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver backed by the given registry.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Resolves a raw JSON object into a typed document.
    ///
    /// # Arguments
    ///
    /// * `input` - The payload's top-level object
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NoCandidate` when no registered schema
    /// shares a field with the input, and `ResolveError::Validation` when
    /// the winning schema's typed decode rejects the payload.
    pub fn resolve(&self, input: Map<String, Value>) -> ResolveResult<Resolved> {
        let keys: Vec<&str> = input.keys().map(String::as_str).collect();
        let (entry, similarity) = self.select(&keys).ok_or(ResolveError::NoCandidate)?;
        let schema = entry.name();

        let document = entry
            .decode(Value::Object(input))
            .map_err(|source| ResolveError::Validation { schema, source })?;

        Ok(Resolved {
            schema,
            similarity,
            document,
        })
    }

    /// Picks the best-scoring entry for the given key set.
    ///
    /// Returns `None` when every schema scores zero. An exact field match
    /// short-circuits the scan.
    fn select(&self, keys: &[&str]) -> Option<(&'a SchemaEntry, f64)> {
        let mut best: Option<(&SchemaEntry, f64)> = None;

        for entry in self.registry.iter() {
            let score = entry.schema().jaccard(keys);
            if score == 1.0 {
                return Some((entry, score));
            }
            let beats = match best {
                Some((_, top)) => score > top,
                None => score > 0.0,
            };
            if beats {
                best = Some((entry, score));
            }
        }

        best
    }
}
