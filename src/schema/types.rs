//! Schema descriptions for field-similarity scoring.
//!
//! A schema here is deliberately shallow: a name and the flat list of
//! serialized field names. Scoring never inspects values or nesting, only
//! which keys a payload carries.

use std::collections::BTreeSet;

/// A registered record shape: its name and serialized field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    name: &'static str,
    fields: &'static [&'static str],
}

impl Schema {
    /// Creates a schema over a static field list.
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self { name, fields }
    }

    /// Returns the schema name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the serialized field names, in declaration order.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Jaccard similarity between this schema's field set and `keys`.
    ///
    /// Both sides are treated as sets: duplicates and ordering in `keys`
    /// do not affect the score. Returns `|intersection| / |union|`, or
    /// `0.0` when both sides are empty.
    pub fn jaccard(&self, keys: &[&str]) -> f64 {
        let keys: BTreeSet<&str> = keys.iter().copied().collect();
        let fields: BTreeSet<&str> = self.fields.iter().copied().collect();

        let union = fields.union(&keys).count();
        if union == 0 {
            return 0.0;
        }
        let matched = fields.intersection(&keys).count();
        matched as f64 / union as f64
    }
}
