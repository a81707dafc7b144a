//! Collection store: every record of one kind in a single backing file.
//!
//! The backing file is one JSON object mapping decimal-string ids to full
//! records (`{"0": {...}, "1": {...}}`). Ids are always exactly
//! `{0, …, n-1}` for a collection of `n` records; the invariant is
//! re-established on every mutation. Names stay unique as long as records
//! enter through [`CollectionStore::upsert`], which is the only insert
//! path.
//!
//! Ids are **positions, not stable identities**: deleting id `k` shifts
//! every record after it down by one. Callers that persist an id across a
//! delete will observe it pointing at a different record.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::errors::{StoreError, StoreResult};
use super::{persist_json, read_json};
use crate::config::{CollectionKind, ResourcePaths};
use crate::observability::Logger;

/// A record that lives in a dense-id collection.
///
/// The store owns id assignment; implementations only expose the embedded
/// `id` field for the store to rewrite.
pub trait CollectionRecord: Serialize + DeserializeOwned + Clone {
    /// Collection kind this record belongs to.
    const KIND: CollectionKind;

    /// Dense id within the collection, if one has been assigned.
    fn id(&self) -> Option<u32>;

    /// Overwrites the embedded id.
    fn assign_id(&mut self, id: u32);

    /// Natural key, unique within the collection.
    fn name(&self) -> &str;
}

/// File-backed, in-memory ordered collection of one record kind.
///
/// Construction loads the backing file or persists an empty one; every
/// mutation rewrites the whole file before returning (O(n) per mutation,
/// acceptable for the tens-to-hundreds of records these collections hold).
/// After a failed persist the in-memory state may be ahead of the file
/// until the next successful mutation.
///
/// An instance assumes it is the sole writer of its backing file. Two
/// instances on the same path race on every mutation and the last persist
/// wins.
pub struct CollectionStore<T: CollectionRecord> {
    path: PathBuf,
    records: Vec<T>,
    logger: Logger,
}

impl<T: CollectionRecord> CollectionStore<T> {
    /// Opens the collection for `T::KIND` under the given resource layout.
    ///
    /// Loads `<root>/<kind>_collection.json` when it exists; otherwise
    /// creates it holding an empty collection, so the file is always
    /// present after a successful open.
    ///
    /// # Errors
    ///
    /// `Io` on filesystem failure, `Corrupt` when the existing file is not
    /// a JSON object with dense decimal-string ids.
    pub fn open(paths: &ResourcePaths, logger: Logger) -> StoreResult<Self> {
        let path = paths.collection_file(T::KIND);
        let path_str = path.display().to_string();

        match Self::load_records(&path)? {
            Some(records) => {
                let count = records.len().to_string();
                logger.info(
                    "COLLECTION_LOADED",
                    &[
                        ("kind", T::KIND.as_str()),
                        ("path", &path_str),
                        ("records", &count),
                    ],
                );
                Ok(Self {
                    path,
                    records,
                    logger,
                })
            }
            None => {
                let store = Self {
                    path,
                    records: Vec::new(),
                    logger,
                };
                store.persist()?;
                store.logger.info(
                    "COLLECTION_INITIALIZED",
                    &[("kind", T::KIND.as_str()), ("path", &path_str)],
                );
                Ok(store)
            }
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `id`, or `None` when `id` is out of range.
    pub fn get(&self, id: u32) -> Option<&T> {
        self.records.get(id as usize)
    }

    /// Returns the first record whose name matches, in id order.
    ///
    /// Linear scan; names are unique within a collection, so "first" only
    /// matters for the iteration cost, not the result.
    pub fn get_by_name(&self, name: &str) -> Option<&T> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Iterates records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    /// Inserts a record, or updates in place when its name is taken.
    ///
    /// - empty collection: the record becomes id 0
    /// - unseen name: the record is appended at id `len`
    /// - seen name: the existing record with that name is replaced, keeping
    ///   its id; the id the caller put on `record` is ignored
    ///
    /// This is the only insert path, so two records can never share a name.
    /// Returns the stored record with its assigned id.
    ///
    /// # Errors
    ///
    /// `Io` when the rewrite of the backing file fails.
    pub fn upsert(&mut self, mut record: T) -> StoreResult<T> {
        let existing = self
            .records
            .iter()
            .position(|r| r.name() == record.name());

        match existing {
            Some(pos) => self.update(pos as u32, record),
            None => {
                let id = self.records.len() as u32;
                record.assign_id(id);
                self.records.push(record.clone());
                self.persist()?;
                let id_str = id.to_string();
                self.logger.trace(
                    "RECORD_ADDED",
                    &[
                        ("kind", T::KIND.as_str()),
                        ("id", &id_str),
                        ("name", record.name()),
                    ],
                );
                Ok(record)
            }
        }
    }

    /// Replaces the record at `id` wholesale.
    ///
    /// The embedded id of `record` is set to `id`; no field-level merging
    /// happens. Unlike [`CollectionStore::upsert`] this path does not
    /// check names, so renaming onto a name another record holds leaves
    /// two records answering to it ([`CollectionStore::get_by_name`] then
    /// returns the lower id).
    ///
    /// # Errors
    ///
    /// `InvalidId` when `id >= len` (the collection is left untouched),
    /// `Io` when the rewrite fails.
    pub fn update(&mut self, id: u32, mut record: T) -> StoreResult<T> {
        let idx = id as usize;
        if idx >= self.records.len() {
            return Err(StoreError::InvalidId {
                id,
                len: self.records.len(),
            });
        }

        record.assign_id(id);
        self.records[idx] = record.clone();
        self.persist()?;
        let id_str = id.to_string();
        self.logger.trace(
            "RECORD_UPDATED",
            &[
                ("kind", T::KIND.as_str()),
                ("id", &id_str),
                ("name", record.name()),
            ],
        );
        Ok(record)
    }

    /// Removes the record at `id` and compacts the id range.
    ///
    /// Every surviving record after `id` shifts down one position and has
    /// its embedded id rewritten, so the ids are again exactly
    /// `{0, …, n-2}`. Any id a caller captured before the delete may now
    /// point at a different record.
    ///
    /// Returns the removed record, or `None` when `id` was out of range
    /// (a no-op, nothing is persisted).
    ///
    /// # Errors
    ///
    /// `Io` when the rewrite fails.
    pub fn remove(&mut self, id: u32) -> StoreResult<Option<T>> {
        let idx = id as usize;
        if idx >= self.records.len() {
            return Ok(None);
        }

        let removed = self.records.remove(idx);
        for (pos, record) in self.records.iter_mut().enumerate().skip(idx) {
            record.assign_id(pos as u32);
        }
        self.persist()?;
        let id_str = id.to_string();
        let remaining = self.records.len().to_string();
        self.logger.trace(
            "RECORD_REMOVED",
            &[
                ("kind", T::KIND.as_str()),
                ("id", &id_str),
                ("remaining", &remaining),
            ],
        );
        Ok(Some(removed))
    }

    /// Rewrites the backing file from the in-memory collection.
    fn persist(&self) -> StoreResult<()> {
        persist_json(&self.path, &CollectionFile(&self.records))
    }

    /// Loads and orders the backing file, or `None` when it is absent.
    ///
    /// Keys must parse as integers and form exactly `{0, …, n-1}`. Each
    /// record's embedded id is normalized to its key, so files written by
    /// older tools without embedded ids load cleanly.
    fn load_records(path: &Path) -> StoreResult<Option<Vec<T>>> {
        let raw: std::collections::BTreeMap<String, T> = match read_json(path)? {
            Some(map) => map,
            None => return Ok(None),
        };

        let mut entries: Vec<(u32, T)> = Vec::with_capacity(raw.len());
        for (key, record) in raw {
            let id: u32 = key.parse().map_err(|_| {
                StoreError::corrupt(path, format!("non-numeric id key '{}'", key))
            })?;
            entries.push((id, record));
        }

        // BTreeMap iterates lexicographically ("10" < "2"); the numeric
        // sort restores true id order before the density check
        entries.sort_by_key(|(id, _)| *id);

        for (expected, (id, _)) in entries.iter().enumerate() {
            if *id as usize != expected {
                return Err(StoreError::corrupt(
                    path,
                    format!("ids are not dense: expected {}, found {}", expected, id),
                ));
            }
        }

        let records = entries
            .into_iter()
            .map(|(id, mut record)| {
                record.assign_id(id);
                record
            })
            .collect();

        Ok(Some(records))
    }
}

/// Serializes a record slice as the on-disk map shape, emitting keys in
/// numeric order (serde_json's default map would re-sort them
/// lexicographically).
struct CollectionFile<'a, T: Serialize>(&'a [T]);

impl<'a, T: Serialize> Serialize for CollectionFile<'a, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, record) in self.0.iter().enumerate() {
            map.serialize_entry(&id.to_string(), record)?;
        }
        map.end()
    }
}
