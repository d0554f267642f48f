//! The record store
//!
//! An insertion-ordered map of cells plus a dirty flag. Mutations only touch
//! memory; `save` writes the full snapshot when something changed and
//! `load_from_file` replaces the map with the persisted one.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::cell::Cell;
use super::codec;
use crate::error::Result;
use crate::persistence::{PersistenceBackend, SnapshotEnvelope};
use crate::platform::{PathResolver, record_file_path};
use crate::settings::StoreConfig;

/// Result of a `save` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed since the last save; no write happened
    Clean,
    /// Snapshot written, store is clean
    Written,
    /// Write failed, store is still dirty
    Failed,
}

/// Result of a `load_from_file` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Map replaced by the persisted snapshot
    Loaded { cells: usize },
    /// Nothing persisted yet; store untouched
    Missing,
    /// Snapshot unreadable or undecodable; store untouched
    Failed,
}

/// Typed key-value records persisted as one snapshot
#[derive(Debug)]
pub struct RecordStore<B: PersistenceBackend> {
    cells: IndexMap<String, Cell>,
    dirty: bool,
    backend: B,
    path: PathBuf,
}

impl<B: PersistenceBackend> RecordStore<B> {
    /// Empty, clean store persisting at the configured location
    pub fn new(backend: B, resolver: &dyn PathResolver, config: &StoreConfig) -> Self {
        Self::at_path(backend, record_file_path(resolver, config))
    }

    /// Empty, clean store persisting at `path`
    pub fn at_path(backend: B, path: impl Into<PathBuf>) -> Self {
        Self {
            cells: IndexMap::new(),
            dirty: false,
            backend,
            path: path.into(),
        }
    }

    /// Create a store and load whatever was persisted before
    pub fn open(backend: B, resolver: &dyn PathResolver, config: &StoreConfig) -> Self {
        let mut store = Self::new(backend, resolver, config);
        store.load_from_file();
        store
    }

    pub fn local_file_path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Cells in insertion order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    // === Typed access ===

    /// Stored string, or `default` if the key is absent
    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.cells
            .get(key)
            .map_or(default, |cell| cell.string_value())
    }

    /// Integer view, or `default` if the key is absent.
    ///
    /// A present value that does not parse is an error, never `default`.
    pub fn get_int(&self, key: &str, default: i32) -> Result<i32> {
        match self.cells.get(key) {
            Some(cell) => cell.int_value(),
            None => Ok(default),
        }
    }

    /// Float view, or `default` if the key is absent
    pub fn get_float(&self, key: &str, default: f32) -> Result<f32> {
        match self.cells.get(key) {
            Some(cell) => cell.float_value(),
            None => Ok(default),
        }
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        if let Some(cell) = self.cell_mut(key) {
            cell.set_string(value);
            self.dirty = true;
        }
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        if let Some(cell) = self.cell_mut(key) {
            cell.set_int(value);
            self.dirty = true;
        }
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        if let Some(cell) = self.cell_mut(key) {
            cell.set_float(value);
            self.dirty = true;
        }
    }

    /// Add `offset` to the integer view, starting from 0 when absent.
    ///
    /// Overflow wraps. Fails without touching the store if the current value
    /// is not an integer.
    pub fn add_int(&mut self, key: &str, offset: i32) -> Result<()> {
        let current = match self.cells.get(key) {
            Some(cell) => cell.int_value()?,
            None => 0,
        };
        if let Some(cell) = self.cell_mut(key) {
            cell.set_int(current.wrapping_add(offset));
            self.dirty = true;
        }
        Ok(())
    }

    /// Drop one record; returns whether it existed
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.cells.shift_remove(key).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Drop every record; the next `save` persists the empty map
    pub fn reset(&mut self) {
        self.cells.clear();
        self.dirty = true;
    }

    fn cell_mut(&mut self, key: &str) -> Option<&mut Cell> {
        if key.is_empty() {
            log::warn!("Ignoring write to record with empty key");
            return None;
        }
        Some(
            self.cells
                .entry(key.to_string())
                .or_insert_with(|| Cell::new(key)),
        )
    }

    // === Persistence ===

    /// Encoded text of the current map
    pub fn snapshot(&self) -> String {
        codec::encode(self.cells.values())
    }

    /// Write the full snapshot if anything changed since the last save
    pub fn save(&mut self) -> SaveOutcome {
        if !self.dirty {
            return SaveOutcome::Clean;
        }

        match self.write_snapshot() {
            Ok(()) => {
                self.dirty = false;
                log::info!(
                    "Saved {} records to {}",
                    self.cells.len(),
                    self.path.display()
                );
                SaveOutcome::Written
            }
            Err(e) => {
                log::error!("Failed to save records to {}: {}", self.path.display(), e);
                SaveOutcome::Failed
            }
        }
    }

    /// Replace the map with the persisted snapshot, if there is a usable one
    pub fn load_from_file(&mut self) -> LoadOutcome {
        match self.read_snapshot() {
            Ok(Some(cells)) => {
                let count = cells.len();
                self.cells = cells;
                self.dirty = false;
                log::info!("Loaded {} records from {}", count, self.path.display());
                LoadOutcome::Loaded { cells: count }
            }
            Ok(None) => {
                log::warn!("No record snapshot at {}", self.path.display());
                LoadOutcome::Missing
            }
            Err(e) => {
                log::warn!("Failed to load records from {}: {}", self.path.display(), e);
                LoadOutcome::Failed
            }
        }
    }

    fn write_snapshot(&mut self) -> Result<()> {
        let bytes = SnapshotEnvelope::new(self.snapshot()).to_bytes()?;
        self.backend.write(&self.path, &bytes)
    }

    fn read_snapshot(&self) -> Result<Option<IndexMap<String, Cell>>> {
        let Some(bytes) = self.backend.read(&self.path)? else {
            return Ok(None);
        };
        let envelope = SnapshotEnvelope::from_bytes(&bytes)?;
        codec::decode(envelope.text()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::persistence::MemoryBackend;

    const PATH: &str = "root/Record/dataRecord.bin";

    fn store() -> RecordStore<MemoryBackend> {
        RecordStore::at_path(MemoryBackend::new(), PATH)
    }

    fn store_with_blob(json: &str) -> RecordStore<MemoryBackend> {
        RecordStore::at_path(MemoryBackend::new().with_blob(PATH, json), PATH)
    }

    /// Fresh store reading whatever `store` persisted
    fn reopen(store: &RecordStore<MemoryBackend>) -> RecordStore<MemoryBackend> {
        let mut reopened = RecordStore::at_path(store.backend().clone(), PATH);
        reopened.load_from_file();
        reopened
    }

    #[test]
    fn test_default_on_miss_creates_nothing() {
        let mut s = store();
        assert_eq!(s.get_string("missing", "d"), "d");
        assert_eq!(s.get_int("missing", 7).unwrap(), 7);
        assert_eq!(s.get_float("missing", 1.5).unwrap(), 1.5);
        assert!(s.is_empty());
        assert_eq!(s.save(), SaveOutcome::Clean);
        assert_eq!(s.backend().writes(), 0);
    }

    #[test]
    fn test_set_then_get() {
        let mut s = store();
        s.set_int("score", 42);
        s.set_string("name", "Ana");
        s.set_float("volume", 0.75);
        assert_eq!(s.get_int("score", 0).unwrap(), 42);
        assert_eq!(s.get_string("name", ""), "Ana");
        assert_eq!(s.get_float("volume", 0.0).unwrap(), 0.75);
        assert!(s.is_dirty());
    }

    #[test]
    fn test_set_overwrites_across_types() {
        let mut s = store();
        s.set_string("k", "hello");
        s.set_int("k", 5);
        assert_eq!(s.get_string("k", ""), "5");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_add_int_creates_from_zero() {
        let mut s = store();
        s.add_int("hits", 3).unwrap();
        assert_eq!(s.get_int("hits", 0).unwrap(), 3);
        s.add_int("hits", -1).unwrap();
        assert_eq!(s.get_int("hits", 0).unwrap(), 2);
    }

    #[test]
    fn test_add_int_wraps_on_overflow() {
        let mut s = store();
        s.set_int("n", i32::MAX);
        s.add_int("n", 1).unwrap();
        assert_eq!(s.get_int("n", 0).unwrap(), i32::MIN);
    }

    #[test]
    fn test_add_int_on_non_integer_fails_without_mutation() {
        let mut s = store();
        s.set_string("name", "Ana");
        assert_eq!(s.save(), SaveOutcome::Written);

        let err = s.add_int("name", 1).unwrap_err();
        assert!(matches!(err, RecordError::ParseInt { .. }));
        assert_eq!(s.get_string("name", ""), "Ana");
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_numeric_parse_failure_is_not_defaulted() {
        let mut s = store();
        s.set_string("name", "Ana");
        assert!(s.get_int("name", 9).is_err());
        assert!(s.get_float("name", 9.0).is_err());
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let mut s = store();
        s.set_string("", "x");
        s.set_int("", 1);
        s.add_int("", 1).unwrap();
        assert!(s.is_empty());
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_snapshot_literal_in_insertion_order() {
        let mut s = store();
        s.set_string("a", "1");
        s.set_int("bb", 22);
        assert_eq!(s.snapshot(), "|a:1|bb:22");
        let keys: Vec<_> = s.keys().collect();
        assert_eq!(keys, ["a", "bb"]);
    }

    #[test]
    fn test_save_writes_envelope_and_clears_dirty() {
        let mut s = store();
        s.set_int("score", 42);
        assert_eq!(s.save(), SaveOutcome::Written);
        assert!(!s.is_dirty());
        assert_eq!(
            s.backend().blob(Path::new(PATH)).unwrap(),
            br#"{"data":"|score:42"}"#
        );
        // Second save has nothing to do
        assert_eq!(s.save(), SaveOutcome::Clean);
        assert_eq!(s.backend().writes(), 1);
    }

    #[test]
    fn test_failed_save_keeps_dirty_and_retries() {
        let mut s = store();
        s.set_int("score", 1);
        s.backend_mut().set_fail_writes(true);
        assert_eq!(s.save(), SaveOutcome::Failed);
        assert!(s.is_dirty());

        s.set_int("score", 2);
        s.backend_mut().set_fail_writes(false);
        assert_eq!(s.save(), SaveOutcome::Written);
        assert_eq!(reopen(&s).get_int("score", 0).unwrap(), 2);
    }

    #[test]
    fn test_load_then_save_is_noop() {
        let mut s = store_with_blob(r#"{"data":"|a:1|bb:22"}"#);
        assert_eq!(s.load_from_file(), LoadOutcome::Loaded { cells: 2 });
        assert_eq!(s.save(), SaveOutcome::Clean);
        assert_eq!(s.backend().writes(), 0);
    }

    #[test]
    fn test_load_replaces_existing_cells() {
        let mut s = store_with_blob(r#"{"data":"|a:1"}"#);
        s.set_string("stale", "x");
        s.load_from_file();
        assert!(!s.contains("stale"));
        assert_eq!(s.get_string("a", ""), "1");
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_load_null_data_clears() {
        let mut s = store_with_blob(r#"{"data":null}"#);
        s.set_string("stale", "x");
        assert_eq!(s.load_from_file(), LoadOutcome::Loaded { cells: 0 });
        assert!(s.is_empty());
    }

    #[test]
    fn test_load_missing_keeps_state() {
        let mut s = store();
        s.set_string("kept", "yes");
        assert_eq!(s.load_from_file(), LoadOutcome::Missing);
        assert_eq!(s.get_string("kept", ""), "yes");
        assert!(s.is_dirty());
    }

    #[test]
    fn test_load_corrupt_container_keeps_state() {
        let mut s = store_with_blob("\u{0}binary junk");
        s.set_string("kept", "yes");
        assert_eq!(s.load_from_file(), LoadOutcome::Failed);
        assert_eq!(s.get_string("kept", ""), "yes");
    }

    #[test]
    fn test_load_malformed_segment_keeps_state() {
        let mut s = store_with_blob(r#"{"data":"|a:1|broken|b:2"}"#);
        s.set_string("kept", "yes");
        assert_eq!(s.load_from_file(), LoadOutcome::Failed);
        assert!(!s.contains("a"));
        assert_eq!(s.get_string("kept", ""), "yes");
    }

    #[test]
    fn test_reset_clears_and_persists_empty() {
        let mut s = store();
        s.set_string("name", "Ana");
        s.set_int("score", 10);
        s.save();

        s.reset();
        assert_eq!(s.get_string("name", "x"), "x");
        assert_eq!(s.get_string("score", "x"), "x");
        assert_eq!(s.snapshot(), "");
        assert_eq!(s.save(), SaveOutcome::Written);
        assert_eq!(
            s.backend().blob(Path::new(PATH)).unwrap(),
            br#"{"data":""}"#
        );
        assert!(reopen(&s).is_empty());
    }

    #[test]
    fn test_remove_marks_dirty_only_when_present() {
        let mut s = store();
        assert!(!s.remove("nothing"));
        assert!(!s.is_dirty());
        s.set_int("a", 1);
        s.save();
        assert!(s.remove("a"));
        assert!(s.is_dirty());
    }

    #[test]
    fn test_open_with_resolver() {
        use crate::platform::FixedRootResolver;

        let config = StoreConfig::default();
        let resolver = FixedRootResolver(PathBuf::from("root"));
        let backend = MemoryBackend::new().with_blob(PATH, r#"{"data":"|level:3"}"#);
        let s = RecordStore::open(backend, &resolver, &config);
        assert_eq!(s.local_file_path(), Path::new(PATH));
        assert_eq!(s.get_int("level", 0).unwrap(), 3);
    }

    mod round_trip {
        use super::{reopen, store};
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Typed {
            Str(String),
            Int(i32),
            Float(f32),
        }

        fn value_strategy() -> impl Strategy<Value = Typed> {
            prop_oneof![
                "[^|]{0,12}".prop_map(Typed::Str),
                any::<i32>().prop_map(Typed::Int),
                (-1.0e6f32..1.0e6f32).prop_map(Typed::Float),
            ]
        }

        proptest! {
            #[test]
            fn prop_save_load_round_trip(
                entries in prop::collection::hash_map("[a-zA-Z0-9_]{1,10}", value_strategy(), 0..16)
            ) {
                let mut s = store();
                for (key, value) in &entries {
                    match value {
                        Typed::Str(v) => s.set_string(key, v.as_str()),
                        Typed::Int(v) => s.set_int(key, *v),
                        Typed::Float(v) => s.set_float(key, *v),
                    }
                }
                s.save();

                let loaded = reopen(&s);
                prop_assert_eq!(loaded.len(), entries.len());
                for (key, value) in &entries {
                    match value {
                        Typed::Str(v) => prop_assert_eq!(loaded.get_string(key, "?"), v.as_str()),
                        Typed::Int(v) => prop_assert_eq!(loaded.get_int(key, 0).unwrap(), *v),
                        Typed::Float(v) => prop_assert_eq!(loaded.get_float(key, 0.0).unwrap(), *v),
                    }
                }
            }
        }
    }
}
