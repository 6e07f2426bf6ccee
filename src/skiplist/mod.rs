mod level;
mod node;
pub mod raw;

use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use parking_lot::RwLock;

use crate::error::Result;
use crate::options::Options;
use crate::persist::{self, LoadReport};
use crate::types::{DeleteStatus, InsertStatus};

pub use raw::{Iter, RawSkipList};

/// A sorted map built on a skip list, safe to share across threads.
///
/// Why a skip list over a balanced tree?
///   - Simpler to implement correctly
///   - No rebalancing: random node heights keep it balanced in expectation
///   - Level 0 is a sorted linked list, so full traversal is trivial
///
/// Average case: O(log n) insert, search and delete. O(n) traversal.
///
/// Each instance owns its own `RwLock`. Mutations (`insert`, `delete`,
/// `clear`, `load`) take it exclusively. Reads (`search`, `get`, `entries`,
/// `dump`, `display`) share it, so they run in parallel with each other but
/// never observe a node halfway through being spliced in or out. Unrelated
/// instances never contend.
pub struct SkipList<K, V> {
    inner: RwLock<RawSkipList<K, V>>,
    dump_path: PathBuf,
}

impl<K, V> SkipList<K, V> {
    /// Create an empty list with the given level ceiling and default options.
    pub fn new(max_level: usize) -> Self {
        Self::with_options(Options::default().max_level(max_level))
    }

    pub fn with_options(options: Options) -> Self {
        let raw = match options.seed {
            Some(seed) => RawSkipList::with_seed(options.max_level, seed),
            None => RawSkipList::new(options.max_level),
        };
        SkipList {
            inner: RwLock::new(raw),
            dump_path: options.dump_path,
        }
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Highest level currently populated.
    pub fn level(&self) -> usize {
        self.inner.read().level()
    }

    pub fn max_level(&self) -> usize {
        self.inner.read().max_level()
    }

    /// Snapshot file used by [`SkipList::dump`] and [`SkipList::load`].
    pub fn dump_path(&self) -> &Path {
        &self.dump_path
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Consume the lock and return the unsynchronized list.
    pub fn into_inner(self) -> RawSkipList<K, V> {
        self.inner.into_inner()
    }
}

impl<K: Ord, V> SkipList<K, V> {
    /// Insert a key-value pair. An existing key keeps its value.
    pub fn insert(&self, key: K, value: V) -> InsertStatus {
        let status = self.inner.write().insert(key, value);
        match status {
            InsertStatus::Inserted => tracing::trace!("Inserted key"),
            InsertStatus::AlreadyExists => tracing::debug!("Key already exists, insert skipped"),
        }
        status
    }

    /// Whether `key` is present.
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().search(key)
    }

    /// Look up a key. Returns a copy of the value if found.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Delete `key` if present.
    pub fn delete<Q>(&self, key: &Q) -> DeleteStatus
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let status = self.inner.write().delete(key);
        match status {
            DeleteStatus::Deleted => tracing::trace!("Deleted key"),
            DeleteStatus::NotFound => tracing::debug!("Key not found, delete skipped"),
        }
        status
    }

    /// Every entry in ascending key order.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: fmt::Display, V: fmt::Display> SkipList<K, V> {
    /// Human-readable per-level listing. Not a stable format.
    pub fn display(&self) -> String {
        self.inner.read().to_string()
    }

    /// Write every entry to the configured snapshot file.
    pub fn dump(&self) -> Result<usize> {
        self.dump_to(&self.dump_path)
    }

    /// Write every entry to `path` as `key:value;` lines in key order.
    ///
    /// Holds the read lock for the whole write, so the snapshot is
    /// consistent with respect to concurrent mutations.
    pub fn dump_to(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let inner = self.inner.read();
        let written = persist::write_snapshot(path, inner.iter())?;
        tracing::info!(path = %path.display(), entries = written, "Dumped skip list");
        Ok(written)
    }
}

impl<K: Ord + FromStr, V: FromStr> SkipList<K, V> {
    /// Load the configured snapshot file into this list.
    pub fn load(&self) -> Result<LoadReport> {
        self.load_from(&self.dump_path)
    }

    /// Insert every valid record of the snapshot at `path`.
    ///
    /// Malformed lines and keys already present are skipped and counted in
    /// the report. Only failing to open or read the file is an error.
    pub fn load_from(&self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let (records, malformed) = persist::read_snapshot::<K, V>(path)?;

        let mut report = LoadReport {
            malformed,
            ..LoadReport::default()
        };
        let mut inner = self.inner.write();
        for (key, value) in records {
            match inner.insert(key, value) {
                InsertStatus::Inserted => report.inserted += 1,
                InsertStatus::AlreadyExists => report.duplicates += 1,
            }
        }
        drop(inner);

        tracing::info!(
            path = %path.display(),
            inserted = report.inserted,
            duplicates = report.duplicates,
            malformed = report.malformed,
            "Loaded skip list"
        );
        Ok(report)
    }
}

impl<K, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::with_options(Options::default())
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipList")
            .field("entries", &*self.inner.read())
            .field("dump_path", &self.dump_path)
            .finish()
    }
}
