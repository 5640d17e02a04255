//! Allow-list cache for queryable tables and named queries
//!
//! The set of objects the API may expose is read from a JSON file and held in
//! an in-memory snapshot. Snapshots are replaced wholesale on reload, at most
//! once per staleness window, and a failed reload keeps serving the previous
//! snapshot.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long a loaded snapshot is served before the backing file is re-read
pub const CACHE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Schema used when an entry does not name one
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Kind of an allow-listed object
///
/// Anything that is not explicitly marked `QUERY` is treated as a table,
/// including entries with an absent or unrecognized `TYPE` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// A physical table resolved through INFORMATION_SCHEMA
    #[default]
    Table,

    /// A named query whose result set is described instead
    Query,
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<EntryKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(value) if value.eq_ignore_ascii_case("QUERY") => EntryKind::Query,
        _ => EntryKind::Table,
    })
}

/// One allow-listed table or named query
///
/// The serialized form keeps the SCREAMING_SNAKE field names of the backing
/// file; lowercase spellings are accepted on input as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    /// Schema the table lives in; `None` falls back to [`DEFAULT_SCHEMA`]
    #[serde(rename = "TABLE_SCHEMA", alias = "table_schema", default)]
    pub schema: Option<String>,

    /// Identifier used for lookups (case-insensitive)
    #[serde(rename = "TABLE_NAME", alias = "table_name")]
    pub name: String,

    /// Whether this entry is a table or a named query
    #[serde(
        rename = "TYPE",
        alias = "type",
        default,
        deserialize_with = "deserialize_kind"
    )]
    pub kind: EntryKind,

    /// Optional display name shown instead of the raw identifier
    #[serde(rename = "FRIENDLY_NAME", alias = "friendly_name", default)]
    pub friendly_name: Option<String>,

    /// Raw SQL text, only meaningful when `kind` is [`EntryKind::Query`]
    #[serde(rename = "QUERY", alias = "query", default)]
    pub query: Option<String>,
}

impl TableEntry {
    /// Schema to use when resolving this entry against INFORMATION_SCHEMA
    pub fn resolved_schema(&self) -> &str {
        self.schema.as_deref().unwrap_or(DEFAULT_SCHEMA)
    }
}

/// Allow-list error type
#[derive(Debug, Error)]
pub enum AllowListError {
    /// Backing file absent
    #[error("allow-list file not found: {0}")]
    Missing(PathBuf),

    /// Backing file present but unreadable
    #[error("failed to read allow-list: {0}")]
    Read(#[from] std::io::Error),

    /// Backing file content is not a valid entry array
    #[error("failed to parse allow-list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of the raw allow-list content
///
/// Injectable so tests can substitute a fake and count reads.
pub trait AllowListSource: Send + Sync + 'static {
    /// Read the raw JSON content of the allow-list
    fn load(&self) -> Result<String, AllowListError>;
}

/// Reads the allow-list from a file on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading from the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AllowListSource for FileSource {
    fn load(&self) -> Result<String, AllowListError> {
        std::fs::read_to_string(&self.path).map_err(|error| match error.kind() {
            std::io::ErrorKind::NotFound => AllowListError::Missing(self.path.clone()),
            _ => AllowListError::Read(error),
        })
    }
}

/// Clock abstraction so staleness can be tested deterministically
pub trait Clock: Send + Sync + 'static {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Snapshot {
    entries: Arc<Vec<TableEntry>>,
    loaded_at: Instant,
}

/// In-memory snapshot of the allow-list with time-based invalidation
///
/// One instance is created per process and shared behind an `Arc`. Concurrent
/// callers hitting a stale snapshot are serialized on a reload mutex; the
/// freshness check is repeated inside the mutex so the losers reuse the
/// reload the winner just performed instead of re-reading the file.
///
/// A failed reload (missing file, parse error) is logged and absorbed: the
/// previous snapshot keeps being served, or an empty list if nothing was
/// ever loaded.
pub struct AllowListCache<S = FileSource, C = SystemClock> {
    source: S,
    clock: C,
    timeout: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    reload_lock: Mutex<()>,
}

impl AllowListCache {
    /// Create a cache reading from the given file path with the default
    /// timeout and system clock
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::with_parts(FileSource::new(path), SystemClock, CACHE_TIMEOUT)
    }
}

impl<S: AllowListSource, C: Clock> AllowListCache<S, C> {
    /// Create a cache from explicit parts
    ///
    /// # Arguments
    ///
    /// * `source` - Backing resource reader
    /// * `clock` - Clock used for staleness checks
    /// * `timeout` - Staleness window after a successful load
    pub fn with_parts(source: S, clock: C, timeout: Duration) -> Self {
        Self {
            source,
            clock,
            timeout,
            snapshot: RwLock::new(None),
            reload_lock: Mutex::new(()),
        }
    }

    /// Current allow-list entries, reloading first if the snapshot is stale
    ///
    /// Never fails: a reload error leaves the previous snapshot in place and
    /// an empty list is returned when no load ever succeeded.
    pub fn entries(&self) -> Arc<Vec<TableEntry>> {
        let now = self.clock.now();

        // Fast path: fresh snapshot under a brief read lock.
        if let Some(entries) = self.fresh_entries(now) {
            return entries;
        }

        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have reloaded while this one waited on the lock.
        if let Some(entries) = self.fresh_entries(now) {
            return entries;
        }

        self.reload()
    }

    /// Find an entry by identifier, case-insensitively
    pub fn find(&self, id: &str) -> Option<TableEntry> {
        self.lookup(id, None)
    }

    /// Find an entry by identifier and kind, case-insensitively
    pub fn find_with_kind(&self, id: &str, kind: EntryKind) -> Option<TableEntry> {
        self.lookup(id, Some(kind))
    }

    fn lookup(&self, id: &str, kind: Option<EntryKind>) -> Option<TableEntry> {
        let found = self
            .entries()
            .iter()
            .find(|entry| {
                entry.name.eq_ignore_ascii_case(id)
                    && kind.map_or(true, |kind| entry.kind == kind)
            })
            .cloned();

        if found.is_none() {
            tracing::debug!(id, "allow-list lookup miss");
        }

        found
    }

    fn fresh_entries(&self, now: Instant) -> Option<Arc<Vec<TableEntry>>> {
        let guard = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        guard.as_ref().and_then(|snapshot| {
            // duration_since saturates to zero when the snapshot was loaded
            // after `now` was captured, which counts as fresh.
            (now.duration_since(snapshot.loaded_at) < self.timeout)
                .then(|| Arc::clone(&snapshot.entries))
        })
    }

    /// Reload the snapshot; caller must hold `reload_lock`
    fn reload(&self) -> Arc<Vec<TableEntry>> {
        let parsed = self
            .source
            .load()
            .and_then(|raw| serde_json::from_str::<Vec<TableEntry>>(&raw).map_err(Into::into));

        match parsed {
            Ok(entries) => {
                let entries = Arc::new(entries);
                let mut guard = self
                    .snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner);
                *guard = Some(Snapshot {
                    entries: Arc::clone(&entries),
                    loaded_at: self.clock.now(),
                });
                tracing::debug!(count = entries.len(), "allow-list reloaded");
                entries
            }
            Err(error) => {
                tracing::error!(%error, "allow-list reload failed, serving previous snapshot");
                let guard = self
                    .snapshot
                    .read()
                    .unwrap_or_else(PoisonError::into_inner);
                guard
                    .as_ref()
                    .map(|snapshot| Arc::clone(&snapshot.entries))
                    .unwrap_or_default()
            }
        }
    }
}
