//! Storage collaborators.
//!
//! The capture and replay engines never persist anything. Hosts hand a
//! finished record to a [`RecordSink`] and fetch one back from a
//! [`RecordSource`]. Two simple implementations are provided.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::RecordError;
use crate::model::StrokeRecord;

/// Accepts finished records for persistence.
pub trait RecordSink {
    /// Persists `record` under the caller-supplied `token`, replacing any
    /// previous record with the same token.
    fn submit(&mut self, token: &str, record: &StrokeRecord) -> Result<(), RecordError>;
}

/// Supplies previously persisted records.
pub trait RecordSource {
    /// Returns the record stored under `id`, or `None` if there is none.
    fn fetch(&self, id: &str) -> Result<Option<StrokeRecord>, RecordError>;
}

/// Tokens double as file names, so they are restricted to a safe alphabet.
pub fn check_token(token: &str) -> Result<(), RecordError> {
    let ok = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(RecordError::InvalidToken(token.to_string()))
    }
}

fn check_submission(token: &str, record: &StrokeRecord) -> Result<(), RecordError> {
    check_token(token)?;
    if record.is_empty() {
        return Err(RecordError::EmptyRecord);
    }
    record.validate()
}

// ── MemoryStore ───────────────────────────────────────────────────────────

/// In-process store. Useful for tests and for hosts that forward records elsewhere.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, StrokeRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSink for MemoryStore {
    fn submit(&mut self, token: &str, record: &StrokeRecord) -> Result<(), RecordError> {
        check_submission(token, record)?;
        self.records.insert(token.to_string(), record.clone());
        Ok(())
    }
}

impl RecordSource for MemoryStore {
    fn fetch(&self, id: &str) -> Result<Option<StrokeRecord>, RecordError> {
        check_token(id)?;
        Ok(self.records.get(id).cloned())
    }
}

// ── DirStore ──────────────────────────────────────────────────────────────

/// One pretty-printed `<token>.json` file per record inside a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Opens (and creates if needed) the directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RecordError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, token: &str) -> PathBuf {
        self.root.join(format!("{token}.json"))
    }
}

impl RecordSink for DirStore {
    fn submit(&mut self, token: &str, record: &StrokeRecord) -> Result<(), RecordError> {
        check_submission(token, record)?;

        // Write-then-rename so a reader never observes a half-written file.
        let path = self.path_for(token);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, record.to_json_pretty()?)?;
        fs::rename(&tmp, &path)?;

        log::info!(
            "stored signature {token:?} ({} strokes) at {}",
            record.len(),
            path.display()
        );
        Ok(())
    }
}

impl RecordSource for DirStore {
    fn fetch(&self, id: &str) -> Result<Option<StrokeRecord>, RecordError> {
        check_token(id)?;
        match fs::read(self.path_for(id)) {
            Ok(bytes) => Ok(Some(StrokeRecord::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
