//! Keyed storage for encoded instruction sequences.

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use crate::palette::{PaletteCoord, PaletteError};

/// Error type for instruction stores.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying I/O failure while opening, reading or writing the store
    Io(io::Error),
    /// A stored key is not a palette coordinate
    InvalidKey(PaletteError),
    /// Stored data could not be encoded or decoded
    Format(String),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<PaletteError> for StoreError {
    fn from(err: PaletteError) -> Self {
        StoreError::InvalidKey(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "instruction store I/O error: {}", err),
            StoreError::InvalidKey(err) => write!(f, "instruction store key: {}", err),
            StoreError::Format(reason) => write!(f, "instruction store format: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::InvalidKey(err) => Some(err),
            StoreError::Format(_) => None,
        }
    }
}

/// Persistent mapping from palette key to encoded instruction sequence.
///
/// One run owns the store exclusively: it calls [`reset`](Self::reset)
/// once, then [`put`](Self::put) once per palette color, then
/// [`commit`](Self::commit). Readers use [`keys`](Self::keys) and
/// [`get`](Self::get).
pub trait InstructionStore {
    /// Discard every entry.
    fn reset(&mut self) -> Result<(), StoreError>;

    /// Insert or replace the sequence for `key`.
    fn put(&mut self, key: PaletteCoord, encoded: &str) -> Result<(), StoreError>;

    fn get(&self, key: PaletteCoord) -> Result<Option<String>, StoreError>;

    /// All keys, in insertion order where the backend keeps one.
    fn keys(&self) -> Result<Vec<PaletteCoord>, StoreError>;

    /// Make the written entries durable. A no-op for in-memory stores.
    fn commit(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-process store backed by a sorted map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<PaletteCoord, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrowing view of the entries, ordered by coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteCoord, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl InstructionStore for MemoryStore {
    fn reset(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }

    fn put(&mut self, key: PaletteCoord, encoded: &str) -> Result<(), StoreError> {
        self.entries.insert(key, encoded.to_string());
        Ok(())
    }

    fn get(&self, key: PaletteCoord) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(&key).cloned())
    }

    fn keys(&self) -> Result<Vec<PaletteCoord>, StoreError> {
        Ok(self.entries.keys().copied().collect())
    }
}
