use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use paint_quantize::{InstructionStore, PaletteCoord, StoreError};

/// Instruction store persisted as a JSON object `{ "row,col": "[l,o,n];..." }`.
///
/// Entries are buffered in memory. [`reset`](InstructionStore::reset)
/// truncates the file on disk; [`commit`](InstructionStore::commit) writes
/// a temporary sibling file and renames it over the store, so readers never
/// see a half-written file.
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<PaletteCoord, String>,
}

impl JsonFileStore {
    /// Prepare a store at `path` for a new run.
    ///
    /// Creates parent directories. The file itself is not touched until the
    /// first `reset` or `commit`.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            entries: BTreeMap::new(),
        })
    }

    /// Load an existing store for reading.
    ///
    /// Two keys naming the same coordinate (`"0,3"` and `"00,3"`) are a
    /// format error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| StoreError::Format(format!("{}: {}", path.display(), e)))?;

        let mut entries = BTreeMap::new();
        for (key, encoded) in raw {
            match entries.entry(key.parse::<PaletteCoord>()?) {
                Entry::Vacant(slot) => {
                    slot.insert(encoded);
                }
                Entry::Occupied(slot) => {
                    return Err(StoreError::Format(format!(
                        "{}: key '{}' repeats coordinate {}",
                        path.display(),
                        key,
                        slot.key()
                    )));
                }
            }
        }
        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened instruction store");

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn to_json(&self) -> Result<String, StoreError> {
        let raw: BTreeMap<String, &str> = self
            .entries
            .iter()
            .map(|(coord, encoded)| (coord.to_string(), encoded.as_str()))
            .collect();
        serde_json::to_string_pretty(&raw).map_err(|e| StoreError::Format(e.to_string()))
    }
}

impl InstructionStore for JsonFileStore {
    fn reset(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        std::fs::write(&self.path, "{}")?;
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

    fn commit(&mut self) -> Result<(), StoreError> {
        let json = self.to_json()?;
        let temp = self.temp_path();
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "Committed instruction store");
        Ok(())
    }
}
