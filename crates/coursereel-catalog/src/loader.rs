//! Dataset loading.
//!
//! The catalog is re-read from its backing CSV file for every query unless
//! caching is switched on, in which case the file is only re-read after its
//! modification time or size changes. Loading is fail-soft: [`DatasetSource::load`]
//! never fails, it logs the problem and hands out an empty [`Dataset`].

use parking_lot::RwLock;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::models::{Dataset, VideoRecord};
use crate::Result;

/// Something that can produce the current catalog.
pub trait DatasetSource: Send + Sync {
    /// Return the current dataset, or an empty one if it cannot be read.
    fn load(&self) -> Dataset;
}

/// Parse a video table from CSV.
///
/// The header row must name at least `video`, `transcription` and
/// `key_phrases`. Other columns are ignored, empty cells become empty
/// strings, and every row must have as many fields as the header.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let records = csv_reader
        .deserialize::<VideoRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Dataset::new(records))
}

/// Size and modification time of the backing file, used to detect changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileStamp {
    fn of(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

#[derive(Debug)]
struct Snapshot {
    stamp: FileStamp,
    dataset: Dataset,
}

/// Dataset backed by a CSV file on disk.
#[derive(Debug)]
pub struct CsvSource {
    path: PathBuf,
    cache: Option<RwLock<Option<Snapshot>>>,
}

impl CsvSource {
    /// A source that reads the file on every load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }

    /// A source that keeps the last dataset until the file changes.
    pub fn cached(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Some(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Read and parse the file, reporting any failure.
    pub fn try_load(&self) -> Result<Dataset> {
        let file = File::open(&self.path)?;
        read_dataset(file)
    }

    fn load_cached(&self, cache: &RwLock<Option<Snapshot>>) -> Result<Dataset> {
        let stamp = FileStamp::of(&self.path)?;

        if let Some(snapshot) = cache.read().as_ref() {
            if snapshot.stamp == stamp {
                return Ok(snapshot.dataset.clone());
            }
        }

        let dataset = self.try_load()?;
        tracing::debug!(path = ?self.path, rows = dataset.len(), "Refreshed cached dataset");
        *cache.write() = Some(Snapshot {
            stamp,
            dataset: dataset.clone(),
        });
        Ok(dataset)
    }
}

impl DatasetSource for CsvSource {
    fn load(&self) -> Dataset {
        let result = match &self.cache {
            Some(cache) => self.load_cached(cache),
            None => self.try_load(),
        };

        match result {
            Ok(dataset) => {
                tracing::debug!(path = ?self.path, rows = dataset.len(), "Loaded dataset");
                dataset
            }
            Err(e) => {
                tracing::warn!(
                    path = ?self.path,
                    error = %e,
                    "Failed to load dataset, serving an empty catalog"
                );
                Dataset::default()
            }
        }
    }
}

/// Fixed, in-memory dataset.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: Dataset,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self) -> Dataset {
        self.dataset.clone()
    }
}
