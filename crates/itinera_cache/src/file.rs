//! JSON-file-per-document itinerary cache.

use crate::validate_document_id;
use itinera_core::Itinerary;
use itinera_error::{CacheError, CacheErrorKind, ItineraResult};
use itinera_interface::ItineraryStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Filesystem itinerary cache.
///
/// Stores one pretty-printed JSON record per document:
///
/// ```text
/// cache/
/// ├── 10423.json
/// └── 10518.json
/// ```
///
/// Entries are append-only: a stored document is never rewritten. Writes go
/// through a temporary file and a rename so a crash never leaves a partial
/// record behind.
#[derive(Debug, Clone)]
pub struct FileItineraryCache {
    cache_dir: PathBuf,
}

impl FileItineraryCache {
    /// Open a cache rooted at `cache_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip(cache_dir))]
    pub fn new(cache_dir: impl Into<PathBuf>) -> ItineraResult<Self> {
        let cache_dir = cache_dir.into();

        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir).map_err(|e| {
                CacheError::new(CacheErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    cache_dir.display(),
                    e
                )))
            })?;
            info!(path = %cache_dir.display(), "Created cache directory");
        }

        Ok(Self { cache_dir })
    }

    /// Root directory of the cache.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the record for `document_id`.
    pub fn record_path(&self, document_id: &str) -> ItineraResult<PathBuf> {
        validate_document_id(document_id)?;
        Ok(self.cache_dir.join(format!("{}.json", document_id)))
    }

    /// Raw record text for `document_id`, if present.
    pub fn load_raw(&self, document_id: &str) -> ItineraResult<Option<String>> {
        let path = self.record_path(document_id)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::new(CacheErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}

impl ItineraryStore for FileItineraryCache {
    #[instrument(skip(self), fields(cache_dir = %self.cache_dir.display()))]
    fn load(&self, document_id: &str) -> ItineraResult<Option<Itinerary>> {
        let Some(text) = self.load_raw(document_id)? else {
            debug!("Cache miss");
            return Ok(None);
        };

        let itinerary: Itinerary = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Cache record is not a valid itinerary");
            CacheError::new(CacheErrorKind::Corrupt(format!("{}: {}", document_id, e)))
        })?;

        if itinerary.document_id() != document_id {
            return Err(CacheError::new(CacheErrorKind::Corrupt(format!(
                "record for '{}' names document '{}'",
                document_id,
                itinerary.document_id()
            )))
            .into());
        }

        debug!(events = itinerary.events().len(), "Cache hit");
        Ok(Some(itinerary))
    }

    #[instrument(skip(self, itinerary), fields(document_id = %itinerary.document_id()))]
    fn store(&self, itinerary: &Itinerary) -> ItineraResult<()> {
        let document_id = itinerary.document_id();
        let path = self.record_path(document_id)?;

        if path.exists() {
            return Err(CacheError::new(CacheErrorKind::AlreadyExists(document_id.clone())).into());
        }

        let json = serde_json::to_string_pretty(itinerary).map_err(|e| {
            CacheError::new(CacheErrorKind::Serialization(format!("{}: {}", document_id, e)))
        })?;

        let temp_path = self.cache_dir.join(format!(".{}.json.tmp", document_id));
        fs::write(&temp_path, json.as_bytes()).map_err(|e| {
            CacheError::new(CacheErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CacheError::new(CacheErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        info!(path = %path.display(), "Stored itinerary");
        Ok(())
    }
}
