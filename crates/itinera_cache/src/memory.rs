//! In-memory itinerary cache for tests and dry runs.

use crate::validate_document_id;
use itinera_core::Itinerary;
use itinera_error::{CacheError, CacheErrorKind, ItineraResult};
use itinera_interface::ItineraryStore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Itinerary cache held in a shared map.
///
/// Clones share the same entries. Records are kept as serialized JSON so a
/// load returns exactly what was stored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItineraryCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryItineraryCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> CacheError {
        CacheError::new(CacheErrorKind::FileRead("cache lock poisoned".to_string()))
    }
}

impl ItineraryStore for InMemoryItineraryCache {
    fn load(&self, document_id: &str) -> ItineraResult<Option<Itinerary>> {
        validate_document_id(document_id)?;
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;

        let Some(json) = entries.get(document_id) else {
            return Ok(None);
        };

        let itinerary: Itinerary = serde_json::from_str(json).map_err(|e| {
            CacheError::new(CacheErrorKind::Corrupt(format!("{}: {}", document_id, e)))
        })?;
        Ok(Some(itinerary))
    }

    fn store(&self, itinerary: &Itinerary) -> ItineraResult<()> {
        let document_id = itinerary.document_id();
        validate_document_id(document_id)?;

        let json = serde_json::to_string_pretty(itinerary).map_err(|e| {
            CacheError::new(CacheErrorKind::Serialization(format!("{}: {}", document_id, e)))
        })?;

        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        if entries.contains_key(document_id) {
            return Err(CacheError::new(CacheErrorKind::AlreadyExists(document_id.clone())).into());
        }
        entries.insert(document_id.clone(), json);
        Ok(())
    }
}
