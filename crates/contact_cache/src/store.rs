#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use contact_contracts::{Contact, ContactId};

use crate::slug::slugify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    Backend { detail: String },
    Decode { detail: String },
    InvalidKey { detail: String },
}

impl CacheError {
    pub fn safe_log_line(&self, op: &'static str) -> String {
        let (kind, detail) = match self {
            CacheError::Backend { detail } => ("backend", detail),
            CacheError::Decode { detail } => ("decode", detail),
            CacheError::InvalidKey { detail } => ("invalid_key", detail),
        };
        format!("contact_cache op={op} error={kind} detail={detail}")
    }
}

/// Persistence seam for the slug cache. The whole payload is read and written
/// as one string slot; partial updates are not part of the contract.
pub trait CacheBackend {
    fn load(&self) -> Result<Option<String>, CacheError>;
    fn save(&mut self, payload: &str) -> Result<(), CacheError>;
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    payload: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self { payload: None }
    }
}

impl CacheBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, CacheError> {
        Ok(self.payload.clone())
    }

    fn save(&mut self, payload: &str) -> Result<(), CacheError> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

/// Production backend: a single JSON file. A missing file is an empty cache,
/// never an error.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CacheBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CacheError::Backend {
                detail: format!("read {}: {err}", self.path.display()),
            }),
        }
    }

    fn save(&mut self, payload: &str) -> Result<(), CacheError> {
        fs::write(&self.path, payload).map_err(|err| CacheError::Backend {
            detail: format!("write {}: {err}", self.path.display()),
        })
    }
}

/// Slug-keyed snapshot store used for duplicate-first-name validation.
///
/// Entries are keyed by `slugify(contact.first_name)` and hold the contact as
/// of the last local write. The cache is advisory only: it is refreshed by
/// the save/delete flows but never reconciled against the remote store, so a
/// snapshot can be stale at any time. It is never authoritative for reads.
pub struct SlugCache {
    backend: Box<dyn CacheBackend>,
}

impl SlugCache {
    pub fn new(backend: Box<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn get(&self, slug: &str) -> Result<Option<Contact>, CacheError> {
        Ok(self.read_all()?.get(slug).cloned())
    }

    /// Stores or overwrites the snapshot under the slug derived from the
    /// contact's first name. Whole-payload rewrite semantics.
    pub fn upsert(&mut self, contact: &Contact) -> Result<(), CacheError> {
        let slug = slugify(&contact.first_name);
        if slug.is_empty() {
            return Err(CacheError::InvalidKey {
                detail: "first name yields an empty slug".to_string(),
            });
        }
        let mut entries = self.read_all()?;
        entries.insert(slug, contact.clone());
        self.write_all(&entries)
    }

    /// Drops every snapshot whose id matches. Scans by id because entries are
    /// keyed by slug and the name under that id may have changed since the
    /// snapshot was written.
    pub fn remove(&mut self, id: ContactId) -> Result<(), CacheError> {
        let mut entries = self.read_all()?;
        entries.retain(|_, contact| contact.id != id);
        self.write_all(&entries)
    }

    pub fn list(&self) -> Result<Vec<Contact>, CacheError> {
        Ok(self.read_all()?.into_values().collect())
    }

    fn read_all(&self) -> Result<BTreeMap<String, Contact>, CacheError> {
        match self.backend.load()? {
            None => Ok(BTreeMap::new()),
            Some(payload) if payload.trim().is_empty() => Ok(BTreeMap::new()),
            Some(payload) => {
                serde_json::from_str(&payload).map_err(|err| CacheError::Decode {
                    detail: format!("cache payload: {err}"),
                })
            }
        }
    }

    fn write_all(&mut self, entries: &BTreeMap<String, Contact>) -> Result<(), CacheError> {
        let payload = serde_json::to_string(entries).map_err(|err| CacheError::Decode {
            detail: format!("cache encode: {err}"),
        })?;
        self.backend.save(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_contracts::PhoneNumber;

    fn contact(id: i64, first_name: &str) -> Contact {
        Contact {
            id: ContactId(id),
            first_name: first_name.to_string(),
            last_name: "Lee".to_string(),
            phones: vec![PhoneNumber {
                number: "555-1000".to_string(),
            }],
            created_at: "2024-01-05T10:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn upsert_then_get_by_slug() {
        let mut cache = SlugCache::in_memory();
        cache.upsert(&contact(1, "Mary Jane")).unwrap();

        let hit = cache.get("mary-jane").unwrap().unwrap();
        assert_eq!(hit.id, ContactId(1));
        assert_eq!(cache.get("mary").unwrap(), None);
    }

    #[test]
    fn upsert_overwrites_same_slug() {
        let mut cache = SlugCache::in_memory();
        cache.upsert(&contact(1, "Ann")).unwrap();
        cache.upsert(&contact(2, "ann")).unwrap();

        assert_eq!(cache.get("ann").unwrap().unwrap().id, ContactId(2));
        assert_eq!(cache.list().unwrap().len(), 1);
    }

    #[test]
    fn remove_drops_all_entries_for_id() {
        let mut cache = SlugCache::in_memory();
        cache.upsert(&contact(1, "Ann")).unwrap();
        // A renamed contact leaves a second snapshot under the old slug.
        cache.upsert(&contact(1, "Anna")).unwrap();
        cache.upsert(&contact(2, "Bob")).unwrap();

        cache.remove(ContactId(1)).unwrap();
        assert_eq!(cache.get("ann").unwrap(), None);
        assert_eq!(cache.get("anna").unwrap(), None);
        assert!(cache.get("bob").unwrap().is_some());
    }

    #[test]
    fn empty_slug_is_rejected() {
        let mut cache = SlugCache::in_memory();
        let err = cache.upsert(&contact(1, "!!!")).unwrap_err();
        assert!(matches!(err, CacheError::InvalidKey { .. }));
    }

    #[test]
    fn corrupt_payload_is_a_decode_error() {
        struct Corrupt;
        impl CacheBackend for Corrupt {
            fn load(&self) -> Result<Option<String>, CacheError> {
                Ok(Some("not json".to_string()))
            }
            fn save(&mut self, _payload: &str) -> Result<(), CacheError> {
                Ok(())
            }
        }

        let cache = SlugCache::new(Box::new(Corrupt));
        let err = cache.get("ann").unwrap_err();
        assert!(matches!(err, CacheError::Decode { .. }));
    }

    #[test]
    fn file_backend_round_trips_and_treats_missing_as_empty() {
        let dir = std::env::temp_dir().join(format!(
            "contact_cache_test_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("contacts.json");

        let mut cache = SlugCache::new(Box::new(FileBackend::new(path.clone())));
        assert_eq!(cache.list().unwrap().len(), 0);

        cache.upsert(&contact(5, "Ann")).unwrap();
        drop(cache);

        let reopened = SlugCache::new(Box::new(FileBackend::new(path)));
        assert_eq!(reopened.get("ann").unwrap().unwrap().id, ContactId(5));

        fs::remove_dir_all(&dir).unwrap();
    }
}
