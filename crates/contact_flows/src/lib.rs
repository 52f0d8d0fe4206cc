#![forbid(unsafe_code)]

use contact_cache::{check_first_name, CacheError, SlugCache, ValidationFailure};
use contact_client::{ContactStore, RemoteError};
use contact_contracts::{
    Contact, ContactDraft, ContactFilter, ContactId, ContactOrder, ContactSummary, ContactUpdate,
    PageRequest,
};

pub use contact_cache::{visible_contacts, FavoriteSet, FilterMode};

/// Fixed page size used by the listing surface.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    Validation(ValidationFailure),
    Remote(RemoteError),
    /// Editing an id the remote store no longer has.
    Vanished { id: ContactId },
}

impl SaveError {
    pub fn safe_log_line(&self) -> String {
        match self {
            SaveError::Validation(failure) => failure.safe_log_line(),
            SaveError::Remote(err) => err.safe_log_line("save_contact"),
            SaveError::Vanished { id } => {
                format!("contact_flows op=save_contact error=vanished id={}", id.0)
            }
        }
    }
}

impl From<ValidationFailure> for SaveError {
    fn from(failure: ValidationFailure) -> Self {
        SaveError::Validation(failure)
    }
}

impl From<RemoteError> for SaveError {
    fn from(err: RemoteError) -> Self {
        SaveError::Remote(err)
    }
}

/// Result of a save. The remote write is authoritative; the cache refresh is
/// advisory, so its failure rides along instead of failing the save that
/// already happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub contact: Contact,
    pub cache_error: Option<CacheError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub summary: Option<ContactSummary>,
    pub cache_error: Option<CacheError>,
}

/// One page of the contact listing, newest first.
pub fn fetch_contact_page<S: ContactStore>(
    store: &S,
    page_index: u32,
) -> Result<Vec<Contact>, RemoteError> {
    let page = PageRequest {
        offset: page_index.saturating_mul(PAGE_SIZE),
        limit: PAGE_SIZE,
    };
    store.list_contacts(page, ContactOrder::CreatedAtDesc, &ContactFilter::All)
}

/// Search by last-name substring, first page only.
pub fn search_contacts<S: ContactStore>(
    store: &S,
    needle: &str,
) -> Result<Vec<Contact>, RemoteError> {
    let page = PageRequest {
        offset: 0,
        limit: PAGE_SIZE,
    };
    store.list_contacts(
        page,
        ContactOrder::CreatedAtDesc,
        &ContactFilter::LastNameLike(needle.to_string()),
    )
}

/// Create or edit a contact.
///
/// Order matters: the duplicate-name check runs first so a rejection never
/// reaches the remote store; on success the returned entity is written
/// through to the slug cache so the next duplicate check sees it.
pub fn save_contact<S: ContactStore>(
    store: &S,
    cache: &mut SlugCache,
    draft: &ContactDraft,
    editing: Option<ContactId>,
) -> Result<SaveOutcome, SaveError> {
    check_first_name(cache, &draft.first_name, editing)?;

    let contact = match editing {
        None => store.create_contact(draft)?,
        Some(id) => {
            let update = ContactUpdate::from_draft(draft);
            store
                .update_contact(id, &update)?
                .ok_or(SaveError::Vanished { id })?
        }
    };

    let cache_error = cache.upsert(&contact).err();
    Ok(SaveOutcome {
        contact,
        cache_error,
    })
}

/// Remote delete plus cache eviction. The cache entry goes away even when the
/// remote row was already gone.
pub fn delete_contact<S: ContactStore>(
    store: &S,
    cache: &mut SlugCache,
    id: ContactId,
) -> Result<DeleteOutcome, RemoteError> {
    let summary = store.delete_contact(id)?;
    let cache_error = cache.remove(id).err();
    Ok(DeleteOutcome {
        summary,
        cache_error,
    })
}
