#![forbid(unsafe_code)]

use contact_contracts::ContactId;

use crate::slug::slugify;
use crate::store::SlugCache;

/// Local pre-submission rejection. A validation failure never reaches the
/// remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    DuplicateFirstName {
        slug: String,
        existing_id: ContactId,
    },
}

impl ValidationFailure {
    pub fn safe_log_line(&self) -> String {
        match self {
            ValidationFailure::DuplicateFirstName { slug, existing_id } => format!(
                "contact_cache validation=duplicate_first_name slug={slug} existing_id={}",
                existing_id.0
            ),
        }
    }
}

/// Duplicate-first-name check. Rejects when a snapshot exists at the proposed
/// name's slug and either a new contact is being created or the snapshot
/// belongs to a different id. Editing a contact without renaming it is not a
/// duplicate of itself.
///
/// The cache is advisory: a backend or decode failure counts as no entry
/// rather than blocking the save.
pub fn check_first_name(
    cache: &SlugCache,
    first_name: &str,
    editing: Option<ContactId>,
) -> Result<(), ValidationFailure> {
    let slug = slugify(first_name);
    if slug.is_empty() {
        return Ok(());
    }
    let existing = match cache.get(&slug) {
        Ok(existing) => existing,
        Err(_) => None,
    };
    match existing {
        Some(snapshot) if editing != Some(snapshot.id) => {
            Err(ValidationFailure::DuplicateFirstName {
                slug,
                existing_id: snapshot.id,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_contracts::Contact;

    fn seeded_cache() -> SlugCache {
        let mut cache = SlugCache::in_memory();
        cache
            .upsert(&Contact {
                id: ContactId(1),
                first_name: "Ann".to_string(),
                last_name: "Field".to_string(),
                phones: Vec::new(),
                created_at: "2024-01-05T10:00:00+00:00".to_string(),
            })
            .unwrap();
        cache
    }

    #[test]
    fn creating_a_second_ann_is_rejected() {
        let cache = seeded_cache();
        let err = check_first_name(&cache, "Ann", None).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::DuplicateFirstName {
                slug: "ann".to_string(),
                existing_id: ContactId(1),
            }
        );
    }

    #[test]
    fn equivalent_spelling_collides() {
        let cache = seeded_cache();
        assert!(check_first_name(&cache, "  ANN ", None).is_err());
    }

    #[test]
    fn editing_ann_without_renaming_is_accepted() {
        let cache = seeded_cache();
        assert!(check_first_name(&cache, "Ann", Some(ContactId(1))).is_ok());
    }

    #[test]
    fn editing_a_different_contact_into_ann_is_rejected() {
        let cache = seeded_cache();
        assert!(check_first_name(&cache, "Ann", Some(ContactId(2))).is_err());
    }

    #[test]
    fn unknown_name_is_accepted() {
        let cache = seeded_cache();
        assert!(check_first_name(&cache, "Bob", None).is_ok());
    }
}
