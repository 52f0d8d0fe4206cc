#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use contact_contracts::{Contact, ContactId};

/// Session-only favorite flags, keyed by contact id.
///
/// Favorites are deliberately not part of the remote contract: they are
/// never sent to or read from the store, and they reset when the process
/// ends. Unlike a per-fetch flag they survive refetching a page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<ContactId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the flag and returns the new state.
    pub fn toggle(&mut self, id: ContactId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_favorite(&self, id: ContactId) -> bool {
        self.ids.contains(&id)
    }

    pub fn favorites(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The listing partition: "all" shows the non-favorites, "favorites" the
/// favorites, so a contact appears in exactly one of the two views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    All,
    Favorites,
}

pub fn visible_contacts(
    contacts: &[Contact],
    favorites: &FavoriteSet,
    mode: FilterMode,
) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|contact| match mode {
            FilterMode::All => !favorites.is_favorite(contact.id),
            FilterMode::Favorites => favorites.is_favorite(contact.id),
        })
        .cloned()
        .collect()
}
