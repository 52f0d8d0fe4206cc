#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::common::{validate_text, ContractViolation, Validate};

/// Hard cap on name fields. The remote store imposes no limit; this keeps
/// payloads and cache keys bounded.
pub const MAX_NAME_CHARS: usize = 96;
pub const MAX_PHONE_CHARS: usize = 32;
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Primary identifier, assigned by the remote store on creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl Validate for ContactId {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0 <= 0 {
            return Err(ContractViolation::InvalidValue {
                field: "contact_id",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
}

impl PhoneNumber {
    pub fn v1(number: String) -> Result<Self, ContractViolation> {
        let phone = Self { number };
        phone.validate()?;
        Ok(phone)
    }
}

impl Validate for PhoneNumber {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_text("phone_number.number", &self.number, MAX_PHONE_CHARS)
    }
}

/// Remote contact entity as returned by the store.
///
/// The favorite flag is deliberately absent: favorites are client-session
/// state (`contact_cache::FavoriteSet`), never part of the remote contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phones: Vec<PhoneNumber>,
    pub created_at: String,
}

impl Validate for Contact {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.id.validate()?;
        validate_text("contact.first_name", &self.first_name, MAX_NAME_CHARS)?;
        // last_name has no non-empty constraint at the data layer.
        if self.last_name.chars().count() > MAX_NAME_CHARS {
            return Err(ContractViolation::TooLong {
                field: "contact.last_name",
                max_chars: MAX_NAME_CHARS,
                got: self.last_name.chars().count(),
            });
        }
        Ok(())
    }
}

/// Create payload. Only these three fields are ever submitted; favorite and
/// created_at are server/session concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phones: Vec<PhoneNumber>,
}

impl ContactDraft {
    pub fn v1(
        first_name: String,
        last_name: String,
        phones: Vec<PhoneNumber>,
    ) -> Result<Self, ContractViolation> {
        let draft = Self {
            first_name,
            last_name,
            phones,
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl Validate for ContactDraft {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_text("contact_draft.first_name", &self.first_name, MAX_NAME_CHARS)?;
        if self.last_name.chars().count() > MAX_NAME_CHARS {
            return Err(ContractViolation::TooLong {
                field: "contact_draft.last_name",
                max_chars: MAX_NAME_CHARS,
                got: self.last_name.chars().count(),
            });
        }
        for phone in &self.phones {
            phone.validate()?;
        }
        Ok(())
    }
}

/// Update payload field allowlist. Phones can never be updated through this
/// path; there is intentionally no way to put them in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
    pub first_name: String,
    pub last_name: String,
}

impl ContactUpdate {
    pub fn v1(first_name: String, last_name: String) -> Result<Self, ContractViolation> {
        let update = Self {
            first_name,
            last_name,
        };
        update.validate()?;
        Ok(update)
    }

    /// Narrows a full draft to the updatable field set.
    pub fn from_draft(draft: &ContactDraft) -> Self {
        Self {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
        }
    }
}

impl Validate for ContactUpdate {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_text("contact_update.first_name", &self.first_name, MAX_NAME_CHARS)?;
        if self.last_name.chars().count() > MAX_NAME_CHARS {
            return Err(ContractViolation::TooLong {
                field: "contact_update.last_name",
                max_chars: MAX_NAME_CHARS,
                got: self.last_name.chars().count(),
            });
        }
        Ok(())
    }
}

/// Delete response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub id: ContactId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn v1(offset: u32, limit: u32) -> Result<Self, ContractViolation> {
        let page = Self { offset, limit };
        page.validate()?;
        Ok(page)
    }
}

impl Validate for PageRequest {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.limit == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "page_request.limit",
                reason: "must be > 0",
            });
        }
        if self.limit > MAX_PAGE_LIMIT {
            return Err(ContractViolation::InvalidValue {
                field: "page_request.limit",
                reason: "must be <= MAX_PAGE_LIMIT",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactOrder {
    CreatedAtDesc,
    CreatedAtAsc,
    FirstNameAsc,
}

impl ContactOrder {
    pub fn column(self) -> &'static str {
        match self {
            ContactOrder::CreatedAtDesc | ContactOrder::CreatedAtAsc => "created_at",
            ContactOrder::FirstNameAsc => "first_name",
        }
    }

    pub fn direction(self) -> &'static str {
        match self {
            ContactOrder::CreatedAtDesc => "desc",
            ContactOrder::CreatedAtAsc | ContactOrder::FirstNameAsc => "asc",
        }
    }
}

/// Server-side filter predicate, rendered into the `where` variable by the
/// client crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
    All,
    LastNameLike(String),
}
