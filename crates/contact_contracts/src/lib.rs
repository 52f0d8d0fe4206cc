#![forbid(unsafe_code)]

pub mod common;
pub mod contact;

pub use common::{ContractViolation, Validate};
pub use contact::{
    Contact, ContactDraft, ContactFilter, ContactId, ContactOrder, ContactSummary, ContactUpdate,
    PageRequest, PhoneNumber,
};
