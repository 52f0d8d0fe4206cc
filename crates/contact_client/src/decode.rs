#![forbid(unsafe_code)]

use contact_contracts::{Contact, ContactSummary};
use serde_json::Value;

use crate::error::{RemoteError, RemoteErrorKind};

/// Unwraps the GraphQL response envelope. A non-empty `errors` array is a
/// protocol-level failure even when `data` is present.
pub fn data_field(body: &Value) -> Result<&Value, RemoteError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let first = errors[0]
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown graphql error");
            return Err(RemoteError::with_detail(
                RemoteErrorKind::GraphQl,
                first.to_string(),
            ));
        }
    }
    body.get("data")
        .ok_or_else(|| RemoteError::decode("response has no data field"))
}

pub fn contact_list(body: &Value) -> Result<Vec<Contact>, RemoteError> {
    let rows = data_field(body)?
        .get("contact")
        .cloned()
        .ok_or_else(|| RemoteError::decode("data.contact missing"))?;
    serde_json::from_value(rows)
        .map_err(|_| RemoteError::decode("data.contact rows did not match contact shape"))
}

/// `Ok(None)` when the row does not exist; the store returns an explicit
/// null for unknown primary keys.
pub fn contact_by_pk(body: &Value, field: &'static str) -> Result<Option<Contact>, RemoteError> {
    let row = data_field(body)?
        .get(field)
        .cloned()
        .ok_or_else(|| RemoteError::decode("by-pk field missing from data"))?;
    if row.is_null() {
        return Ok(None);
    }
    serde_json::from_value(row)
        .map(Some)
        .map_err(|_| RemoteError::decode("by-pk row did not match contact shape"))
}

pub fn created_contact(body: &Value) -> Result<Contact, RemoteError> {
    let returning = data_field(body)?
        .get("insert_contact")
        .and_then(|v| v.get("returning"))
        .and_then(Value::as_array)
        .ok_or_else(|| RemoteError::decode("insert_contact.returning missing"))?;
    let first = returning
        .first()
        .cloned()
        .ok_or_else(|| RemoteError::decode("insert_contact.returning is empty"))?;
    serde_json::from_value(first)
        .map_err(|_| RemoteError::decode("created row did not match contact shape"))
}

pub fn deleted_summary(body: &Value) -> Result<Option<ContactSummary>, RemoteError> {
    let row = data_field(body)?
        .get("delete_contact_by_pk")
        .cloned()
        .ok_or_else(|| RemoteError::decode("delete_contact_by_pk missing from data"))?;
    if row.is_null() {
        return Ok(None);
    }
    serde_json::from_value(row)
        .map(Some)
        .map_err(|_| RemoteError::decode("deleted row did not match summary shape"))
}
