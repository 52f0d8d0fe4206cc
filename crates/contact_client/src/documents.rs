#![forbid(unsafe_code)]

use contact_contracts::{ContactDraft, ContactFilter, ContactId, ContactOrder, ContactUpdate, PageRequest};
use serde_json::{json, Value};

/// GraphQL operation documents for the five contact operations. Shapes follow
/// the Hasura-style contact schema: `contact` collection, `contact_by_pk`,
/// `insert_contact`, `update_contact_by_pk`, `delete_contact_by_pk`.
pub const GET_CONTACT_LIST: &str = "\
query GetContactList(
  $distinct_on: [contact_select_column!]
  $limit: Int
  $offset: Int
  $order_by: [contact_order_by!]
  $where: contact_bool_exp
) {
  contact(
    distinct_on: $distinct_on
    limit: $limit
    offset: $offset
    order_by: $order_by
    where: $where
  ) {
    created_at
    first_name
    id
    last_name
    phones {
      number
    }
  }
}";

pub const GET_CONTACT_DETAIL: &str = "\
query GetContactDetail($id: Int!) {
  contact_by_pk(id: $id) {
    created_at
    first_name
    id
    last_name
    phones {
      number
    }
  }
}";

pub const CREATE_CONTACT: &str = "\
mutation AddContactWithPhones(
  $first_name: String!
  $last_name: String!
  $phones: [phone_insert_input!]!
) {
  insert_contact(
    objects: {
      first_name: $first_name
      last_name: $last_name
      phones: { data: $phones }
    }
  ) {
    returning {
      created_at
      first_name
      id
      last_name
      phones {
        number
      }
    }
  }
}";

pub const UPDATE_CONTACT: &str = "\
mutation UpdateContactById($id: Int!, $_set: contact_set_input) {
  update_contact_by_pk(pk_columns: { id: $id }, _set: $_set) {
    created_at
    first_name
    id
    last_name
    phones {
      number
    }
  }
}";

pub const DELETE_CONTACT: &str = "\
mutation DeleteContactById($id: Int!) {
  delete_contact_by_pk(id: $id) {
    first_name
    last_name
    id
  }
}";

/// Wire envelope: `{"query": ..., "variables": ...}`.
pub fn request_envelope(document: &str, variables: Value) -> Value {
    json!({
        "query": document,
        "variables": variables,
    })
}

pub fn list_variables(page: PageRequest, order: ContactOrder, filter: &ContactFilter) -> Value {
    json!({
        "distinct_on": [],
        "limit": page.limit,
        "offset": page.offset,
        "order_by": order_by_value(order),
        "where": where_value(filter),
    })
}

pub fn detail_variables(id: ContactId) -> Value {
    json!({ "id": id.0 })
}

/// Only first_name, last_name, and phones are ever submitted on create.
pub fn create_variables(draft: &ContactDraft) -> Value {
    let phones: Vec<Value> = draft
        .phones
        .iter()
        .map(|phone| json!({ "number": phone.number }))
        .collect();
    json!({
        "first_name": draft.first_name,
        "last_name": draft.last_name,
        "phones": phones,
    })
}

/// The `_set` object is built exclusively from the `ContactUpdate` allowlist.
/// Phones never appear here; updating them through this path is unsupported.
pub fn update_variables(id: ContactId, update: &ContactUpdate) -> Value {
    json!({
        "id": id.0,
        "_set": {
            "first_name": update.first_name,
            "last_name": update.last_name,
        },
    })
}

pub fn delete_variables(id: ContactId) -> Value {
    json!({ "id": id.0 })
}

fn order_by_value(order: ContactOrder) -> Value {
    let mut entry = serde_json::Map::new();
    entry.insert(
        order.column().to_string(),
        Value::String(order.direction().to_string()),
    );
    Value::Array(vec![Value::Object(entry)])
}

fn where_value(filter: &ContactFilter) -> Value {
    match filter {
        ContactFilter::All => json!({}),
        ContactFilter::LastNameLike(needle) => json!({
            "last_name": { "_ilike": format!("%{}%", needle) }
        }),
    }
}
