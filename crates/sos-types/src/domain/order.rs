use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name of the due date inside a draft.
pub const DUE_DATE_FIELD: &str = "dueDate";

/// Columns persisted for every order, in schema order (the id is assigned by
/// the store and is not part of a draft).
pub const ORDER_FIELDS: [&str; 7] = [
    "name",
    "address",
    "city",
    "state",
    "zipcode",
    DUE_DATE_FIELD,
    "productType",
];

/// An unvalidated candidate order as decoded from a request body: a plain
/// field→text mapping, possibly with missing keys. Unknown keys are kept but
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderDraft(BTreeMap<String, String>);

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn due_date(&self) -> Option<&str> {
        self.get(DUE_DATE_FIELD)
    }

    /// Field value for persistence; missing keys persist as empty text.
    pub fn field_or_default(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }
}

/// A fully persisted order. The assigned identifier is exposed twice on the
/// wire, as integer `_id` and string `id`, for compatibility with both
/// numeric- and string-keyed consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub record_id: i64,
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
    #[serde(rename = "productType")]
    pub product_type: String,
}

impl Order {
    /// Builds the stored record from a draft plus the identifier the store
    /// assigned to its row.
    pub fn from_draft(record_id: i64, draft: &OrderDraft) -> Self {
        Self {
            record_id,
            id: record_id.to_string(),
            name: draft.field_or_default("name").to_owned(),
            address: draft.field_or_default("address").to_owned(),
            city: draft.field_or_default("city").to_owned(),
            state: draft.field_or_default("state").to_owned(),
            zipcode: draft.field_or_default("zipcode").to_owned(),
            due_date: draft.field_or_default(DUE_DATE_FIELD).to_owned(),
            product_type: draft.field_or_default("productType").to_owned(),
        }
    }
}
