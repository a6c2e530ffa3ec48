use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable columns of a Link. Used both for inserts and for full-payload updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkFields {
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// Raised when a create/update/attach references Item ids that do not exist.
/// Nothing is written when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item ids: {missing:?}")]
pub struct UnknownItems {
    pub missing: Vec<i64>,
}

/// Sorted, de-duplicated copy of the caller supplied item ids.
pub fn normalize_item_ids(ids: &[i64]) -> Vec<i64> {
    let mut out = ids.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}
