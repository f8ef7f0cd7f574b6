use serde::{Deserialize, Serialize};

/// Top-level field carrying the list of homework entries.
pub const HOMEWORKS_FIELD: &str = "homeworks";
/// Top-level field carrying the cursor for the next query.
pub const CURSOR_FIELD: &str = "current_date";
/// Query parameter the status endpoint reads the cursor from.
pub const FROM_DATE_PARAM: &str = "from_date";

/// One homework entry as reported by the status endpoint. Absent fields
/// deserialize as empty strings; other entry fields are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ItemState {
    #[serde(rename = "homework_name", default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
}

impl ItemState {
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }
}

/// A validated response: entries in the order received plus the next cursor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QueryResult {
    #[serde(rename = "homeworks")]
    pub items: Vec<ItemState>,
    #[serde(rename = "current_date")]
    pub next_cursor: i64,
}
