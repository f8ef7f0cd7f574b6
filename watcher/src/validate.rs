use common::protocol::{ItemState, QueryResult, CURSOR_FIELD, HOMEWORKS_FIELD};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::WatchError;

/// Check the payload shape and pull out the entries and the next cursor.
///
/// Entries keep the order the endpoint sent them in. An absent name or status
/// is passed on as an empty string and the verdict lookup reports it; an entry
/// that is not an object, or whose name/status is not a string, is rejected
/// here.
pub fn validate(payload: &Value) -> Result<QueryResult, WatchError> {
    let body = payload.as_object().ok_or_else(|| {
        warn!("Status endpoint response is not an object");
        WatchError::Shape
    })?;

    let homeworks = body
        .get(HOMEWORKS_FIELD)
        .and_then(Value::as_array)
        .ok_or(WatchError::MissingField {
            field: HOMEWORKS_FIELD,
        })?;

    let next_cursor = body
        .get(CURSOR_FIELD)
        .and_then(Value::as_i64)
        .ok_or(WatchError::MissingCursor {
            field: CURSOR_FIELD,
        })?;

    let items = homeworks
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            ItemState::deserialize(entry).map_err(|e| {
                warn!(index, error = %e, "Malformed homework entry");
                WatchError::EntryShape { index }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QueryResult { items, next_cursor })
}
