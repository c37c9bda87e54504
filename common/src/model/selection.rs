use crate::model::row::Row;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Copy of the row the author picked from a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRow {
    pub source_id: String,
    pub row: Row,
}

/// Source id to its single selected row.
pub type SelectionMap = IndexMap<String, SelectedRow>;
