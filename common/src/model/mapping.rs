use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How one destination question gets its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FieldMapping {
    /// Column of the row currently selected in a source.
    Sheet {
        #[serde(rename = "sourceId")]
        source_id: String,
        column: String,
    },
    /// One of the question's own options.
    Choice { value: String },
    /// Constant typed by the author.
    Manual { value: String },
}

impl FieldMapping {
    pub fn sheet(source_id: impl Into<String>, column: impl Into<String>) -> Self {
        FieldMapping::Sheet {
            source_id: source_id.into(),
            column: column.into(),
        }
    }

    pub fn source_id(&self) -> Option<&str> {
        match self {
            FieldMapping::Sheet { source_id, .. } => Some(source_id),
            _ => None,
        }
    }
}

/// Question id to mapping, in the order the author created them.
pub type MappingTable = IndexMap<String, FieldMapping>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSummary {
    pub mapped: usize,
    pub total: usize,
    pub collapsed: bool,
}

impl MappingSummary {
    pub fn describe(&self) -> String {
        format!("{} of {} fields mapped.", self.mapped, self.total)
    }
}

/// A `(source, column)` the author can bind a question to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOption {
    pub source_id: String,
    pub source_name: String,
    pub column: String,
}

/// One line of the mapping table: the question, what it is bound to, and
/// what it could be bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRow {
    pub question_id: String,
    pub label: String,
    pub short_type: String,
    pub mapping: Option<FieldMapping>,
    pub columns: Vec<ColumnOption>,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingView {
    pub summary: MappingSummary,
    pub rows: Vec<MappingRow>,
}
