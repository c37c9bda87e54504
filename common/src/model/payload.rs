use crate::model::row::Row;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value pushed into one host form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelValue {
    pub label: String,
    pub value: FieldValue,
}

impl LabelValue {
    pub fn new(label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// What the author sees before filling: the selected rows (a few columns per
/// source, keyed by source name) and the payload as a label-to-value object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub rows: IndexMap<String, Row>,
    pub payload: IndexMap<String, FieldValue>,
}

/// Answer to the host's submit-time validation hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitVerdict {
    pub valid: bool,
    pub value: String,
}
