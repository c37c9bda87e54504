use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A single scalar value inside a [`Row`].
///
/// CSV data is always text. API data keeps numbers and booleans as they came;
/// nested objects and arrays are flattened to their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Cell {
    pub fn from_json(value: &Value) -> Self {
        match value {
            // Empty cell, not the text "null", so blank API fields resolve to nothing.
            Value::Null => Cell::Text(String::new()),
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => Cell::Number(n.clone()),
            Value::String(s) => Cell::Text(s.clone()),
            nested => Cell::Text(nested.to_string()),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Text(String::new())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// One normalized record, addressable by column name, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Cell>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.0.insert(column.into(), cell.into());
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.0.get(column)
    }

    /// Text of a column; missing columns read as empty.
    pub fn text(&self, column: &str) -> String {
        self.0.get(column).map(Cell::to_string).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First `limit` columns, used for compact previews.
    pub fn truncated(&self, limit: usize) -> Row {
        self.0
            .iter()
            .take(limit)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, Cell)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Cell)>>(iter: T) -> Self {
        Row(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_values_flatten_to_json_text() {
        assert_eq!(Cell::from_json(&json!(["a", "b"])), Cell::Text("[\"a\",\"b\"]".into()));
        assert_eq!(Cell::from_json(&json!({"k": 1})), Cell::Text("{\"k\":1}".into()));
        assert_eq!(Cell::from_json(&json!(null)), Cell::Text(String::new()));
        assert_eq!(Cell::from_json(&json!(7)).to_string(), "7");
        assert_eq!(Cell::from_json(&json!(1.5)).to_string(), "1.5");
        assert_eq!(Cell::from_json(&json!(true)).to_string(), "true");
    }

    #[test]
    fn missing_column_reads_empty() {
        let mut row = Row::new();
        row.insert("Name", "Alice");
        assert_eq!(row.text("Name"), "Alice");
        assert_eq!(row.text("Email"), "");
    }

    #[test]
    fn row_serializes_as_plain_object_in_order() {
        let mut row = Row::new();
        row.insert("b", "2");
        row.insert("a", Cell::Number(1.into()));
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"b":"2","a":1}"#);
    }
}
