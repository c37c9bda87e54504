use crate::model::row::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a source's rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Csv,
    Api,
}

impl SourceType {
    pub fn tag(&self) -> &'static str {
        match self {
            SourceType::Csv => "CSV",
            SourceType::Api => "API",
        }
    }
}

/// HTTP verbs accepted for API sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Only POST, PUT and PATCH carry the configured JSON body.
    pub fn sends_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request settings for an API-backed source.
///
/// `headers` and `body` hold the raw JSON text typed by the author. They are
/// parsed right before each request so that a typo surfaces as an error on the
/// refresh that uses it, not when the source is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: String,
    #[serde(default)]
    pub body: String,
    /// Dotted path to the row array inside the response, empty for the root.
    #[serde(default)]
    pub row_path: String,
}

/// A named, fetchable origin of tabular data.
///
/// `headers` and `rows` stay `None` until the first successful fetch. A failed
/// refresh never clears them, so stale data keeps serving selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub name: String,
    pub url: String,
    pub key_column: Option<String>,
    pub api_config: Option<ApiConfig>,
    pub headers: Option<Vec<String>>,
    pub rows: Option<Vec<Row>>,
}

impl Source {
    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map(Vec::len).unwrap_or(0)
    }

    /// Column used for row lookups: the configured key column when it is one of
    /// the headers, otherwise the first header.
    pub fn lookup_column(&self) -> Option<&str> {
        let headers = self.headers.as_ref()?;
        match &self.key_column {
            Some(key) if headers.iter().any(|h| h == key) => Some(key.as_str()),
            _ => headers.first().map(String::as_str),
        }
    }

    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            id: self.id.clone(),
            source_type: self.source_type,
            name: self.name.clone(),
            url: self.url.clone(),
            key_column: self.key_column.clone(),
            headers: self.headers.clone().unwrap_or_default(),
            row_count: self.row_count(),
            api_config: self.api_config.clone(),
        }
    }
}

/// Row-less description of a source, as listed to the author and emitted to
/// the host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub name: String,
    pub url: String,
    pub key_column: Option<String>,
    pub headers: Vec<String>,
    pub row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_config: Option<ApiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceList {
    pub active_source_id: Option<String>,
    pub sources: Vec<SourceSummary>,
}

/// One row matched by a key-column search, with its index in the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowMatch {
    pub row_index: usize,
    pub row: Row,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSearch {
    pub source_id: String,
    pub lookup_column: Option<String>,
    pub headers: Vec<String>,
    pub matches: Vec<RowMatch>,
}
