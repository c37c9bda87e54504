//! JSON API sources: request building from the author's raw JSON settings and
//! row extraction from arbitrary response shapes.

use crate::data_sources::fetch::OutboundRequest;
use crate::data_sources::Table;
use crate::error::{Result, WidgetError};
use common::model::datasource::ApiConfig;
use common::model::row::{Cell, Row};
use serde_json::Value;

/// Column name given to array elements that are not objects.
pub const SCALAR_COLUMN: &str = "value";

/// Builds the outbound request for an API source.
///
/// Headers and body are parsed from the author's raw JSON text. The body is
/// only sent for methods that carry one, and gets a JSON content type unless
/// the author set one.
pub fn build_request(config: &ApiConfig) -> Result<OutboundRequest> {
    let mut request = OutboundRequest {
        method: config.method,
        url: config.url.trim().to_string(),
        headers: parse_headers(&config.headers)?,
        body: None,
    };

    if config.method.sends_body() && !config.body.trim().is_empty() {
        let parsed: Value = serde_json::from_str(&config.body)
            .map_err(|e| WidgetError::BodyJson(e.to_string()))?;
        if request.header("content-type").is_none() {
            request
                .headers
                .push(("Content-Type".to_string(), "application/json".to_string()));
        }
        request.body = Some(parsed.to_string());
    }

    Ok(request)
}

fn parse_headers(raw: &str) -> Result<Vec<(String, String)>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Value =
        serde_json::from_str(raw).map_err(|e| WidgetError::HeadersJson(e.to_string()))?;
    let object = parsed
        .as_object()
        .ok_or_else(|| WidgetError::HeadersJson("expected a JSON object".to_string()))?;

    Ok(object
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), value)
        })
        .collect())
}

/// Follows a dotted path such as `data.items` or `results.0.rows`.
///
/// An empty path is the document itself. Missing keys, out-of-range indices
/// and scalar intermediates leave the path unresolved.
pub fn resolve_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    if path.is_empty() {
        return Some(document);
    }
    path.split('.').try_fold(document, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Extracts the row array at `path` and flattens every element into a row.
///
/// Headers come from the keys of the first object element. Nested values are
/// kept as JSON text, and non-object elements become a one-column row.
pub fn extract_rows(document: &Value, path: &str) -> Result<Table> {
    let items = resolve_path(document, path)
        .and_then(Value::as_array)
        .ok_or_else(|| WidgetError::row_path(path.trim()))?;

    let headers = items
        .iter()
        .find_map(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();
    let rows = items.iter().map(normalize_element).collect();

    Ok(Table { headers, rows })
}

fn normalize_element(element: &Value) -> Row {
    match element {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| (key.clone(), Cell::from_json(value)))
            .collect(),
        scalar => {
            let mut row = Row::new();
            row.insert(SCALAR_COLUMN, Cell::from_json(scalar));
            row
        }
    }
}
