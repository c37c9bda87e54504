//! Fetch-and-normalize pipelines that turn a source's origin into headers and
//! rows.
//!
//! - CSV: GET, reject non-2xx and HTML pages, sniff the delimiter, parse.
//! - API: build the request from the author's JSON settings, reject non-2xx
//!   and non-JSON bodies, follow the row path, flatten each element.
//!
//! Nothing here touches widget state. Callers apply the resulting [`Table`]
//! only when the whole pipeline succeeded.

pub mod api;
pub mod csv;
pub mod fetch;

use crate::data_sources::fetch::{Fetcher, OutboundRequest};
use crate::error::{Result, WidgetError};
use common::model::datasource::ApiConfig;
use common::model::row::Row;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static KEY_COLUMN_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(email|id|code)$").expect("valid regex"));

/// Headers plus rows keyed by those headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Where a refresh should read from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOrigin {
    Csv { url: String },
    Api(ApiConfig),
}

pub async fn load(fetcher: &dyn Fetcher, origin: &SourceOrigin) -> Result<Table> {
    match origin {
        SourceOrigin::Csv { url } => load_csv(fetcher, url).await,
        SourceOrigin::Api(config) => load_api(fetcher, config).await,
    }
}

async fn load_csv(fetcher: &dyn Fetcher, url: &str) -> Result<Table> {
    let response = fetcher.fetch(OutboundRequest::get(url)).await?;
    if !response.is_success() {
        return Err(WidgetError::Fetch(format!("HTTP {}", response.status)));
    }
    if csv::looks_like_html(&response.body) {
        return Err(WidgetError::HtmlResponse);
    }

    let delimiter = csv::detect_delimiter(&response.body);
    let table = csv::parse_delimited(&response.body, delimiter);
    debug!(
        "parsed {} rows x {} columns from {} (delimiter {:?})",
        table.rows.len(),
        table.headers.len(),
        url,
        delimiter
    );
    Ok(table)
}

async fn load_api(fetcher: &dyn Fetcher, config: &ApiConfig) -> Result<Table> {
    let request = api::build_request(config)?;
    let response = fetcher.fetch(request).await?;
    if !response.is_success() {
        return Err(WidgetError::ApiHttp(response.status));
    }
    let document: Value = serde_json::from_str(&response.body)
        .map_err(|e| WidgetError::ApiJson(e.to_string()))?;

    let table = api::extract_rows(&document, &config.row_path)?;
    debug!(
        "extracted {} rows from {} at {:?}",
        table.rows.len(),
        config.url,
        config.row_path
    );
    Ok(table)
}

/// First header named like an identifier (`email`, `id`, `code`, any case),
/// else the first header.
pub fn default_key_column(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .find(|h| KEY_COLUMN_HINT.is_match(h))
        .or_else(|| headers.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sources::fetch::testing::StubFetcher;
    use common::model::datasource::HttpMethod;

    const CSV_URL: &str = "https://sheets.example.com/export?format=csv";
    const API_URL: &str = "https://api.example.com/people";

    fn api_config(row_path: &str) -> ApiConfig {
        ApiConfig {
            url: API_URL.into(),
            method: HttpMethod::Get,
            row_path: row_path.into(),
            ..Default::default()
        }
    }

    #[test]
    fn key_column_prefers_identifier_headers() {
        let headers = |h: &[&str]| h.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(default_key_column(&headers(&["Name", "EMAIL"])), Some("EMAIL".into()));
        assert_eq!(default_key_column(&headers(&["Name", "Code", "id"])), Some("Code".into()));
        assert_eq!(default_key_column(&headers(&["Name", "Email address"])), Some("Name".into()));
        assert_eq!(default_key_column(&[]), None);
    }

    #[tokio::test]
    async fn csv_pipeline_sniffs_and_parses() {
        let fetcher = StubFetcher::new().respond(CSV_URL, 200, "Email;Name\nA@x.com;Alice\n");
        let origin = SourceOrigin::Csv { url: CSV_URL.into() };
        let table = load(&fetcher, &origin).await.unwrap();
        assert_eq!(table.headers, vec!["Email", "Name"]);
        assert_eq!(table.rows[0].text("Name"), "Alice");
    }

    #[tokio::test]
    async fn csv_pipeline_rejects_errors_and_html() {
        let origin = SourceOrigin::Csv { url: CSV_URL.into() };

        let fetcher = StubFetcher::new().respond(CSV_URL, 404, "missing");
        assert!(matches!(load(&fetcher, &origin).await, Err(WidgetError::Fetch(_))));

        let fetcher = StubFetcher::new().respond(CSV_URL, 200, "<!doctype html><html><body>Login");
        assert!(matches!(load(&fetcher, &origin).await, Err(WidgetError::HtmlResponse)));

        let fetcher = StubFetcher::new();
        assert!(matches!(load(&fetcher, &origin).await, Err(WidgetError::Fetch(_))));
    }

    #[tokio::test]
    async fn api_pipeline_reports_each_failure_kind() {
        let origin = SourceOrigin::Api(api_config("data.items"));

        let fetcher = StubFetcher::new().respond(API_URL, 500, "{}");
        assert!(matches!(load(&fetcher, &origin).await, Err(WidgetError::ApiHttp(500))));

        let fetcher = StubFetcher::new().respond(API_URL, 200, "<html>");
        assert!(matches!(load(&fetcher, &origin).await, Err(WidgetError::ApiJson(_))));

        let fetcher = StubFetcher::new().respond(API_URL, 200, r#"{"data":{"items":{}}}"#);
        assert!(matches!(load(&fetcher, &origin).await, Err(WidgetError::RowPath(_))));

        let mut bad_headers = api_config("");
        bad_headers.headers = "nope".into();
        let fetcher = StubFetcher::new().respond(API_URL, 200, "[]");
        let result = load(&fetcher, &SourceOrigin::Api(bad_headers)).await;
        assert!(matches!(result, Err(WidgetError::HeadersJson(_))));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn api_pipeline_sends_configured_request() {
        let mut config = api_config("results");
        config.method = HttpMethod::Post;
        config.headers = r#"{"X-Key": "k"}"#.into();
        config.body = r#"{ "q": "smith" }"#.into();
        let fetcher =
            StubFetcher::new().respond(API_URL, 201, r#"{"results":[{"id":"7","name":"Smith"}]}"#);

        let table = load(&fetcher, &SourceOrigin::Api(config)).await.unwrap();
        assert_eq!(table.rows[0].text("name"), "Smith");

        let sent = fetcher.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"q":"smith"}"#));
        assert_eq!(sent[0].header("X-Key"), Some("k"));
    }
}
