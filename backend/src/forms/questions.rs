//! Reads the question list of the host form from the form-definition API.

use crate::data_sources::fetch::{Fetcher, OutboundRequest};
use crate::error::{Result, WidgetError};
use common::model::question::Question;
use common::model::settings::Settings;
use log::debug;
use serde_json::Value;
use url::Url;

pub fn questions_url(api_base: &str, form_id: &str, api_key: &str) -> Result<String> {
    let raw = format!("{}/form/{}/questions", api_base.trim_end_matches('/'), form_id);
    let mut url =
        Url::parse(&raw).map_err(|e| WidgetError::Validation(format!("Invalid API base: {}", e)))?;
    url.query_pairs_mut().append_pair("apiKey", api_key);
    Ok(url.into())
}

pub async fn fetch_questions(fetcher: &dyn Fetcher, settings: &Settings) -> Result<Vec<Question>> {
    if settings.api_key.trim().is_empty() {
        return Err(WidgetError::Auth("Paste an API key first.".to_string()));
    }
    let form_id = settings
        .form_id
        .as_deref()
        .ok_or_else(|| WidgetError::Validation("Form ID not available.".to_string()))?;

    let url = questions_url(&settings.api_base, form_id, settings.api_key.trim())?;
    let response = fetcher.fetch(OutboundRequest::get(url)).await?;
    if !response.is_success() {
        return Err(WidgetError::Fetch(format!(
            "questions answered HTTP {}",
            response.status
        )));
    }
    let questions = parse_questions(&response.body)?;
    debug!("form {} has {} data questions", form_id, questions.len());
    Ok(questions)
}

/// Parses `{content: {qid: {...}}}`, drops layout-only controls and orders the
/// rest by their `order`, keeping document order between equal values.
pub fn parse_questions(body: &str) -> Result<Vec<Question>> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| WidgetError::ApiJson(e.to_string()))?;
    let mut questions: Vec<Question> = match document.get("content") {
        Some(Value::Object(content)) => content
            .iter()
            .map(|(id, raw)| question_from_json(id, raw))
            .filter(Question::is_data_field)
            .collect(),
        _ => Vec::new(),
    };
    questions.sort_by_key(|q| q.order);
    Ok(questions)
}

fn question_from_json(id: &str, raw: &Value) -> Question {
    let text = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Question {
        id: id.to_string(),
        label: text("text"),
        kind: text("type"),
        name: text("name"),
        order: raw.get("order").map(parse_order).unwrap_or(0),
        options: raw.get("options").map(parse_options).unwrap_or_default(),
        allow_other: raw.get("allowOther").is_some_and(is_truthy),
    }
}

fn parse_order(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn parse_options(value: &Value) -> Vec<String> {
    let options: Vec<String> = match value {
        Value::String(s) => s.split('|').map(str::to_string).collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };
    options
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "yes" | "true" | "1"),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}
