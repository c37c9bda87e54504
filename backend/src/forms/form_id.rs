use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

static FORM_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8,20}$").expect("valid regex"));

/// A path segment made of 8 to 20 digits, `/build/<id>` included.
static PATH_FORM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d{8,20})(?:/|$)").expect("valid regex"));

/// Picks the form id from, in order: the host's ready payload, the page that
/// embeds the widget, and the id the author typed in.
pub fn resolve_form_id(
    from_payload: Option<&Value>,
    referrer: Option<&str>,
    manual: &str,
) -> Option<String> {
    from_payload
        .and_then(payload_form_id)
        .or_else(|| referrer.and_then(form_id_from_url))
        .or_else(|| {
            let manual = manual.trim();
            FORM_ID.is_match(manual).then(|| manual.to_string())
        })
}

fn payload_form_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn form_id_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if let Some(caps) = PATH_FORM_ID.captures(url.path()) {
        return Some(caps[1].to_string());
    }
    url.query_pairs()
        .find(|(key, _)| key == "formID")
        .or_else(|| url.query_pairs().find(|(key, _)| key == "formId"))
        .map(|(_, value)| value.into_owned())
        .filter(|value| FORM_ID.is_match(value))
}
