use crate::model::datasource::{HttpMethod, SourceType};
use crate::model::mapping::FieldMapping;
use serde::Deserialize;
use serde_json::Value;

/// API-specific fields of the add-source form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiFields {
    pub method: HttpMethod,
    pub headers: String,
    pub body: String,
    pub row_path: String,
}

/// Payload for adding (or re-adding) a data source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSourceRequest {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key_column: Option<String>,
    #[serde(default)]
    pub api: Option<ApiFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRowRequest {
    pub source_id: String,
    pub row_index: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetMappingRequest {
    pub mapping: FieldMapping,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollapseRequest {
    pub collapsed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub manual_form_id: Option<String>,
}

/// What the host runtime hands over once the widget is ready.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadyPayload {
    #[serde(alias = "formID")]
    pub form_id: Option<Value>,
    pub referrer: Option<String>,
    pub settings: Option<Value>,
}
