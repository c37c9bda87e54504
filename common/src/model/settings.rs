use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.jotform.com";

/// Author credentials and form identification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
    pub manual_form_id: String,
    /// Form id resolved from the host's ready payload, referrer or manual entry.
    pub form_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            manual_form_id: String::new(),
            form_id: None,
        }
    }
}

/// Settings as shown to the author; the key itself never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub has_api_key: bool,
    pub api_base: String,
    pub manual_form_id: String,
    pub form_id: Option<String>,
}

impl From<&Settings> for SettingsView {
    fn from(settings: &Settings) -> Self {
        Self {
            has_api_key: !settings.api_key.is_empty(),
            api_base: settings.api_base.clone(),
            manual_form_id: settings.manual_form_id.clone(),
            form_id: settings.form_id.clone(),
        }
    }
}
