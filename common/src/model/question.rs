use serde::{Deserialize, Serialize};

/// Control types that hold no data and never appear in the mapping table.
pub const EXCLUDED_TYPES: [&str; 7] = [
    "control_head",
    "control_text",
    "control_image",
    "control_button",
    "control_collapse",
    "control_pagebreak",
    "control_widget",
];

/// Control types whose options can be offered as fixed choices.
pub const CHOICE_TYPES: [&str; 3] = ["control_dropdown", "control_radio", "control_checkbox"];

/// The multi-select control; its values are sent as a list.
pub const MULTI_SELECT_TYPE: &str = "control_checkbox";

/// A destination field of the host form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub allow_other: bool,
}

impl Question {
    pub fn is_data_field(&self) -> bool {
        !EXCLUDED_TYPES.contains(&self.kind.as_str())
    }

    pub fn is_choice(&self) -> bool {
        CHOICE_TYPES.contains(&self.kind.as_str())
    }

    pub fn is_multi_select(&self) -> bool {
        self.kind == MULTI_SELECT_TYPE
    }

    /// `control_textbox` -> `textbox`
    pub fn short_type(&self) -> &str {
        self.kind.strip_prefix("control_").unwrap_or(&self.kind)
    }
}
