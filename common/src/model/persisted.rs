use crate::model::datasource::{Source, SourceSummary};
use crate::model::mapping::MappingTable;
use crate::model::selection::SelectionMap;
use crate::model::settings::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSelection {
    pub source_id: String,
}

/// The opaque value emitted to the host runtime after state changes.
///
/// Rows and the selected row contents are left out; only their shape is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub form_id: Option<String>,
    pub api_base: String,
    pub sources: Vec<SourceSummary>,
    pub mapping: MappingTable,
    pub selected_rows: Vec<PersistedSelection>,
    pub map_collapsed: bool,
}

/// Everything the widget needs to come back after a restart, rows included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetSnapshot {
    pub settings: Settings,
    pub sources: Vec<Source>,
    pub active_source_id: Option<String>,
    pub mapping: MappingTable,
    pub selected_rows: SelectionMap,
    pub map_collapsed: bool,
}
