//! In-memory widget state and the operations the author performs on it.
//!
//! `WidgetState` is a plain value: every operation takes it explicitly, and
//! nothing in here performs I/O. Fetching happens in `data_sources`, and the
//! HTTP layer sequences "plan under lock, fetch without it, apply under lock".
//!
//! Sub-modules extend `WidgetState` by concern:
//! - `registry`: sources, cascade on removal
//! - `mapping`: question bindings and auto-mapping
//! - `selection`: one selected row per source
//! - `resolver`: the pure payload resolution
//! - `settings`: credentials and form id

pub mod mapping;
pub mod registry;
pub mod resolver;
pub mod selection;
pub mod settings;

use crate::error::{Result, WidgetError};
use crate::widget::registry::SourceRegistry;
use common::model::mapping::MappingTable;
use common::model::payload::{LabelValue, Preview, SubmitVerdict};
use common::model::persisted::{PersistedSelection, PersistedState, WidgetSnapshot};
use common::model::question::Question;
use common::model::selection::SelectionMap;
use common::model::settings::Settings;
use indexmap::IndexMap;

/// Columns of each selected row shown in the preview.
const PREVIEW_COLUMNS: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    pub settings: Settings,
    pub registry: SourceRegistry,
    pub mapping: MappingTable,
    pub selections: SelectionMap,
    /// Loaded on request from the form-definition provider, never persisted.
    pub questions: Vec<Question>,
    pub map_collapsed: bool,
}

impl WidgetState {
    /// Restores state saved by [`WidgetState::snapshot`]. Selections and sheet
    /// mappings whose source no longer exists are dropped.
    pub fn from_snapshot(snapshot: WidgetSnapshot) -> Self {
        let registry = SourceRegistry::from_parts(snapshot.sources, snapshot.active_source_id);
        let mut mapping = snapshot.mapping;
        mapping.retain(|_, m| match m.source_id() {
            Some(id) => registry.contains(id),
            None => true,
        });
        let mut selections = snapshot.selected_rows;
        selections.retain(|source_id, _| registry.contains(source_id));

        Self {
            settings: snapshot.settings,
            registry,
            mapping,
            selections,
            questions: Vec::new(),
            map_collapsed: snapshot.map_collapsed,
        }
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            settings: self.settings.clone(),
            sources: self.registry.sources().to_vec(),
            active_source_id: self.registry.active_id().map(str::to_string),
            mapping: self.mapping.clone(),
            selected_rows: self.selections.clone(),
            map_collapsed: self.map_collapsed,
        }
    }

    /// The value handed to the host runtime: source shapes, mappings and which
    /// sources have a selection.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            form_id: self.settings.form_id.clone(),
            api_base: self.settings.api_base.clone(),
            sources: self.registry.sources().iter().map(|s| s.summary()).collect(),
            mapping: self.mapping.clone(),
            selected_rows: self
                .selections
                .keys()
                .map(|source_id| PersistedSelection {
                    source_id: source_id.clone(),
                })
                .collect(),
            map_collapsed: self.map_collapsed,
        }
    }

    pub fn payload(&self) -> Vec<LabelValue> {
        resolver::resolve(&self.questions, &self.mapping, &self.selections)
    }

    pub fn preview(&self) -> Preview {
        let rows = self
            .selections
            .iter()
            .map(|(source_id, selected)| {
                let name = self
                    .registry
                    .get(source_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| source_id.clone());
                (name, selected.row.truncated(PREVIEW_COLUMNS))
            })
            .collect();
        let payload: IndexMap<_, _> = self
            .payload()
            .into_iter()
            .map(|pair| (pair.label, pair.value))
            .collect();
        Preview { rows, payload }
    }

    /// The pairs for a fill, refusing when there is nothing to fill with.
    pub fn fill_payload(&self) -> Result<Vec<LabelValue>> {
        if self.selections.is_empty() {
            return Err(WidgetError::Validation("Pick at least one row.".to_string()));
        }
        let pairs = self.payload();
        if pairs.is_empty() {
            return Err(WidgetError::Validation(
                "No mapped values derived from selections.".to_string(),
            ));
        }
        Ok(pairs)
    }

    pub fn submit_verdict(&self) -> Result<SubmitVerdict> {
        let value = serde_json::to_string(&self.persisted_state())
            .map_err(|e| WidgetError::Storage(e.to_string()))?;
        Ok(SubmitVerdict {
            valid: !self.payload().is_empty(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sources::Table;
    use common::model::datasource::SourceType;
    use common::model::mapping::FieldMapping;
    use common::model::payload::FieldValue;
    use common::model::row::Row;
    use common::requests::AddSourceRequest;

    fn loaded_state() -> (WidgetState, String) {
        let mut state = WidgetState::default();
        let id = state
            .registry
            .upsert(AddSourceRequest {
                source_type: SourceType::Csv,
                name: "People".into(),
                url: "https://x/people.csv".into(),
                key_column: None,
                api: None,
            })
            .unwrap()
            .source_id;
        let mut row = Row::new();
        row.insert("Name", "Alice");
        row.insert("Email", "a@x.com");
        state
            .registry
            .apply(
                &id,
                Table {
                    headers: vec!["Name".into(), "Email".into()],
                    rows: vec![row],
                },
            )
            .unwrap();
        state.questions = vec![Question {
            id: "q1".into(),
            label: "Full name".into(),
            kind: "control_textbox".into(),
            name: "fullName".into(),
            order: 1,
            options: Vec::new(),
            allow_other: false,
        }];
        (state, id)
    }

    #[test]
    fn fill_needs_a_selection_and_a_value() {
        let (mut state, id) = loaded_state();
        assert!(matches!(state.fill_payload(), Err(WidgetError::Validation(_))));

        state.select_row(&id, 0).unwrap();
        assert!(matches!(state.fill_payload(), Err(WidgetError::Validation(_))));

        state.set_mapping("q1", FieldMapping::sheet(&id, "Name")).unwrap();
        let pairs = state.fill_payload().unwrap();
        assert_eq!(pairs, vec![LabelValue::new("Full name", "Alice")]);
    }

    #[test]
    fn preview_keys_rows_by_source_name() {
        let (mut state, id) = loaded_state();
        state.select_row(&id, 0).unwrap();
        state.set_mapping("q1", FieldMapping::sheet(&id, "Email")).unwrap();
        let preview = state.preview();
        assert_eq!(preview.rows["People"].text("Name"), "Alice");
        assert_eq!(
            preview.payload.get("Full name"),
            Some(&FieldValue::Text("a@x.com".into()))
        );
    }

    #[test]
    fn persisted_state_uses_the_host_layout() {
        let (mut state, id) = loaded_state();
        state.select_row(&id, 0).unwrap();
        state.set_mapping("q1", FieldMapping::sheet(&id, "Name")).unwrap();
        state.settings.form_id = Some("123456789".into());

        let value = serde_json::to_value(state.persisted_state()).unwrap();
        assert_eq!(value["formId"], "123456789");
        assert_eq!(value["apiBase"], "https://api.jotform.com");
        assert_eq!(value["sources"][0]["rowCount"], 1);
        assert_eq!(value["sources"][0]["keyColumn"], "Email");
        assert_eq!(value["sources"][0]["headers"][1], "Email");
        assert_eq!(value["mapping"]["q1"]["mode"], "sheet");
        assert_eq!(value["selectedRows"][0]["sourceId"], id.as_str());
        assert_eq!(value["mapCollapsed"], false);
        assert!(value["sources"][0].get("rows").is_none());
    }

    #[test]
    fn snapshot_round_trip_drops_orphans() {
        let (mut state, id) = loaded_state();
        state.select_row(&id, 0).unwrap();
        state.set_mapping("q1", FieldMapping::sheet(&id, "Name")).unwrap();
        state.map_collapsed = true;

        let mut snapshot = state.snapshot();
        let restored = WidgetState::from_snapshot(snapshot.clone());
        assert_eq!(restored.registry.sources(), state.registry.sources());
        assert_eq!(restored.selections, state.selections);
        assert_eq!(restored.mapping, state.mapping);
        assert!(restored.map_collapsed);
        assert!(restored.questions.is_empty());

        snapshot.sources.clear();
        let restored = WidgetState::from_snapshot(snapshot);
        assert!(restored.selections.is_empty());
        assert!(restored.mapping.is_empty());
        assert_eq!(restored.registry.active_id(), None);
    }

    #[test]
    fn submit_is_valid_only_with_a_payload() {
        let (mut state, id) = loaded_state();
        assert!(!state.submit_verdict().unwrap().valid);
        state.select_row(&id, 0).unwrap();
        state.set_mapping("q1", FieldMapping::sheet(&id, "Name")).unwrap();
        let verdict = state.submit_verdict().unwrap();
        assert!(verdict.valid);
        assert!(verdict.value.contains("\"mapping\""));
    }
}
