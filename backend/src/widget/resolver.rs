//! Turns mappings and selected rows into the label/value pairs pushed into
//! the host form.
//!
//! Resolution is a pure function of its inputs, so the live preview and the
//! actual fill always agree.

use common::model::mapping::{FieldMapping, MappingTable};
use common::model::payload::{FieldValue, LabelValue};
use common::model::question::Question;
use common::model::selection::SelectionMap;
use indexmap::IndexMap;

/// Resolves every mapped question, in question order.
///
/// Questions resolving to an empty string are left out. Multi-select
/// questions get a list split on `;` or `,`. When two questions share a label
/// the later value wins at the earlier position.
pub fn resolve(
    questions: &[Question],
    mapping: &MappingTable,
    selections: &SelectionMap,
) -> Vec<LabelValue> {
    let mut by_label: IndexMap<String, FieldValue> = IndexMap::new();

    for question in questions {
        let Some(field_mapping) = mapping.get(&question.id) else {
            continue;
        };
        let raw = resolve_text(field_mapping, selections);
        if raw.is_empty() {
            continue;
        }

        let value = if question.is_multi_select() {
            let parts = split_multi(&raw);
            if parts.is_empty() {
                continue;
            }
            FieldValue::List(parts)
        } else {
            FieldValue::Text(raw)
        };
        by_label.insert(question.label.clone(), value);
    }

    by_label
        .into_iter()
        .map(|(label, value)| LabelValue { label, value })
        .collect()
}

fn resolve_text(mapping: &FieldMapping, selections: &SelectionMap) -> String {
    match mapping {
        FieldMapping::Manual { value } | FieldMapping::Choice { value } => value.clone(),
        FieldMapping::Sheet { source_id, column } => selections
            .get(source_id)
            .map(|selected| selected.row.text(column))
            .unwrap_or_default(),
    }
}

/// `"Red, Blue ;Green"` -> `["Red", "Blue", "Green"]`
pub fn split_multi(value: &str) -> Vec<String> {
    value
        .split([';', ','])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::row::{Cell, Row};
    use common::model::selection::SelectedRow;

    fn question(id: &str, label: &str, kind: &str) -> Question {
        Question {
            id: id.into(),
            label: label.into(),
            kind: kind.into(),
            name: String::new(),
            order: 0,
            options: Vec::new(),
            allow_other: false,
        }
    }

    fn select(selections: &mut SelectionMap, source_id: &str, cells: &[(&str, Cell)]) {
        let row: Row = cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        selections.insert(
            source_id.into(),
            SelectedRow {
                source_id: source_id.into(),
                row,
            },
        );
    }

    #[test]
    fn sheet_mapping_reads_the_selected_row() {
        let questions = vec![question("q1", "Q1 label", "control_textbox")];
        let mut mapping = MappingTable::new();
        mapping.insert("q1".into(), FieldMapping::sheet("S", "Name"));
        let mut selections = SelectionMap::new();
        select(&mut selections, "S", &[("Name", "Alice".into())]);

        assert_eq!(
            resolve(&questions, &mapping, &selections),
            vec![LabelValue::new("Q1 label", "Alice")]
        );
    }

    #[test]
    fn checkbox_manual_value_is_split() {
        let questions = vec![question("q1", "Colors", "control_checkbox")];
        let mut mapping = MappingTable::new();
        mapping.insert("q1".into(), FieldMapping::Manual { value: "Red, Blue ;Green".into() });

        let pairs = resolve(&questions, &mapping, &SelectionMap::new());
        assert_eq!(
            pairs,
            vec![LabelValue {
                label: "Colors".into(),
                value: FieldValue::List(vec!["Red".into(), "Blue".into(), "Green".into()]),
            }]
        );
    }

    #[test]
    fn empty_values_are_omitted() {
        let questions = vec![
            question("q1", "No selection", "control_textbox"),
            question("q2", "Blank manual", "control_textbox"),
            question("q3", "Only separators", "control_checkbox"),
            question("q4", "Unmapped", "control_textbox"),
            question("q5", "Missing column", "control_textbox"),
        ];
        let mut mapping = MappingTable::new();
        mapping.insert("q1".into(), FieldMapping::sheet("S", "Name"));
        mapping.insert("q2".into(), FieldMapping::Manual { value: String::new() });
        mapping.insert("q3".into(), FieldMapping::Manual { value: " ; , ".into() });
        mapping.insert("q5".into(), FieldMapping::sheet("T", "Nope"));
        let mut selections = SelectionMap::new();
        select(&mut selections, "T", &[("Name", "x".into())]);

        assert!(resolve(&questions, &mapping, &selections).is_empty());
    }

    #[test]
    fn non_multi_select_values_are_verbatim() {
        let questions = vec![
            question("q1", "Age", "control_number"),
            question("q2", "Plan", "control_radio"),
        ];
        let mut mapping = MappingTable::new();
        mapping.insert("q1".into(), FieldMapping::sheet("S", "age"));
        mapping.insert("q2".into(), FieldMapping::Choice { value: "Gold, yearly".into() });
        let mut selections = SelectionMap::new();
        select(&mut selections, "S", &[("age", Cell::Number(42.into()))]);

        assert_eq!(
            resolve(&questions, &mapping, &selections),
            vec![LabelValue::new("Age", "42"), LabelValue::new("Plan", "Gold, yearly")]
        );
    }

    #[test]
    fn resolution_follows_question_order_and_is_repeatable() {
        let questions = vec![
            question("b", "Second", "control_textbox"),
            question("a", "First", "control_textbox"),
        ];
        let mut mapping = MappingTable::new();
        mapping.insert("a".into(), FieldMapping::Manual { value: "1".into() });
        mapping.insert("b".into(), FieldMapping::Manual { value: "2".into() });

        let once = resolve(&questions, &mapping, &SelectionMap::new());
        let twice = resolve(&questions, &mapping, &SelectionMap::new());
        assert_eq!(once, twice);
        assert_eq!(once[0].label, "Second");
    }

    #[test]
    fn shared_labels_collapse_to_the_last_value() {
        let questions = vec![
            question("a", "Name", "control_textbox"),
            question("b", "Email", "control_email"),
            question("c", "Name", "control_textbox"),
        ];
        let mut mapping = MappingTable::new();
        for (id, value) in [("a", "first"), ("b", "e@x"), ("c", "last")] {
            mapping.insert(id.into(), FieldMapping::Manual { value: value.into() });
        }
        assert_eq!(
            resolve(&questions, &mapping, &SelectionMap::new()),
            vec![LabelValue::new("Name", "last"), LabelValue::new("Email", "e@x")]
        );
    }
}
