use crate::error::{Result, WidgetError};
use crate::widget::WidgetState;
use common::model::mapping::{
    ColumnOption, FieldMapping, MappingRow, MappingSummary, MappingView,
};
use std::collections::HashMap;

impl WidgetState {
    /// Binds a question to a value strategy.
    ///
    /// Sheet mappings must point at an existing source (and at one of its
    /// headers once loaded). Choice mappings are only accepted for choice
    /// fields. Question ids are checked once questions are loaded.
    pub fn set_mapping(&mut self, question_id: &str, mapping: FieldMapping) -> Result<()> {
        let question = self.questions.iter().find(|q| q.id == question_id);
        if !self.questions.is_empty() && question.is_none() {
            return Err(WidgetError::NotFound(format!("Question {}", question_id)));
        }

        match &mapping {
            FieldMapping::Sheet { source_id, column } => {
                let source = self
                    .registry
                    .get(source_id)
                    .ok_or_else(|| WidgetError::NotFound(format!("Source {}", source_id)))?;
                if let Some(headers) = &source.headers {
                    if !headers.contains(column) {
                        return Err(WidgetError::Validation(format!(
                            "\"{}\" has no column \"{}\".",
                            source.name, column
                        )));
                    }
                }
            }
            FieldMapping::Choice { value } => {
                if let Some(question) = question {
                    if !question.is_choice() {
                        return Err(WidgetError::Validation(format!(
                            "\"{}\" is not a choice field.",
                            question.label
                        )));
                    }
                    if !question.options.is_empty() && !question.options.contains(value) {
                        return Err(WidgetError::Validation(format!(
                            "\"{}\" is not an option of \"{}\".",
                            value, question.label
                        )));
                    }
                }
            }
            FieldMapping::Manual { .. } => {}
        }

        self.mapping.insert(question_id.to_string(), mapping);
        Ok(())
    }

    pub fn unset_mapping(&mut self, question_id: &str) -> bool {
        self.mapping.shift_remove(question_id).is_some()
    }

    pub fn clear_mapping(&mut self) {
        self.mapping.clear();
    }

    /// Maps every question whose trimmed label equals a column name, ignoring
    /// case. With the same column in several sources the first source wins.
    /// Questions without a match keep whatever mapping they had.
    ///
    /// Returns how many questions were mapped.
    pub fn auto_map(&mut self) -> usize {
        let mut columns: HashMap<String, (&str, &str)> = HashMap::new();
        for source in self.registry.sources() {
            for header in source.headers.iter().flatten() {
                columns
                    .entry(header.to_lowercase())
                    .or_insert((source.id.as_str(), header.as_str()));
            }
        }

        let mut matched = Vec::new();
        for question in &self.questions {
            let key = question.label.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            if let Some((source_id, column)) = columns.get(&key) {
                matched.push((question.id.clone(), FieldMapping::sheet(*source_id, *column)));
            }
        }

        let count = matched.len();
        self.mapping.extend(matched);
        count
    }

    pub fn mapping_summary(&self) -> MappingSummary {
        MappingSummary {
            mapped: self.mapping.len(),
            total: self.questions.len(),
            collapsed: self.map_collapsed,
        }
    }

    /// The mapping table: one line per question with its current binding and
    /// the columns and choices it may be bound to.
    pub fn mapping_view(&self) -> MappingView {
        let columns: Vec<ColumnOption> = self
            .registry
            .sources()
            .iter()
            .flat_map(|source| {
                source.headers.iter().flatten().map(|header| ColumnOption {
                    source_id: source.id.clone(),
                    source_name: source.name.clone(),
                    column: header.clone(),
                })
            })
            .collect();

        let rows = self
            .questions
            .iter()
            .map(|question| MappingRow {
                question_id: question.id.clone(),
                label: question.label.clone(),
                short_type: question.short_type().to_string(),
                mapping: self.mapping.get(&question.id).cloned(),
                columns: columns.clone(),
                choices: if question.is_choice() {
                    question.options.clone()
                } else {
                    Vec::new()
                },
            })
            .collect();

        MappingView {
            summary: self.mapping_summary(),
            rows,
        }
    }
}
