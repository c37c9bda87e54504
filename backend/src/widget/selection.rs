use crate::error::{Result, WidgetError};
use crate::widget::WidgetState;
use common::model::selection::SelectedRow;

impl WidgetState {
    /// Selects one row of a source, replacing any earlier selection for it.
    pub fn select_row(&mut self, source_id: &str, row_index: usize) -> Result<&SelectedRow> {
        let source = self
            .registry
            .get(source_id)
            .ok_or_else(|| WidgetError::NotFound(format!("Source {}", source_id)))?;
        let rows = source.rows.as_ref().ok_or_else(|| {
            WidgetError::Validation(format!("No data loaded yet for \"{}\".", source.name))
        })?;
        let row = rows
            .get(row_index)
            .ok_or_else(|| WidgetError::NotFound(format!("Row {}", row_index)))?
            .clone();

        let selected = SelectedRow {
            source_id: source_id.to_string(),
            row,
        };
        self.selections.insert(source_id.to_string(), selected);
        Ok(&self.selections[source_id])
    }

    pub fn unselect(&mut self, source_id: &str) -> bool {
        self.selections.shift_remove(source_id).is_some()
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }
}
