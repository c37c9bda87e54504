//! Ordered collection of data sources and the currently active one.

use crate::data_sources::{default_key_column, SourceOrigin, Table};
use crate::error::{Result, WidgetError};
use crate::widget::WidgetState;
use common::model::datasource::{
    ApiConfig, RowMatch, RowSearch, Source, SourceList, SourceType,
};
use common::requests::AddSourceRequest;
use uuid::Uuid;

/// Most rows returned by a single lookup.
pub const ROW_PREVIEW_CAP: usize = 200;

/// What to fetch, and for which source, once the state lock is released.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub source_id: String,
    pub origin: SourceOrigin,
    /// False when an existing `(type, url)` source was updated instead.
    pub created: bool,
    /// Settings of an existing source that only take effect once the fetch
    /// made with them succeeds.
    pub edit: Option<SourceEdit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceEdit {
    pub name: String,
    pub key_column: Option<String>,
    pub api_config: Option<ApiConfig>,
}

impl SourceEdit {
    fn apply_to(&self, source: &mut Source) {
        source.name = self.name.clone();
        if self.key_column.is_some() {
            source.key_column = self.key_column.clone();
        }
        if self.api_config.is_some() {
            source.api_config = self.api_config.clone();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
    active: Option<String>,
}

impl SourceRegistry {
    /// Rebuilds a registry; an unknown active id falls back to the first
    /// source.
    pub fn from_parts(sources: Vec<Source>, active: Option<String>) -> Self {
        let mut registry = Self { sources, active };
        if registry.active_source().is_none() {
            registry.active = registry.sources.first().map(|s| s.id.clone());
        }
        registry
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn get(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Source> {
        self.sources.iter_mut().find(|s| s.id == id)
    }

    fn require(&self, id: &str) -> Result<&Source> {
        self.get(id)
            .ok_or_else(|| WidgetError::NotFound(format!("Source {}", id)))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_source(&self) -> Option<&Source> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Registers a source, or plans an update of the one with the same type
    /// and URL.
    ///
    /// New sources start without headers or rows. An existing source is left
    /// as it is: the plan fetches with the new settings and carries them as
    /// an edit for [`SourceRegistry::update`].
    pub fn upsert(&mut self, request: AddSourceRequest) -> Result<FetchPlan> {
        let name = request.name.trim().to_string();
        let url = request.url.trim().to_string();
        if name.is_empty() || url.is_empty() {
            return Err(WidgetError::Validation(
                "Enter a source name and URL.".to_string(),
            ));
        }
        let key_column = request
            .key_column
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let api_config = match request.source_type {
            SourceType::Api => {
                let fields = request.api.unwrap_or_default();
                Some(ApiConfig {
                    url: url.clone(),
                    method: fields.method,
                    headers: fields.headers,
                    body: fields.body,
                    row_path: fields.row_path.trim().to_string(),
                })
            }
            SourceType::Csv => None,
        };

        let source_type = request.source_type;
        if let Some(existing) = self
            .sources
            .iter()
            .find(|s| s.source_type == source_type && s.url == url)
        {
            let edit = SourceEdit {
                name,
                key_column,
                api_config,
            };
            let mut edited = existing.clone();
            edit.apply_to(&mut edited);
            let mut plan = plan_for(&edited);
            plan.created = false;
            plan.edit = Some(edit);
            return Ok(plan);
        }

        let source = Source {
            id: new_source_id(),
            source_type,
            name,
            url,
            key_column,
            api_config,
            headers: None,
            rows: None,
        };
        let plan = plan_for(&source);
        self.sources.push(source);
        Ok(plan)
    }

    pub fn plan_refresh(&self, id: &str) -> Result<FetchPlan> {
        let mut plan = plan_for(self.require(id)?);
        plan.created = false;
        Ok(plan)
    }

    pub fn update(&mut self, id: &str, edit: &SourceEdit) -> Result<()> {
        let source = self
            .get_mut(id)
            .ok_or_else(|| WidgetError::NotFound(format!("Source {}", id)))?;
        edit.apply_to(source);
        Ok(())
    }

    /// Replaces a source's data with a freshly loaded table and defaults its
    /// key column when none is set.
    pub fn apply(&mut self, id: &str, table: Table) -> Result<&Source> {
        let source = self
            .get_mut(id)
            .ok_or_else(|| WidgetError::NotFound(format!("Source {}", id)))?;
        if source.key_column.is_none() {
            source.key_column = default_key_column(&table.headers);
        }
        source.headers = Some(table.headers);
        source.rows = Some(table.rows);
        Ok(&*source)
    }

    /// Drops a source. When it was active, the first remaining source takes
    /// over.
    pub fn remove(&mut self, id: &str) -> Option<Source> {
        let index = self.sources.iter().position(|s| s.id == id)?;
        let removed = self.sources.remove(index);
        if self.active.as_deref() == Some(id) {
            self.active = self.sources.first().map(|s| s.id.clone());
        }
        Some(removed)
    }

    pub fn set_active(&mut self, id: &str) -> Result<()> {
        self.require(id)?;
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Rows whose lookup column contains `query`, case-insensitively.
    pub fn search_rows(&self, id: &str, query: &str) -> Result<RowSearch> {
        let source = self.require(id)?;
        let query = query.trim().to_lowercase();
        let lookup_column = source.lookup_column().map(str::to_string);

        let matches = match (&source.rows, &lookup_column) {
            (Some(rows), Some(column)) => rows
                .iter()
                .enumerate()
                .filter(|(_, row)| {
                    query.is_empty() || row.text(column).to_lowercase().contains(&query)
                })
                .take(ROW_PREVIEW_CAP)
                .map(|(row_index, row)| RowMatch {
                    row_index,
                    row: row.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(RowSearch {
            source_id: source.id.clone(),
            lookup_column,
            headers: source.headers.clone().unwrap_or_default(),
            matches,
        })
    }

    pub fn list(&self) -> SourceList {
        SourceList {
            active_source_id: self.active.clone(),
            sources: self.sources.iter().map(Source::summary).collect(),
        }
    }
}

fn plan_for(source: &Source) -> FetchPlan {
    let origin = match source.source_type {
        SourceType::Csv => SourceOrigin::Csv {
            url: source.url.clone(),
        },
        SourceType::Api => SourceOrigin::Api(source.api_config.clone().unwrap_or_else(|| {
            ApiConfig {
                url: source.url.clone(),
                ..Default::default()
            }
        })),
    };
    FetchPlan {
        source_id: source.id.clone(),
        origin,
        created: true,
        edit: None,
    }
}

fn new_source_id() -> String {
    format!("s_{}", Uuid::new_v4().simple())
}

impl WidgetState {
    /// Removes a source together with every mapping bound to it and its
    /// selected row. Unknown ids are ignored.
    pub fn remove_source(&mut self, id: &str) -> Option<Source> {
        let removed = self.registry.remove(id)?;
        self.mapping.retain(|_, mapping| mapping.source_id() != Some(id));
        self.selections.shift_remove(id);
        Some(removed)
    }
}
