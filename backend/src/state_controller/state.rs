//! Shared application state and the rules for changing it.
//!
//! `AppState` is cloned into every Actix worker as `web::Data`. It holds:
//! - the widget state behind a Tokio `RwLock`,
//! - the outbound [`Fetcher`] and the [`HostAdapter`],
//! - the sqlite store, written on every committed change,
//! - a [`Debouncer`] that forwards the serialized widget value to the host.
//!
//! Mutations go through [`AppState::mutate`]: the closure works on a copy,
//! and the copy replaces the live state only once it is stored. A failed
//! action therefore leaves nothing half-applied.
//!
//! Fetches never run under the lock. Loading a source reads its plan, drops
//! the lock, awaits the network, and then applies the table under a fresh
//! lock. If two loads race, the last one to apply wins.

use crate::data_sources::{self, fetch::Fetcher};
use crate::error::{Result, WidgetError};
use crate::host::debounce::Debouncer;
use crate::host::HostAdapter;
use crate::store::SqliteStore;
use crate::widget::registry::FetchPlan;
use crate::widget::WidgetState;
use common::model::datasource::SourceSummary;
use common::model::payload::SubmitVerdict;
use common::requests::ReadyPayload;
use futures_util::FutureExt;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub widget: Arc<RwLock<WidgetState>>,
    pub fetcher: Arc<dyn Fetcher>,
    pub host: Arc<dyn HostAdapter>,
    store: Arc<SqliteStore>,
    emitter: Debouncer<String>,
}

impl AppState {
    /// Must be called inside a Tokio runtime, the emitter task is spawned here.
    pub fn new(
        widget: WidgetState,
        fetcher: Arc<dyn Fetcher>,
        host: Arc<dyn HostAdapter>,
        store: SqliteStore,
        quiet: Duration,
    ) -> Self {
        let sink = host.clone();
        let emitter = Debouncer::spawn(quiet, move |value: String| sink.push_value(&value));
        Self {
            widget: Arc::new(RwLock::new(widget)),
            fetcher,
            host,
            store: Arc::new(store),
            emitter,
        }
    }

    /// Stores the snapshot and schedules the host emission.
    fn commit(&self, widget: &WidgetState) -> Result<()> {
        self.store.save(&widget.snapshot())?;
        let value = serde_json::to_string(&widget.persisted_state())
            .map_err(|e| WidgetError::Storage(e.to_string()))?;
        self.emitter.trigger(value);
        Ok(())
    }

    pub async fn mutate<R, F>(&self, change: F) -> Result<R>
    where
        F: FnOnce(&mut WidgetState) -> Result<R>,
    {
        let mut widget = self.widget.write().await;
        let mut next = widget.clone();
        let result = change(&mut next)?;
        self.commit(&next)?;
        *widget = next;
        Ok(result)
    }

    /// Fetches a planned source and stores its table together with any
    /// pending settings edit. With `activate`, the source also becomes the
    /// active one. A failed fetch stores nothing.
    pub async fn load_source(&self, plan: &FetchPlan, activate: bool) -> Result<SourceSummary> {
        let table = data_sources::load(self.fetcher.as_ref(), &plan.origin).await?;
        self.mutate(|widget| {
            if let Some(edit) = &plan.edit {
                widget.registry.update(&plan.source_id, edit)?;
            }
            let summary = widget.registry.apply(&plan.source_id, table)?.summary();
            if activate {
                widget.registry.set_active(&plan.source_id)?;
            }
            Ok(summary)
        })
        .await
    }

    pub async fn ready(&self, payload: ReadyPayload) -> Result<Option<String>> {
        self.mutate(|widget| Ok(widget.apply_ready(&payload).map(str::to_string)))
            .await
    }

    pub async fn submit_verdict(&self) -> SubmitVerdict {
        let widget = self.widget.read().await;
        widget.submit_verdict().unwrap_or_else(|e| {
            warn!("submit check failed: {}", e);
            SubmitVerdict {
                valid: false,
                value: String::new(),
            }
        })
    }

    /// Subscribes the widget to the host's ready and submit events.
    pub fn register_handlers(&self) {
        let state = self.clone();
        self.host.on_ready(Box::new(move |payload: ReadyPayload| {
            let state = state.clone();
            async move {
                if let Err(e) = state.ready(payload).await {
                    warn!("ready handling failed: {}", e);
                }
            }
            .boxed()
        }));

        let state = self.clone();
        self.host.on_submit(Box::new(move || {
            let state = state.clone();
            async move { state.submit_verdict().await }.boxed()
        }));
        info!("host handlers registered");
    }
}
