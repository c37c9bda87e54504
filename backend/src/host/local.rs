//! A host adapter for running the widget on its own.
//!
//! Pushes are logged and kept in an [`Outbox`] the author surface can read
//! back. Ready and submit events are dispatched from HTTP requests.

use crate::host::{HostAdapter, ReadyHandler, SubmitHandler};
use common::model::payload::{LabelValue, SubmitVerdict};
use common::requests::ReadyPayload;
use log::{info, warn};
use serde::Serialize;
use std::sync::{Mutex, PoisonError, RwLock};

/// The most recent pushes towards the host form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outbox {
    pub fields: Vec<LabelValue>,
    pub value: Option<String>,
    pub fills: usize,
    pub emissions: usize,
}

#[derive(Default)]
pub struct LocalHost {
    ready: RwLock<Option<ReadyHandler>>,
    submit: RwLock<Option<SubmitHandler>>,
    outbox: Mutex<Outbox>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn dispatch_ready(&self, payload: ReadyPayload) {
        let pending = {
            let handler = self.ready.read().unwrap_or_else(PoisonError::into_inner);
            handler.as_ref().map(|handler| handler(payload))
        };
        match pending {
            Some(pending) => pending.await,
            None => warn!("ready event without a handler"),
        }
    }

    pub async fn dispatch_submit(&self) -> Option<SubmitVerdict> {
        let pending = {
            let handler = self.submit.read().unwrap_or_else(PoisonError::into_inner);
            handler.as_ref().map(|handler| handler())
        };
        match pending {
            Some(pending) => Some(pending.await),
            None => {
                warn!("submit event without a handler");
                None
            }
        }
    }

    pub fn outbox(&self) -> Outbox {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HostAdapter for LocalHost {
    fn on_ready(&self, handler: ReadyHandler) {
        *self.ready.write().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    fn on_submit(&self, handler: SubmitHandler) {
        *self.submit.write().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    fn push_fields(&self, pairs: &[LabelValue]) {
        info!("filling {} fields by label", pairs.len());
        let mut outbox = self.outbox.lock().unwrap_or_else(PoisonError::into_inner);
        outbox.fields = pairs.to_vec();
        outbox.fills += 1;
    }

    fn push_value(&self, value: &str) {
        info!("widget value updated ({} bytes)", value.len());
        let mut outbox = self.outbox.lock().unwrap_or_else(PoisonError::into_inner);
        outbox.value = Some(value.to_string());
        outbox.emissions += 1;
    }
}
