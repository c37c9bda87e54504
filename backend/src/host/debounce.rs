//! Coalesces bursts of values into one delivery after a quiet period.
//!
//! Values go through an unbounded channel to a single background task. The
//! task waits until no new value arrived for `quiet`, then hands the latest
//! one to the sink. Dropping every handle flushes the pending value.

use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Starts the background task. Must be called inside a Tokio runtime.
    pub fn spawn<F>(quiet: Duration, sink: F) -> Self
    where
        F: Fn(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(quiet, rx, sink));
        Self { tx }
    }

    pub fn trigger(&self, value: T) {
        if self.tx.send(value).is_err() {
            debug!("debouncer stopped, value dropped");
        }
    }
}

async fn run<T, F: Fn(T)>(quiet: Duration, mut rx: mpsc::UnboundedReceiver<T>, sink: F) {
    while let Some(mut latest) = rx.recv().await {
        loop {
            match timeout(quiet, rx.recv()).await {
                Ok(Some(next)) => latest = next,
                // closed or quiet
                Ok(None) | Err(_) => break,
            }
        }
        sink(latest);
    }
}
