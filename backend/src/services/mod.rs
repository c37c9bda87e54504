//! HTTP surface of the widget. Each sub-module owns one `/api/...` scope.

pub mod host;
pub mod mapping;
pub mod prefill;
pub mod questions;
pub mod selection;
pub mod settings;
pub mod sources;
