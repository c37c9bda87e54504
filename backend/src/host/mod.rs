//! The boundary to the form runtime that embeds the widget.
//!
//! The runtime announces readiness, asks for a verdict before the form is
//! submitted, and receives two kinds of pushes: label/value pairs to fill into
//! the form and the serialized widget value.

pub mod debounce;
pub mod local;

use common::model::payload::{LabelValue, SubmitVerdict};
use common::requests::ReadyPayload;
use futures_util::future::BoxFuture;

pub type ReadyHandler = Box<dyn Fn(ReadyPayload) -> BoxFuture<'static, ()> + Send + Sync>;
pub type SubmitHandler = Box<dyn Fn() -> BoxFuture<'static, SubmitVerdict> + Send + Sync>;

pub trait HostAdapter: Send + Sync {
    fn on_ready(&self, handler: ReadyHandler);
    fn on_submit(&self, handler: SubmitHandler);
    /// Fills fields of the host form by label.
    fn push_fields(&self, pairs: &[LabelValue]);
    /// Hands over the serialized widget value.
    fn push_value(&self, value: &str);
}
