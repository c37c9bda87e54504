//! The host form: where its id comes from and which questions it has.

pub mod form_id;
pub mod questions;

pub use form_id::resolve_form_id;
pub use questions::fetch_questions;
