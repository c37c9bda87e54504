//! What the selections and mappings resolve to, and pushing it into the form.
//!
//! - `GET /api/prefill/preview`: selected rows (first columns only) and the
//!   resolved label/value pairs.
//! - `POST /api/prefill/fill`: sends the pairs to the host form.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod fill;
mod preview;

const API_PATH: &str = "/api/prefill";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/preview", get().to(preview::process))
        .route("/fill", post().to(fill::process))
}
