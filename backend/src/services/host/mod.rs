//! Stand-in for the form runtime when the widget runs on its own.
//!
//! - `POST /api/host/ready`: delivers the ready event (form id, referrer).
//! - `POST /api/host/submit`: asks the widget for its submit verdict.
//! - `GET /api/host/outbox`: the last fields filled and the last emitted value.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod events;
mod outbox;

const API_PATH: &str = "/api/host";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/ready", post().to(events::ready))
        .route("/submit", post().to(events::submit))
        .route("/outbox", get().to(outbox::process))
}
