//! Author credentials and the form id.
//!
//! - `GET /api/settings` shows whether an API key is stored, never the key.
//! - `PUT /api/settings` updates the key, the API base or the manual form id.

use actix_web::web::{get, put, scope};
use actix_web::Scope;

mod save;
mod show;

const API_PATH: &str = "/api/settings";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(show::process))
        .route("", put().to(save::process))
}
