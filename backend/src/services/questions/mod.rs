//! Questions of the host form.
//!
//! - `POST /api/questions/load` fetches them with the stored API key and the
//!   resolved form id, and returns the fresh mapping table.
//! - `GET /api/questions` lists what was loaded last.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod list;
mod load;

const API_PATH: &str = "/api/questions";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/load", post().to(load::process))
}
