//! Data source management.
//!
//! The provided routes are:
//! - `GET /api/sources`: all sources without their rows, plus the active id.
//! - `POST /api/sources`: registers a CSV or API source (or updates the one
//!   with the same type and URL), loads it and makes it active. When the load
//!   fails the source stays registered without data.
//! - `POST /api/sources/{id}/refresh`: loads the source again.
//! - `DELETE /api/sources/{id}`: removes the source with its mappings and
//!   selected row.
//! - `POST /api/sources/{id}/activate`: switches the active source.
//! - `GET /api/sources/{id}/rows?q=`: rows whose lookup column contains `q`.

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

mod activate;
mod add;
mod list;
mod refresh;
mod remove;
mod rows;

const API_PATH: &str = "/api/sources";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(add::process))
        .route("/{id}", delete().to(remove::process))
        .route("/{id}/refresh", post().to(refresh::process))
        .route("/{id}/activate", post().to(activate::process))
        .route("/{id}/rows", get().to(rows::process))
}
