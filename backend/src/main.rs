mod config;
mod data_sources;
mod error;
mod forms;
mod host;
mod services;
mod state_controller;
mod store;
mod widget;

use crate::config::Config;
use crate::data_sources::fetch::HttpFetcher;
use crate::host::local::LocalHost;
use crate::state_controller::state::AppState;
use crate::store::SqliteStore;
use crate::widget::WidgetState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;

fn io_error(err: error::WidgetError) -> io::Error {
    io::Error::other(err.to_string())
}

fn restore(store: &SqliteStore, config: &Config) -> WidgetState {
    match store.load() {
        Ok(Some(snapshot)) => {
            let widget = WidgetState::from_snapshot(snapshot);
            info!(
                "restored {} sources and {} mappings",
                widget.registry.sources().len(),
                widget.mapping.len()
            );
            widget
        }
        Ok(None) => {
            let mut widget = WidgetState::default();
            widget.settings.api_base = config.api_base.clone();
            widget
        }
        Err(e) => {
            warn!("stored widget state unreadable, starting empty: {}", e);
            WidgetState::default()
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env();

    let store = SqliteStore::open(&config.db_path).map_err(io_error)?;
    let widget = restore(&store, &config);
    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout).map_err(io_error)?);
    let host = Arc::new(LocalHost::new());

    let state = AppState::new(widget, fetcher, host.clone(), store, config.debounce);
    state.register_handlers();

    info!("Server running at {}", config.url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::from(host.clone()))
            .service(services::sources::configure_routes())
            .service(services::selection::configure_routes())
            .service(services::mapping::configure_routes())
            .service(services::questions::configure_routes())
            .service(services::prefill::configure_routes())
            .service(services::settings::configure_routes())
            .service(services::host::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
