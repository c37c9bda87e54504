use crate::error::{error_response, Result};
use crate::forms::fetch_questions;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use common::model::mapping::MappingView;
use log::info;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    match load_questions(&state).await {
        Ok(view) => HttpResponse::Ok().json(Outcome::new("Questions loaded.", view)),
        Err(e) => error_response(&e),
    }
}

/// Questions live in memory only; they are fetched again after a restart.
async fn load_questions(state: &AppState) -> Result<MappingView> {
    let settings = state.widget.read().await.settings.clone();
    let questions = fetch_questions(state.fetcher.as_ref(), &settings).await?;
    info!("loaded {} questions", questions.len());

    let mut widget = state.widget.write().await;
    widget.questions = questions;
    Ok(widget.mapping_view())
}
