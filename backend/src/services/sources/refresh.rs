use crate::error::{error_response, Result};
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::datasource::SourceSummary;
use common::model::flash::Outcome;

pub(crate) async fn process(state: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    match refresh_source(&state, &id).await {
        Ok(summary) => HttpResponse::Ok().json(Outcome::new("Source reloaded.", summary)),
        Err(e) => error_response(&e),
    }
}

async fn refresh_source(state: &AppState, id: &str) -> Result<SourceSummary> {
    let plan = {
        let widget = state.widget.read().await;
        widget.registry.plan_refresh(id)?
    };
    state.load_source(&plan, false).await
}
