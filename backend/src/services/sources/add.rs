use crate::error::{error_response, Result};
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::datasource::SourceSummary;
use common::model::flash::Outcome;
use common::requests::AddSourceRequest;
use log::info;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<AddSourceRequest>,
) -> impl Responder {
    match add_source(&state, payload.into_inner()).await {
        Ok((summary, created)) => {
            let message = if created {
                "Source added."
            } else {
                "Updated existing source."
            };
            HttpResponse::Ok().json(Outcome::new(message, summary))
        }
        Err(e) => error_response(&e),
    }
}

/// Registers first and loads second, so a failed load still leaves the
/// source in place for a later refresh.
async fn add_source(state: &AppState, request: AddSourceRequest) -> Result<(SourceSummary, bool)> {
    let plan = state
        .mutate(|widget| widget.registry.upsert(request))
        .await?;
    let summary = state.load_source(&plan, true).await?;
    info!(
        "{} source \"{}\" {} with {} rows",
        summary.source_type.tag(),
        summary.name,
        if plan.created { "added" } else { "updated" },
        summary.row_count
    );
    Ok((summary, plan.created))
}
