use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::RowQuery;

/// Lookup within one source, capped at the first 200 matches.
pub(crate) async fn process(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<RowQuery>,
) -> impl Responder {
    let widget = state.widget.read().await;
    match widget
        .registry
        .search_rows(&id, query.q.as_deref().unwrap_or_default())
    {
        Ok(search) => HttpResponse::Ok().json(search),
        Err(e) => error_response(&e),
    }
}
