use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use common::requests::CollapseRequest;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<CollapseRequest>,
) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.map_collapsed = payload.collapsed;
            Ok(widget.mapping_view())
        })
        .await;
    match result {
        Ok(view) => HttpResponse::Ok().json(Outcome::new(view.summary.describe(), view)),
        Err(e) => error_response(&e),
    }
}
