use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;

pub(crate) async fn process(
    state: web::Data<AppState>,
    source_id: web::Path<String>,
) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.unselect(&source_id);
            Ok(widget.preview())
        })
        .await;
    match result {
        Ok(preview) => HttpResponse::Ok().json(Outcome::new("Row unselected.", preview)),
        Err(e) => error_response(&e),
    }
}

pub(crate) async fn clear(state: web::Data<AppState>) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.clear_selections();
            Ok(widget.preview())
        })
        .await;
    match result {
        Ok(preview) => HttpResponse::Ok().json(Outcome::new("Selection cleared.", preview)),
        Err(e) => error_response(&e),
    }
}
