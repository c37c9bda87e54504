use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use common::requests::SetMappingRequest;

pub(crate) async fn process(
    state: web::Data<AppState>,
    question_id: web::Path<String>,
    payload: web::Json<SetMappingRequest>,
) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.set_mapping(&question_id, payload.into_inner().mapping)?;
            Ok(widget.mapping_view())
        })
        .await;
    match result {
        Ok(view) => HttpResponse::Ok().json(Outcome::new(view.summary.describe(), view)),
        Err(e) => error_response(&e),
    }
}

pub(crate) async fn remove(
    state: web::Data<AppState>,
    question_id: web::Path<String>,
) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.unset_mapping(&question_id);
            Ok(widget.mapping_view())
        })
        .await;
    match result {
        Ok(view) => HttpResponse::Ok().json(Outcome::new(view.summary.describe(), view)),
        Err(e) => error_response(&e),
    }
}

pub(crate) async fn clear(state: web::Data<AppState>) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.clear_mapping();
            Ok(widget.mapping_view())
        })
        .await;
    match result {
        Ok(view) => HttpResponse::Ok().json(Outcome::new("Mapping cleared.", view)),
        Err(e) => error_response(&e),
    }
}
