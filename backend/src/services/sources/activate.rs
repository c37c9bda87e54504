use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;

pub(crate) async fn process(state: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.registry.set_active(&id)?;
            Ok(widget.registry.list())
        })
        .await;
    match result {
        Ok(list) => HttpResponse::Ok().json(Outcome::new("Source selected.", list)),
        Err(e) => error_response(&e),
    }
}
