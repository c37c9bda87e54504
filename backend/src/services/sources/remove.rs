use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use log::info;

pub(crate) async fn process(state: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    let result = state
        .mutate(|widget| {
            if widget.remove_source(&id).is_some() {
                info!("source {} removed", id);
            }
            Ok(widget.registry.list())
        })
        .await;
    match result {
        Ok(list) => HttpResponse::Ok().json(Outcome::new("Source removed.", list)),
        Err(e) => error_response(&e),
    }
}
