use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use log::info;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let result = state
        .mutate(|widget| {
            let matched = widget.auto_map();
            info!("auto-mapped {} questions", matched);
            Ok(widget.mapping_view())
        })
        .await;
    match result {
        Ok(view) => HttpResponse::Ok().json(Outcome::new("Auto-mapped where labels matched.", view)),
        Err(e) => error_response(&e),
    }
}
