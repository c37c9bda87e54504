use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let widget = state.widget.read().await;
    HttpResponse::Ok().json(widget.registry.list())
}
