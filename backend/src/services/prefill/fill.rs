use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use log::info;

/// Refuses without a selected row or when nothing resolves; the host form
/// is left untouched in both cases.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let pairs = {
        let widget = state.widget.read().await;
        widget.fill_payload()
    };
    match pairs {
        Ok(pairs) => {
            info!("prefilling {} fields", pairs.len());
            state.host.push_fields(&pairs);
            HttpResponse::Ok().json(Outcome::new("Prefilled.", pairs))
        }
        Err(e) => error_response(&e),
    }
}
