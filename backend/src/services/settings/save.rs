use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use common::model::settings::SettingsView;
use common::requests::SettingsUpdate;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SettingsUpdate>,
) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.apply_settings(payload.into_inner());
            Ok(SettingsView::from(&widget.settings))
        })
        .await;
    match result {
        Ok(view) => HttpResponse::Ok().json(Outcome::new("Saved.", view)),
        Err(e) => error_response(&e),
    }
}
