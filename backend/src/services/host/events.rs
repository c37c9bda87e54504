use crate::host::local::LocalHost;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::{Flash, Outcome};
use common::model::settings::SettingsView;
use common::requests::ReadyPayload;

pub(crate) async fn ready(
    host: web::Data<LocalHost>,
    state: web::Data<AppState>,
    payload: web::Json<ReadyPayload>,
) -> impl Responder {
    host.dispatch_ready(payload.into_inner()).await;
    let widget = state.widget.read().await;
    let message = match &widget.settings.form_id {
        Some(id) => format!("Form ID: {}", id),
        None => "Form ID not available. Paste it and save.".to_string(),
    };
    HttpResponse::Ok().json(Outcome::new(message, SettingsView::from(&widget.settings)))
}

pub(crate) async fn submit(host: web::Data<LocalHost>) -> impl Responder {
    match host.dispatch_submit().await {
        Some(verdict) => HttpResponse::Ok().json(verdict),
        None => HttpResponse::ServiceUnavailable().json(Flash::error("Widget is not ready.")),
    }
}
