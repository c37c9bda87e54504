use crate::error::error_response;
use crate::state_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::flash::Outcome;
use common::requests::SelectRowRequest;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SelectRowRequest>,
) -> impl Responder {
    let result = state
        .mutate(|widget| {
            widget.select_row(&payload.source_id, payload.row_index)?;
            let name = widget
                .registry
                .get(&payload.source_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            Ok((name, widget.preview()))
        })
        .await;
    match result {
        Ok((name, preview)) => HttpResponse::Ok().json(Outcome::new(
            format!("Row selected from \"{}\".", name),
            preview,
        )),
        Err(e) => error_response(&e),
    }
}
