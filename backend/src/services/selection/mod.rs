//! Row selection, one row per source.
//!
//! - `POST /api/selection` with `{sourceId, rowIndex}` copies that row into
//!   the selection, replacing the source's previous pick.
//! - `DELETE /api/selection/{sourceId}` drops one source's pick.
//! - `DELETE /api/selection` drops them all.
//!
//! Every route answers with the refreshed preview.

use actix_web::web::{delete, post, scope};
use actix_web::Scope;

mod select;
mod unselect;

const API_PATH: &str = "/api/selection";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(select::process))
        .route("", delete().to(unselect::clear))
        .route("/{source_id}", delete().to(unselect::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sources::Table;
    use crate::data_sources::fetch::testing::StubFetcher;
    use crate::state_controller::state::testing::TestApp;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::datasource::SourceType;
    use common::model::row::Row;
    use common::requests::AddSourceRequest;
    use serde_json::{json, Value};

    async fn app_with_source() -> (TestApp, String) {
        let app = TestApp::new(StubFetcher::new());
        let mut widget = app.state.widget.write().await;
        let id = widget
            .registry
            .upsert(AddSourceRequest {
                source_type: SourceType::Csv,
                name: "People".into(),
                url: "https://data.example.com/people.csv".into(),
                key_column: None,
                api: None,
            })
            .unwrap()
            .source_id;
        let rows = ["Alice", "Bob"]
            .iter()
            .map(|name| {
                let mut row = Row::new();
                row.insert("Name", *name);
                row
            })
            .collect();
        widget
            .registry
            .apply(
                &id,
                Table {
                    headers: vec!["Name".into()],
                    rows,
                },
            )
            .unwrap();
        drop(widget);
        (app, id)
    }

    #[actix_web::test]
    async fn select_replace_and_clear() {
        let (app, id) = app_with_source().await;
        let service = test::init_service(
            App::new()
                .app_data(web::Data::new(app.state.clone()))
                .service(configure_routes()),
        )
        .await;

        for index in [0, 1] {
            let req = test::TestRequest::post()
                .uri("/api/selection")
                .set_json(json!({"sourceId": id, "rowIndex": index}))
                .to_request();
            let body: Value = test::call_and_read_body_json(&service, req).await;
            assert_eq!(body["flash"]["message"], "Row selected from \"People\".");
        }
        {
            let widget = app.state.widget.read().await;
            assert_eq!(widget.selections.len(), 1);
            assert_eq!(widget.selections[&id].row.text("Name"), "Bob");
        }

        let req = test::TestRequest::post()
            .uri("/api/selection")
            .set_json(json!({"sourceId": id, "rowIndex": 9}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/selection/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["data"]["rows"], json!({}));

        let req = test::TestRequest::delete().uri("/api/selection").to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["flash"]["message"], "Selection cleared.");
    }
}
