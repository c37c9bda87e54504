//! Question-to-value bindings.
//!
//! - `GET /api/mapping`: the mapping table with candidate columns and choices.
//! - `PUT /api/mapping/{question_id}`: binds a question to a sheet column, one
//!   of its choices or a manual value.
//! - `DELETE /api/mapping/{question_id}`: unbinds one question.
//! - `DELETE /api/mapping`: unbinds all of them.
//! - `POST /api/mapping/auto`: binds questions whose label matches a header.
//! - `POST /api/mapping/collapse`: remembers whether the table is folded.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

mod auto;
mod collapse;
mod get;
mod set;

const API_PATH: &str = "/api/mapping";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("", delete().to(set::clear))
        .route("/auto", post().to(auto::process))
        .route("/collapse", post().to(collapse::process))
        .route("/{question_id}", put().to(set::process))
        .route("/{question_id}", delete().to(set::remove))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sources::fetch::testing::StubFetcher;
    use crate::data_sources::Table;
    use crate::state_controller::state::testing::TestApp;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::datasource::SourceType;
    use common::model::question::Question;
    use common::requests::AddSourceRequest;
    use serde_json::{json, Value};

    fn question(id: &str, label: &str, kind: &str, options: &[&str]) -> Question {
        Question {
            id: id.into(),
            label: label.into(),
            kind: kind.into(),
            name: String::new(),
            order: 0,
            options: options.iter().map(|o| o.to_string()).collect(),
            allow_other: false,
        }
    }

    async fn prepared() -> (TestApp, String) {
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
        widget
            .registry
            .apply(
                &id,
                Table {
                    headers: vec!["Email".into(), "Name".into()],
                    rows: Vec::new(),
                },
            )
            .unwrap();
        widget.questions = vec![
            question("1", "email", "control_email", &[]),
            question("2", "Plan", "control_dropdown", &["Gold", "Silver"]),
        ];
        drop(widget);
        (app, id)
    }

    #[actix_web::test]
    async fn auto_map_then_edit() {
        let (app, id) = prepared().await;
        let service = test::init_service(
            App::new()
                .app_data(web::Data::new(app.state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/mapping/auto").to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["flash"]["message"], "Auto-mapped where labels matched.");
        assert_eq!(body["data"]["summary"]["mapped"], 1);
        assert_eq!(
            body["data"]["rows"][0]["mapping"],
            json!({"mode": "sheet", "sourceId": id, "column": "Email"})
        );

        let req = test::TestRequest::put()
            .uri("/api/mapping/2")
            .set_json(json!({"mapping": {"mode": "choice", "value": "Gold"}}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["flash"]["message"], "2 of 2 fields mapped.");

        let req = test::TestRequest::put()
            .uri("/api/mapping/1")
            .set_json(json!({"mapping": {"mode": "choice", "value": "Gold"}}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete().uri("/api/mapping/1").to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["data"]["summary"]["mapped"], 1);

        let req = test::TestRequest::post()
            .uri("/api/mapping/collapse")
            .set_json(json!({"collapsed": true}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["data"]["summary"]["collapsed"], true);

        let req = test::TestRequest::delete().uri("/api/mapping").to_request();
        test::call_service(&service, req).await;
        let req = test::TestRequest::get().uri("/api/mapping").to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["summary"]["mapped"], 0);
        assert_eq!(body["summary"]["total"], 2);
        assert_eq!(body["rows"][1]["choices"], json!(["Gold", "Silver"]));
    }
}
