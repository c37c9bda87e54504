use crate::host::local::LocalHost;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(host: web::Data<LocalHost>) -> impl Responder {
    HttpResponse::Ok().json(host.outbox())
}
