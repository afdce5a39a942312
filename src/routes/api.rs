use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::models::config::ServerConfig;
use crate::pagination::RawListQuery;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{notices, students};

#[get("/v1/students")]
pub async fn api_v1_students(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let raw = RawListQuery::from_query_str(req.query_string());

    match students::list_students(repo.get_ref(), &raw, server_config.strict_list_queries) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[get("/v1/notices")]
pub async fn api_v1_notices(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let raw = RawListQuery::from_query_str(req.query_string());

    match notices::list_notices(repo.get_ref(), &raw, server_config.strict_list_queries) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}
