//! Favorites routes

use actix_web::{get, web, HttpResponse, Responder};

use crate::core::JokeManager;

/// Saved jokes, in save order
#[get("")]
pub async fn list(manager: web::Data<JokeManager>) -> impl Responder {
    HttpResponse::Ok().json(manager.favorites_view())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list);
}
