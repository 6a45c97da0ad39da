//! Background rotator routes

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use std::time::Duration;

use crate::core::rotator::DEFAULT_ROTATION_INTERVAL;
use crate::core::BackgroundRotator;

#[derive(Debug, Default, Deserialize)]
pub struct StartBody {
    pub interval_ms: Option<u64>,
}

#[get("")]
pub async fn snapshot(rotator: web::Data<BackgroundRotator>) -> impl Responder {
    HttpResponse::Ok().json(rotator.snapshot())
}

/// Show the next slide now
#[post("/next")]
pub async fn next(rotator: web::Data<BackgroundRotator>) -> impl Responder {
    rotator.advance();
    HttpResponse::Ok().json(rotator.snapshot())
}

#[post("/start")]
pub async fn start(
    rotator: web::Data<BackgroundRotator>,
    body: Option<web::Json<StartBody>>,
) -> impl Responder {
    let interval = body
        .and_then(|b| b.interval_ms)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_ROTATION_INTERVAL);

    rotator.start(interval);
    HttpResponse::Ok().json(rotator.snapshot())
}

#[post("/stop")]
pub async fn stop(rotator: web::Data<BackgroundRotator>) -> impl Responder {
    rotator.stop();
    HttpResponse::Ok().json(rotator.snapshot())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(snapshot)
        .service(next)
        .service(start)
        .service(stop);
}
