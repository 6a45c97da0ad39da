//! Joke card routes: the displayed joke and its controls

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::core::keys::Focus;
use crate::core::JokeManager;
use crate::serializers::save_label;

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyBody {
    pub code: String,
    #[serde(default)]
    pub focus: Focus,
}

/// The joke card as currently shown
#[get("")]
pub async fn current(manager: web::Data<JokeManager>) -> impl Responder {
    HttpResponse::Ok().json(manager.display_view())
}

/// Fetch a new joke in the selected category
#[post("/next")]
pub async fn next(manager: web::Data<JokeManager>) -> impl Responder {
    let manager = manager.into_inner();
    let outcome = manager.request_joke(None).await;
    HttpResponse::Ok().json(json!({
        "outcome": outcome,
        "display": manager.display_view(),
    }))
}

/// Change the category, then fetch from it
#[post("/category")]
pub async fn select_category(
    manager: web::Data<JokeManager>,
    body: web::Json<CategoryBody>,
) -> impl Responder {
    let manager = manager.into_inner();
    manager.select_category(&body.category);
    let outcome = manager.request_joke(None).await;
    HttpResponse::Ok().json(json!({
        "category": manager.selected_category(),
        "outcome": outcome,
        "display": manager.display_view(),
    }))
}

#[post("/copy")]
pub async fn copy(manager: web::Data<JokeManager>) -> impl Responder {
    let manager = manager.into_inner();
    match manager.copy_current().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "copy_label": manager.display_view().copy_label })),
        Err(e) => {
            tracing::warn!("Copy failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "msg": "Failed to copy joke" }))
        }
    }
}

#[post("/speak")]
pub async fn speak(manager: web::Data<JokeManager>) -> impl Responder {
    match manager.speak_current().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "msg": "Spoken" })),
        Err(e) => {
            tracing::warn!("Speech failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "msg": "Failed to speak joke" }))
        }
    }
}

/// Save or unsave the displayed joke
#[post("/favorite")]
pub async fn toggle_favorite(manager: web::Data<JokeManager>) -> impl Responder {
    match manager.toggle_current_favorite() {
        Some(saved) => HttpResponse::Ok().json(json!({
            "saved": saved,
            "label": save_label(saved),
            "saved_count": manager.favorites_view().count,
        })),
        None => HttpResponse::NotFound().json(json!({ "msg": "No joke on display" })),
    }
}

/// Keyboard shortcut
#[post("/keys")]
pub async fn key_press(manager: web::Data<JokeManager>, body: web::Json<KeyBody>) -> impl Responder {
    let manager = manager.into_inner();
    match manager.handle_key(&body.code, body.focus).await {
        Some(outcome) => HttpResponse::Ok().json(json!({
            "handled": true,
            "outcome": outcome,
            "display": manager.display_view(),
        })),
        None => HttpResponse::Ok().json(json!({ "handled": false })),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(current)
        .service(next)
        .service(select_category)
        .service(copy)
        .service(speak)
        .service(toggle_favorite)
        .service(key_press);
}
