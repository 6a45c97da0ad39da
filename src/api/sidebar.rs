//! Sidebar routes: the searchable list of seen jokes

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::core::JokeManager;
use crate::models::JokeId;
use crate::serializers::save_label;

#[derive(Debug, Deserialize)]
pub struct SidebarQuery {
    #[serde(default)]
    pub q: String,
}

/// Seen jokes filtered by the search box
#[get("")]
pub async fn list(manager: web::Data<JokeManager>, query: web::Query<SidebarQuery>) -> impl Responder {
    HttpResponse::Ok().json(manager.sidebar(&query.q))
}

/// Put a listed joke on the card
#[post("/{id}/use")]
pub async fn use_joke(manager: web::Data<JokeManager>, path: web::Path<String>) -> impl Responder {
    let id = JokeId::parse(&path);
    match manager.show(&id) {
        Some(_) => HttpResponse::Ok().json(manager.display_view()),
        None => HttpResponse::NotFound().json(json!({ "msg": "Joke not found" })),
    }
}

/// Save or unsave a listed joke
#[post("/{id}/favorite")]
pub async fn toggle_favorite(
    manager: web::Data<JokeManager>,
    path: web::Path<String>,
) -> impl Responder {
    let id = JokeId::parse(&path);
    match manager.toggle_favorite(&id) {
        Some(saved) => HttpResponse::Ok().json(json!({
            "id": id,
            "saved": saved,
            "label": save_label(saved),
            "saved_count": manager.favorites_view().count,
        })),
        None => HttpResponse::NotFound().json(json!({ "msg": "Joke not found" })),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list).service(use_joke).service(toggle_favorite);
}
