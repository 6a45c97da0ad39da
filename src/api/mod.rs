//! REST API routes for jokebox

pub mod background;
pub mod favorites;
pub mod joke;
pub mod sidebar;

use actix_web::web;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Joke card routes
        .service(web::scope("/joke").configure(joke::configure))
        // Sidebar routes
        .service(web::scope("/jokes").configure(sidebar::configure))
        // Favorites routes
        .service(web::scope("/favorites").configure(favorites::configure))
        // Background routes
        .service(web::scope("/background").configure(background::configure));
}
