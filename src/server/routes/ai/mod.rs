//! OpenAI-compatible AI endpoints. Each capability gets its own route
//! configurator so `server.rs` can compose them without knowing their
//! internals.

mod audio;
mod chat;
mod images;
mod vision;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    chat::configure_routes(cfg);
    vision::configure_routes(cfg);
    images::configure_routes(cfg);
    audio::configure_routes(cfg);
}
