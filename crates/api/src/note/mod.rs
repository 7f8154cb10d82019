mod create_note;
mod get_note;
mod get_notes;

use actix_web::web;
use create_note::create_note_controller;
use get_note::get_note_controller;
use get_notes::get_notes_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notes", web::post().to(create_note_controller));
    cfg.route("/notes", web::get().to(get_notes_controller));
    cfg.route("/notes/{note_id}", web::get().to(get_note_controller));
}
