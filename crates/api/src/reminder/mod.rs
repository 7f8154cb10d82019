mod add_reminder;
mod delete_reminder;
mod get_note_reminders;
mod get_reminder;
pub mod rearm_reminders;
mod update_reminder;
mod validation;

#[cfg(test)]
pub mod test_utils;

use actix_web::web;
use add_reminder::add_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_note_reminders::get_note_reminders_controller;
use get_reminder::get_reminder_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notes/{note_id}/reminder",
        web::post().to(add_reminder_controller),
    );
    cfg.route(
        "/notes/{note_id}/reminders",
        web::get().to(get_note_reminders_controller),
    );

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
}
