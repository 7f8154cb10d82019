mod create_user;
mod login_user;

use actix_web::web;
use create_user::create_user_controller;
use login_user::login_user_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_user_controller));
    cfg.route("/users/login", web::post().to(login_user_controller));
}
