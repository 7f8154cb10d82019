mod error;
mod job_schedulers;
mod note;
mod reminder;
mod shared;
mod status;
mod user;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    middleware,
    web::{self, Data},
    App, HttpServer,
};
use job_schedulers::{start_reminder_scheduler, stop_reminder_scheduler};
use mynote_infra::MyNoteContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub use shared::auth::create_user_token;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    user::configure_routes(cfg);
    note::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    context: MyNoteContext,
}

impl Application {
    pub async fn new(context: MyNoteContext) -> Result<Self, std::io::Error> {
        start_reminder_scheduler(&context).await;
        let (server, port) = Application::configure_server(context.clone()).await?;

        Ok(Self {
            server,
            port,
            context,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: MyNoteContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Serves until the server is stopped and then stops every pending reminder
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        stop_reminder_scheduler(&self.context);
        res
    }
}
