mod config;
mod repos;
mod scheduler;
mod services;
mod system;

pub use config::Config;
pub use repos::{INoteRepo, IReminderRepo, IUserRepo, Repos};
pub use scheduler::ReminderScheduler;
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, MockSys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct MyNoteContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
    pub scheduler: ReminderScheduler,
}

impl MyNoteContext {
    fn create(repos: Repos, config: Config, sys: Arc<dyn ISys>, notifier: Arc<dyn INotifier>) -> Self {
        let scheduler = ReminderScheduler::new(
            repos.reminders.clone(),
            repos.notes.clone(),
            notifier.clone(),
            sys.clone(),
            config.reminder_timezone,
        );
        Self {
            repos,
            config,
            sys,
            notifier,
            scheduler,
        }
    }

    /// Context with in-memory repositories where notifications only go to the log
    pub fn create_inmemory() -> Self {
        Self::create_inmemory_with(Arc::new(RealSys {}), Arc::new(LogNotifier {}))
    }

    /// Context with in-memory repositories and the given clock and notifier
    pub fn create_inmemory_with(sys: Arc<dyn ISys>, notifier: Arc<dyn INotifier>) -> Self {
        Self::create(Repos::create_inmemory(), Config::new(), sys, notifier)
    }
}

fn create_notifier(config: &Config, repos: &Repos) -> Arc<dyn INotifier> {
    match &config.notifier_webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(
            repos.users.clone(),
            url.clone(),
            config.notifier_webhook_key.clone(),
        )),
        None => Arc::new(LogNotifier {}),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<MyNoteContext> {
    let config = Config::new();
    let repos = match std::env::var("DATABASE_URL") {
        Ok(connection_string) => Repos::create_postgres(&connection_string).await?,
        Err(_) => {
            info!("Did not find DATABASE_URL environment variable. Going to use inmemory repositories.");
            Repos::create_inmemory()
        }
    };
    let notifier = create_notifier(&config, &repos);
    Ok(MyNoteContext::create(
        repos,
        config,
        Arc::new(RealSys {}),
        notifier,
    ))
}
