use crate::repos::IUserRepo;
use mynote_domain::ID;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Delivers a composed notification to the owner of a note.
///
/// Failures are returned to the caller, which only logs them. A failed
/// delivery is never retried.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn deliver(&self, user_id: &ID, subject: &str, body: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Serialize)]
struct WebhookNotificationDTO<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Posts notifications as json to a webhook which forwards them as email
pub struct WebhookNotifier {
    users: Arc<dyn IUserRepo>,
    client: reqwest::Client,
    url: String,
    key: String,
}

impl WebhookNotifier {
    pub fn new(users: Arc<dyn IUserRepo>, url: String, key: String) -> Self {
        Self {
            users,
            client: reqwest::Client::new(),
            url,
            key,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn deliver(&self, user_id: &ID, subject: &str, body: &str) -> anyhow::Result<()> {
        let user = self
            .users
            .find(user_id)
            .await
            .ok_or_else(|| anyhow::Error::msg(format!("User {} was not found", user_id)))?;

        self.client
            .post(&self.url)
            .header("mynote-webhook-key", &self.key)
            .json(&WebhookNotificationDTO {
                to: &user.email,
                subject,
                body,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Used when no webhook is configured
pub struct LogNotifier {}

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn deliver(&self, user_id: &ID, subject: &str, body: &str) -> anyhow::Result<()> {
        info!("Notification for user {}: {}\n{}", user_id, subject, body);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub user_id: ID,
    pub subject: String,
    pub body: String,
}

/// Records every delivery. Can be told to fail so that delivery errors
/// can be tested.
#[derive(Default)]
pub struct InMemoryNotifier {
    deliveries: Mutex<Vec<Delivery>>,
    failing: Mutex<bool>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn deliver(&self, user_id: &ID, subject: &str, body: &str) -> anyhow::Result<()> {
        let delivery = Delivery {
            user_id: *user_id,
            subject: subject.to_string(),
            body: body.to_string(),
        };
        self.deliveries.lock().unwrap().push(delivery);
        if *self.failing.lock().unwrap() {
            return Err(anyhow::Error::msg("Notifier is unavailable"));
        }
        Ok(())
    }
}
