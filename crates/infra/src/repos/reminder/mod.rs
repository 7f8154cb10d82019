mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use mynote_domain::{Reminder, ID};
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Fails if the `Note` of the `Reminder` already has a `Reminder`
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn find_by_note(&self, note_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>>;
    /// Returns the deleted `Reminder`, or `None` if it did not exist
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
}
