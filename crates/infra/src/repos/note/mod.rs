mod inmemory;
mod postgres;

pub use inmemory::InMemoryNoteRepo;
use mynote_domain::{Note, ID};
pub use postgres::PostgresNoteRepo;

#[async_trait::async_trait]
pub trait INoteRepo: Send + Sync {
    async fn insert(&self, note: &Note) -> anyhow::Result<()>;
    async fn find(&self, note_id: &ID) -> Option<Note>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Note>>;
}
