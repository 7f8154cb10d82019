use super::INoteRepo;
use crate::repos::shared::inmemory_repo::*;
use mynote_domain::{Note, ID};

pub struct InMemoryNoteRepo {
    notes: std::sync::Mutex<Vec<Note>>,
}

impl InMemoryNoteRepo {
    pub fn new() -> Self {
        Self {
            notes: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INoteRepo for InMemoryNoteRepo {
    async fn insert(&self, note: &Note) -> anyhow::Result<()> {
        insert(note, &self.notes);
        Ok(())
    }

    async fn find(&self, note_id: &ID) -> Option<Note> {
        find(note_id, &self.notes)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Note>> {
        Ok(find_by(&self.notes, |n| n.user_id == *user_id))
    }
}
