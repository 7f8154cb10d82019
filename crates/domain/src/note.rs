use crate::shared::entity::{Entity, ID};

/// A freeform or checklist note owned by a single `User`
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub content: String,
    pub todo_items: Vec<TodoItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub content: String,
    pub is_done: bool,
}

impl Note {
    pub fn new(user_id: ID, title: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title: title.into(),
            content: String::new(),
            todo_items: Vec::new(),
        }
    }

    pub fn is_owned_by(&self, user_id: &ID) -> bool {
        self.user_id == *user_id
    }
}

impl Entity for Note {
    fn id(&self) -> &ID {
        &self.id
    }
}
