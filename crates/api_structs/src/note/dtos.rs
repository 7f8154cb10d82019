use mynote_domain::{Note, TodoItem, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub content: String,
    pub todo_items: Vec<TodoItemDTO>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemDTO {
    pub content: String,
    #[serde(default)]
    pub is_done: bool,
}

impl NoteDTO {
    pub fn new(note: Note) -> Self {
        Self {
            id: note.id,
            user_id: note.user_id,
            title: note.title,
            content: note.content,
            todo_items: note.todo_items.into_iter().map(TodoItemDTO::new).collect(),
        }
    }
}

impl TodoItemDTO {
    pub fn new(item: TodoItem) -> Self {
        Self {
            content: item.content,
            is_done: item.is_done,
        }
    }
}
