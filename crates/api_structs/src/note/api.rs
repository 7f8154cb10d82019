use crate::dtos::{NoteDTO, TodoItemDTO};
use mynote_domain::{Note, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub note: NoteDTO,
}

impl NoteResponse {
    pub fn new(note: Note) -> Self {
        Self {
            note: NoteDTO::new(note),
        }
    }
}

pub mod create_note {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub content: Option<String>,
        #[serde(default)]
        pub todo_items: Option<Vec<TodoItemDTO>>,
    }

    pub type APIResponse = NoteResponse;
}

pub mod get_note {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub note_id: ID,
    }

    pub type APIResponse = NoteResponse;
}

pub mod get_notes {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notes: Vec<NoteDTO>,
    }

    impl APIResponse {
        pub fn new(notes: Vec<Note>) -> Self {
            Self {
                notes: notes.into_iter().map(NoteDTO::new).collect(),
            }
        }
    }
}
