use crate::base::{APIResponse, BaseClient};
use mynote_api_structs::dtos::TodoItemDTO;
use mynote_api_structs::*;
use mynote_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NoteClient {
    base: Arc<BaseClient>,
}

/// Either `content` or `todo_items` must be given
pub struct CreateNoteInput {
    pub title: String,
    pub content: Option<String>,
    pub todo_items: Option<Vec<TodoItemDTO>>,
}

impl NoteClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateNoteInput) -> APIResponse<create_note::APIResponse> {
        let body = create_note::RequestBody {
            title: input.title,
            content: input.content,
            todo_items: input.todo_items,
        };
        self.base
            .post(body, "notes".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, note_id: ID) -> APIResponse<get_note::APIResponse> {
        self.base
            .get(format!("notes/{}", note_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_notes::APIResponse> {
        self.base.get("notes".into(), StatusCode::OK).await
    }
}
