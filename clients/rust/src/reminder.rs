use crate::base::{APIResponse, BaseClient};
use mynote_api_structs::*;
use mynote_domain::{Frequency, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct AddReminderInput {
    pub note_id: ID,
    /// `YYYY-MM-DD HH:MM:SS` in the reminder timezone of the server
    pub reminder_time: String,
    pub recurring: bool,
    pub frequency: Option<Frequency>,
}

pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub reminder_time: Option<String>,
    pub recurring: Option<bool>,
    pub frequency: Option<Frequency>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn add(&self, input: AddReminderInput) -> APIResponse<add_reminder::APIResponse> {
        let body = add_reminder::RequestBody {
            reminder_time: input.reminder_time,
            recurring: Some(input.recurring),
            frequency: input.frequency.map(|f| f.to_string()),
        };
        self.base
            .post(
                body,
                format!("notes/{}/reminder", input.note_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn get_by_note(&self, note_id: ID) -> APIResponse<get_note_reminders::APIResponse> {
        self.base
            .get(format!("notes/{}/reminders", note_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            reminder_time: input.reminder_time,
            recurring: input.recurring,
            frequency: input.frequency.map(|f| f.to_string()),
        };
        self.base
            .put(
                body,
                format!("reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
