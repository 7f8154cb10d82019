use super::validation::{parse_frequency, parse_reminder_time};
use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::add_reminder::{APIResponse, PathParams, RequestBody};
use mynote_domain::{Reminder, ID};
use mynote_infra::MyNoteContext;

pub async fn add_reminder_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;
    let body = body.into_inner();

    let usecase = AddReminderUseCase {
        user_id,
        note_id: path.note_id,
        reminder_time: body.reminder_time,
        recurring: body.recurring.unwrap_or(false),
        frequency: body.frequency,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct AddReminderUseCase {
    pub user_id: ID,
    pub note_id: ID,
    pub reminder_time: String,
    pub recurring: bool,
    pub frequency: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NoteNotFound(ID),
    ReminderAlreadyExists(ID),
    InvalidInput(String),
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NoteNotFound(note_id) => Self::NotFound(format!(
                "The note with id: {}, was not found.",
                note_id
            )),
            UseCaseError::ReminderAlreadyExists(note_id) => Self::Conflict(format!(
                "The note with id: {}, already has a reminder.",
                note_id
            )),
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "AddReminder";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let note = match ctx.repos.notes.find(&self.note_id).await {
            Some(note) if note.is_owned_by(&self.user_id) => note,
            _ => return Err(UseCaseError::NoteNotFound(self.note_id)),
        };

        let existing = ctx
            .repos
            .reminders
            .find_by_note(&note.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !existing.is_empty() {
            return Err(UseCaseError::ReminderAlreadyExists(note.id));
        }

        let reminder_time =
            parse_reminder_time(&self.reminder_time, ctx).map_err(UseCaseError::InvalidInput)?;
        let frequency =
            parse_frequency(self.frequency.as_deref()).map_err(UseCaseError::InvalidInput)?;

        let mut reminder = Reminder::new(note.id, reminder_time);
        reminder.recurring = self.recurring;
        reminder.frequency = frequency;

        if ctx.repos.reminders.insert(&reminder).await.is_err() {
            // Another reminder for the note could have been added concurrently
            return match ctx.repos.reminders.find_by_note(&note.id).await {
                Ok(reminders) if !reminders.is_empty() => {
                    Err(UseCaseError::ReminderAlreadyExists(note.id))
                }
                _ => Err(UseCaseError::StorageError),
            };
        }

        ctx.scheduler.arm(&reminder, reminder.reminder_time);

        Ok(reminder)
    }
}
