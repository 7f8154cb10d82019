use super::validation::{parse_frequency, parse_reminder_time};
use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use mynote_domain::{Reminder, ID};
use mynote_infra::MyNoteContext;
use tracing::info;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;
    let body = body.into_inner();

    let usecase = UpdateReminderUseCase {
        user_id,
        reminder_id: path.reminder_id,
        reminder_time: body.reminder_time,
        recurring: body.recurring,
        frequency: body.frequency,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(MyNoteError::from)
}

/// Only the supplied fields are changed
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub reminder_time: Option<String>,
    pub recurring: Option<bool>,
    pub frequency: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidInput(String),
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        match ctx.repos.notes.find(&reminder.note_id).await {
            Some(note) if note.is_owned_by(&self.user_id) => (),
            _ => return Err(UseCaseError::NotFound(self.reminder_id)),
        };

        if let Some(reminder_time) = &self.reminder_time {
            reminder.reminder_time =
                parse_reminder_time(reminder_time, ctx).map_err(UseCaseError::InvalidInput)?;
        }
        if let Some(recurring) = self.recurring {
            reminder.recurring = recurring;
        }
        if self.frequency.is_some() {
            reminder.frequency =
                parse_frequency(self.frequency.as_deref()).map_err(UseCaseError::InvalidInput)?;
        }

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // A new reminder time has been validated and is armed as given, like
        // on add. A kept reminder time that has already passed continues at
        // the next occurrence instead of firing immediately.
        let armed_at = if self.reminder_time.is_some() {
            ctx.scheduler.arm(&reminder, reminder.reminder_time);
            Some(reminder.reminder_time)
        } else {
            ctx.scheduler.arm_next_occurrence(&reminder)
        };
        if armed_at.is_none() {
            info!(
                "Reminder {} has no occurrence after now and is left unarmed",
                reminder.id
            );
            ctx.scheduler.cancel(&reminder.id);
        }

        // The reminder could have been deleted between saving and arming
        if let Ok(None) = ctx.repos.reminders.find(&reminder.id).await {
            info!("Reminder {} was deleted while updating", reminder.id);
            ctx.scheduler.cancel(&reminder.id);
        }

        Ok(reminder)
    }
}
