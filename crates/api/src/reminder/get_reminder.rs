use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::get_reminder::{APIResponse, PathParams};
use mynote_domain::{date::format_civil_datetime, NaiveDateTime, Reminder, ID};
use mynote_infra::MyNoteContext;

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetReminderUseCase {
        user_id,
        reminder_id: path.reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            let next_fire_time = res.next_fire.as_ref().map(format_civil_datetime);
            HttpResponse::Ok().json(APIResponse::new(res.reminder, next_fire_time))
        })
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub reminder: Reminder,
    /// Next fire time of the reminder if it is armed
    pub next_fire: Option<NaiveDateTime>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        match ctx.repos.notes.find(&reminder.note_id).await {
            Some(note) if note.is_owned_by(&self.user_id) => Ok(UseCaseResponse {
                next_fire: ctx.scheduler.next_fire(&reminder.id),
                reminder,
            }),
            _ => Err(UseCaseError::NotFound(self.reminder_id)),
        }
    }
}
