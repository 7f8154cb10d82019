use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::get_note_reminders::{APIResponse, PathParams};
use mynote_domain::{Reminder, ID};
use mynote_infra::MyNoteContext;

pub async fn get_note_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetNoteRemindersUseCase {
        user_id,
        note_id: path.note_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct GetNoteRemindersUseCase {
    pub user_id: ID,
    pub note_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NoteNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NoteNotFound(note_id) => Self::NotFound(format!(
                "The note with id: {}, was not found.",
                note_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNoteRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNoteReminders";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.notes.find(&self.note_id).await {
            Some(note) if note.is_owned_by(&self.user_id) => ctx
                .repos
                .reminders
                .find_by_note(&note.id)
                .await
                .map_err(|_| UseCaseError::StorageError),
            _ => Err(UseCaseError::NoteNotFound(self.note_id)),
        }
    }
}
