use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::get_note::{APIResponse, PathParams};
use mynote_domain::{Note, ID};
use mynote_infra::MyNoteContext;

pub async fn get_note_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetNoteUseCase {
        user_id,
        note_id: path.note_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|note| HttpResponse::Ok().json(APIResponse::new(note)))
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct GetNoteUseCase {
    pub user_id: ID,
    pub note_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(note_id) => Self::NotFound(format!(
                "The note with id: {}, was not found.",
                note_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNoteUseCase {
    type Response = Note;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNote";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.notes.find(&self.note_id).await {
            Some(note) if note.is_owned_by(&self.user_id) => Ok(note),
            _ => Err(UseCaseError::NotFound(self.note_id)),
        }
    }
}
