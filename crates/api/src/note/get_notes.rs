use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::get_notes::APIResponse;
use mynote_domain::{Note, ID};
use mynote_infra::MyNoteContext;

pub async fn get_notes_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetNotesUseCase { user_id };

    execute(usecase, &ctx)
        .await
        .map(|notes| HttpResponse::Ok().json(APIResponse::new(notes)))
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct GetNotesUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotesUseCase {
    type Response = Vec<Note>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotes";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notes
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
