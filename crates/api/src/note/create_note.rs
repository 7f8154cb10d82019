use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::create_note::{APIResponse, RequestBody};
use mynote_domain::{Note, TodoItem, ID};
use mynote_infra::MyNoteContext;

pub async fn create_note_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateNoteUseCase {
        user_id,
        title: body.title,
        content: body.content,
        todo_items: body.todo_items.map(|items| {
            items
                .into_iter()
                .map(|item| TodoItem {
                    content: item.content,
                    is_done: item.is_done,
                })
                .collect()
        }),
    };

    execute(usecase, &ctx)
        .await
        .map(|note| HttpResponse::Created().json(APIResponse::new(note)))
        .map_err(MyNoteError::from)
}

/// Creates either a freeform note with `content` or a checklist note
/// with `todo_items`, never both
#[derive(Debug)]
pub struct CreateNoteUseCase {
    pub user_id: ID,
    pub title: String,
    pub content: Option<String>,
    pub todo_items: Option<Vec<TodoItem>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    InvalidBody,
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("Title can not be empty".into()),
            UseCaseError::InvalidBody => Self::BadClientData(
                "A note has either content or todo items, but not both".into(),
            ),
            UseCaseError::UserNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateNoteUseCase {
    type Response = Note;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateNote";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        let mut note = Note::new(self.user_id, title);
        match (self.content.take(), self.todo_items.take()) {
            (Some(content), None) => note.content = content,
            (None, Some(todo_items)) => note.todo_items = todo_items,
            _ => return Err(UseCaseError::InvalidBody),
        }

        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id));
        }
        ctx.repos
            .notes
            .insert(&note)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(note)
    }
}
