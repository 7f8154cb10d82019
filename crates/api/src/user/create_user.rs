use crate::error::MyNoteError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mynote_api_structs::create_user::{APIResponse, RequestBody};
use mynote_domain::User;
use mynote_infra::MyNoteContext;
use mynote_utils::hash_password;

pub async fn create_user_controller(
    ctx: web::Data<MyNoteContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MyNoteError> {
    let body = body.0;
    let usecase = CreateUserUseCase {
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEmail(String),
    EmptyPassword,
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}", email))
            }
            UseCaseError::EmptyPassword => Self::BadClientData("Password can not be empty".into()),
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "A user with email: {}, already exists.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }
        if self.password.is_empty() {
            return Err(UseCaseError::EmptyPassword);
        }

        match ctx.repos.users.find_by_email(&email).await {
            Ok(Some(_)) => return Err(UseCaseError::EmailTaken(email)),
            Ok(None) => (),
            Err(_) => return Err(UseCaseError::StorageError),
        }

        let mut user = User::new(email);
        user.password_hash =
            hash_password(&self.password).map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::EmailTaken(user.email.clone()))?;

        Ok(user)
    }
}
