use crate::error::MyNoteError;
use crate::shared::{
    auth::{create_user_token, TOKEN_COOKIE},
    usecase::{execute, UseCase},
};
use actix_web::{cookie::Cookie, web, HttpResponse};
use mynote_api_structs::login_user::{APIResponse, RequestBody};
use mynote_domain::User;
use mynote_infra::MyNoteContext;
use mynote_utils::verify_password;

const TOKEN_TTL_SECS: i64 = 72 * 60 * 60;

pub async fn login_user_controller(
    ctx: web::Data<MyNoteContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MyNoteError> {
    let body = body.0;
    let usecase = LoginUserUseCase {
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|(user, token)| {
            let cookie = Cookie::build(TOKEN_COOKIE, token.clone())
                .path("/")
                .http_only(true)
                .finish();
            HttpResponse::Ok()
                .cookie(cookie)
                .json(APIResponse::new(user, token))
        })
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct LoginUserUseCase {
    pub email: String,
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidCredentials,
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUserUseCase {
    type Response = (User, String);

    type Error = UseCaseError;

    const NAME: &'static str = "LoginUser";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_lowercase();
        let user = match ctx.repos.users.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(UseCaseError::InvalidCredentials),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        if !verify_password(&self.password, &user.password_hash) {
            return Err(UseCaseError::InvalidCredentials);
        }

        let token = create_user_token(&user.id, &ctx.config.jwt_secret, TOKEN_TTL_SECS)
            .map_err(|_| UseCaseError::StorageError)?;
        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::auth::decode_token;
    use crate::user::create_user::CreateUserUseCase;

    async fn setup() -> (MyNoteContext, User) {
        let ctx = MyNoteContext::create_inmemory();
        let mut usecase = CreateUserUseCase {
            email: "writer@example.com".into(),
            password: "hunter2".into(),
        };
        let user = usecase.execute(&ctx).await.unwrap();
        (ctx, user)
    }

    fn usecase(email: &str, password: &str) -> LoginUserUseCase {
        LoginUserUseCase {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn issues_token_for_valid_credentials() {
        let (ctx, user) = setup().await;
        let (logged_in, token) = usecase("writer@example.com", "hunter2")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(logged_in, user);
        let claims = decode_token(&token, &ctx.config.jwt_secret).unwrap();
        assert_eq!(claims.user_id, user.id);
    }

    #[tokio::test]
    async fn rejects_wrong_password_and_unknown_email() {
        let (ctx, _) = setup().await;
        assert_eq!(
            usecase("writer@example.com", "hunter3")
                .execute(&ctx)
                .await
                .unwrap_err(),
            UseCaseError::InvalidCredentials
        );
        assert_eq!(
            usecase("reader@example.com", "hunter2")
                .execute(&ctx)
                .await
                .unwrap_err(),
            UseCaseError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn user_without_password_can_not_log_in() {
        let ctx = MyNoteContext::create_inmemory();
        let user = User::new("legacy@example.com");
        ctx.repos.users.insert(&user).await.unwrap();

        assert_eq!(
            usecase("legacy@example.com", "").execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidCredentials
        );
    }
}
