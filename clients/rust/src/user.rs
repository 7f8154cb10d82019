use crate::base::{APIResponse, BaseClient};
use mynote_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        email: String,
        password: String,
    ) -> APIResponse<create_user::APIResponse> {
        let body = create_user::RequestBody { email, password };
        self.base
            .post(body, "users".into(), StatusCode::CREATED)
            .await
    }

    /// The returned token authenticates an SDK made with `MyNoteSDK::with_user_token`
    pub async fn login(
        &self,
        email: String,
        password: String,
    ) -> APIResponse<login_user::APIResponse> {
        let body = login_user::RequestBody { email, password };
        self.base
            .post(body, "users/login".into(), StatusCode::OK)
            .await
    }
}
