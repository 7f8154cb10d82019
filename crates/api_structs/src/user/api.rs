use crate::dtos::UserDTO;
use mynote_domain::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod create_user {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub password: String,
    }

    pub type APIResponse = UserResponse;
}

pub mod login_user {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
        /// Bearer token for the user, also set as the `jwt` cookie
        pub token: String,
    }

    impl APIResponse {
        pub fn new(user: User, token: String) -> Self {
            Self {
                user: UserDTO::new(user),
                token,
            }
        }
    }
}
