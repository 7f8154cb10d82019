use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use mynote_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        if !insert_unique(user, &self.users, |u| u.email == user.email) {
            return Err(anyhow::Error::msg(format!(
                "A user with email {} already exists",
                user.email
            )));
        }
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(find_by(&self.users, |u| u.email == email).into_iter().next())
    }
}
