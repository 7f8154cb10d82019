use crate::shared::entity::{Entity, ID};

/// The owner of `Note`s, reached by e-mail when a reminder fires
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    /// PHC string of the login password. Empty for users that can not log in.
    pub password_hash: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            password_hash: String::new(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
