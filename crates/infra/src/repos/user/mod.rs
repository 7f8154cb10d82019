mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
use mynote_domain::{User, ID};
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}

#[cfg(test)]
mod tests {
    use crate::MyNoteContext;
    use mynote_domain::User;

    #[tokio::test]
    async fn insert_and_find() {
        let ctx = MyNoteContext::create_inmemory();
        let user = User::new("someone@example.com");
        ctx.repos.users.insert(&user).await.unwrap();
        assert_eq!(ctx.repos.users.find(&user.id).await, Some(user));
        assert!(ctx.repos.users.find(&Default::default()).await.is_none());
    }

    #[tokio::test]
    async fn find_by_email() {
        let ctx = MyNoteContext::create_inmemory();
        let mut user = User::new("someone@example.com");
        user.password_hash = "hash".into();
        ctx.repos.users.insert(&user).await.unwrap();
        assert_eq!(
            ctx.repos.users.find_by_email("someone@example.com").await.unwrap(),
            Some(user)
        );
        assert_eq!(
            ctx.repos.users.find_by_email("nobody@example.com").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let ctx = MyNoteContext::create_inmemory();
        ctx.repos.users.insert(&User::new("same@example.com")).await.unwrap();
        assert!(ctx.repos.users.insert(&User::new("same@example.com")).await.is_err());
    }
}
