use crate::users::{NewUser, User, UserId};
use tokio::sync::RwLock;
use ulid::Ulid;

/// The `users` collection held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct UserTable {
    users: RwLock<Vec<User>>,
}

impl UserTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id.as_str() == id)
            .cloned()
    }

    /// Stores `user` under a fresh lowercase ULID. Duplicates are accepted;
    /// uniqueness is the client's concern.
    pub async fn insert(&self, user: NewUser) -> User {
        let id = UserId::new(Ulid::new().to_string().to_lowercase());
        let created = user.into_user(id);
        self.users.write().await.push(created.clone());
        created
    }
}
