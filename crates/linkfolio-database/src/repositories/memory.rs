//! In-memory store implementations.
//!
//! Backs unit and integration tests that exercise the full request path
//! without a live PostgreSQL instance. Uniqueness checks run inside a
//! single write-lock critical section, which gives the same atomic
//! check-then-insert guarantee the unique indexes give the Postgres
//! repositories.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use linkfolio_core::AppError;
use linkfolio_core::result::AppResult;
use linkfolio_entity::link::{CreateLink, Link, UpdateLink};
use linkfolio_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{LinkStore, UserStore, email_taken, username_taken};

/// In-memory [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> AppError {
        AppError::internal("user store lock poisoned")
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| Self::lock_poisoned())?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| Self::lock_poisoned())?;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| Self::lock_poisoned())?;

        if users.values().any(|u| u.username == data.username) {
            return Err(username_taken(&data.username));
        }
        if users.values().any(|u| u.email == data.email) {
            return Err(email_taken(&data.email));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| Self::lock_poisoned())?;

        if let Some(username) = &data.username {
            if users
                .values()
                .any(|u| u.id != data.id && u.username == *username)
            {
                return Err(username_taken(username));
            }
        }
        if let Some(email) = &data.email {
            if users.values().any(|u| u.id != data.id && u.email == *email) {
                return Err(email_taken(email));
            }
        }

        let user = users
            .get_mut(&data.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))?;

        if let Some(name) = &data.name {
            user.name = name.clone();
        }
        if let Some(username) = &data.username {
            user.username = username.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &data.password_hash {
            user.password_hash = password_hash.clone();
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        let users = self.users.read().map_err(|_| Self::lock_poisoned())?;
        Ok(users.len() as u64)
    }
}

/// In-memory [`LinkStore`].
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: RwLock<HashMap<Uuid, Link>>,
}

impl MemoryLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> AppError {
        AppError::internal("link store lock poisoned")
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Link>> {
        let links = self.links.read().map_err(|_| Self::lock_poisoned())?;
        Ok(links.get(&id).cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Link>> {
        let links = self.links.read().map_err(|_| Self::lock_poisoned())?;
        let mut owned: Vec<Link> = links
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(owned)
    }

    async fn insert(&self, data: &CreateLink) -> AppResult<Link> {
        let mut links = self.links.write().map_err(|_| Self::lock_poisoned())?;

        let now = Utc::now();
        let link = Link {
            id: Uuid::new_v4(),
            url: data.url.clone(),
            desc: data.desc.clone(),
            position: data.position,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn update(&self, data: &UpdateLink) -> AppResult<Link> {
        let mut links = self.links.write().map_err(|_| Self::lock_poisoned())?;

        let link = links
            .get_mut(&data.id)
            .ok_or_else(|| AppError::not_found(format!("Link {} not found", data.id)))?;

        link.url = data.url.clone();
        link.desc = data.desc.clone();
        link.position = data.position;
        link.updated_at = Utc::now();

        Ok(link.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut links = self.links.write().map_err(|_| Self::lock_poisoned())?;
        Ok(links.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        let links = self.links.read().map_err(|_| Self::lock_poisoned())?;
        Ok(links.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkfolio_core::error::ErrorKind;

    fn sample_user(username: &str, email: &str) -> CreateUser {
        CreateUser {
            name: "John Smith".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_a_validation_error_naming_the_value() {
        let store = MemoryUserStore::new();
        store
            .insert(&sample_user("jsmith", "johnsmith@gmail.com"))
            .await
            .unwrap();

        let err = store
            .insert(&sample_user("jsmith", "other@gmail.com"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "username 'jsmith' is already taken");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_validation_error_naming_the_value() {
        let store = MemoryUserStore::new();
        store
            .insert(&sample_user("jsmith", "johnsmith@gmail.com"))
            .await
            .unwrap();

        let err = store
            .insert(&sample_user("johns", "johnsmith@gmail.com"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "email 'johnsmith@gmail.com' is already taken");
    }

    #[tokio::test]
    async fn update_does_not_trip_on_own_username() {
        let store = MemoryUserStore::new();
        let user = store
            .insert(&sample_user("jsmith", "johnsmith@gmail.com"))
            .await
            .unwrap();

        let updated = store
            .update(&UpdateUser {
                id: user.id,
                name: None,
                username: Some("jsmith".to_string()),
                email: None,
                password_hash: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.username, "jsmith");
    }

    #[tokio::test]
    async fn links_list_in_display_order_with_creation_tiebreak() {
        let store = MemoryLinkStore::new();
        let owner = Uuid::new_v4();

        // Spaced out so creation timestamps are strictly ordered.
        let first = store
            .insert(&CreateLink {
                url: "www.instagram.com".to_string(),
                desc: "Check out my Instagram".to_string(),
                position: 0,
                user_id: owner,
            })
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store
            .insert(&CreateLink {
                url: "www.linkedin.com".to_string(),
                desc: "Connect with me".to_string(),
                position: 0,
                user_id: owner,
            })
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let third = store
            .insert(&CreateLink {
                url: "www.twitter.com".to_string(),
                desc: "Check out my Twitter".to_string(),
                position: -1,
                user_id: owner,
            })
            .await
            .unwrap();

        let listed = store.find_by_owner(owner).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![third.id, first.id, second.id]);
    }
}
