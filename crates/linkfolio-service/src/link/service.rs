//! Link CRUD with per-operation ownership enforcement.
//!
//! Every mutation runs the same gauntlet: ordered field validation,
//! then the ownership check, then the store write. No partial writes —
//! a failed gate aborts before anything is persisted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use linkfolio_core::error::AppError;
use linkfolio_core::result::AppResult;
use linkfolio_database::store::{LinkStore, UserStore};
use linkfolio_entity::link::{CreateLink, Link, UpdateLink};

use crate::context::Principal;
use crate::validate::{require, require_text};

/// Link creation request; `user` names the intended owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    /// Target URL.
    pub url: Option<String>,
    /// Short description.
    pub desc: Option<String>,
    /// Display order (zero is a present value).
    pub position: Option<i32>,
    /// The owner the caller claims to act for.
    pub user: Option<Uuid>,
}

/// Full replacement of a link's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLinkRequest {
    /// New target URL.
    pub url: Option<String>,
    /// New description.
    pub desc: Option<String>,
    /// New display order.
    pub position: Option<i32>,
}

/// Manages link curation for authenticated owners.
pub struct LinkService {
    /// Link persistence.
    links: Arc<dyn LinkStore>,
    /// User lookup for the public listing.
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for LinkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkService").finish_non_exhaustive()
    }
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkStore>, users: Arc<dyn UserStore>) -> Self {
        Self { links, users }
    }

    /// Creates a link on behalf of its declared owner.
    ///
    /// Field order is `url`, `desc`, `position`, `user`; the declared
    /// owner must be the authenticated principal.
    pub async fn create(&self, principal: &Principal, req: CreateLinkRequest) -> AppResult<Link> {
        let url = require_text(req.url, "url required")?;
        let desc = require_text(req.desc, "description required")?;
        let position = require(req.position, "position required")?;
        let owner = require(req.user, "User required")?;

        if !principal.owns(owner) {
            return Err(AppError::authorization(
                "Links can only be added by its authorized user",
            ));
        }

        let link = self
            .links
            .insert(&CreateLink {
                url,
                desc,
                position,
                user_id: owner,
            })
            .await?;

        info!(link_id = %link.id, user_id = %owner, "Link created");

        Ok(link)
    }

    /// Replaces a link's `url`, `desc`, and `position`.
    ///
    /// The owner reference never changes; only the owner may update.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        req: UpdateLinkRequest,
    ) -> AppResult<Link> {
        let url = require_text(req.url, "url required")?;
        let desc = require_text(req.desc, "description required")?;
        let position = require(req.position, "position required")?;

        let link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Link {id} not found")))?;

        if !principal.owns(link.user_id) {
            return Err(AppError::authorization(
                "this link can only be updated by its authorized user",
            ));
        }

        let updated = self
            .links
            .update(&UpdateLink {
                id,
                url,
                desc,
                position,
            })
            .await?;

        info!(link_id = %id, user_id = %principal.user_id, "Link updated");

        Ok(updated)
    }

    /// Deletes a link. Only the owner may delete.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> AppResult<()> {
        let link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Link {id} not found")))?;

        if !principal.owns(link.user_id) {
            return Err(AppError::authorization(
                "this link can only be deleted by its authorized user",
            ));
        }

        self.links.delete(id).await?;

        info!(link_id = %id, user_id = %principal.user_id, "Link deleted");

        Ok(())
    }

    /// Lists a user's links in display order for the public profile.
    pub async fn list_for_username(&self, username: &str) -> AppResult<Vec<Link>> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;

        self.links.find_by_owner(user.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkfolio_core::error::ErrorKind;
    use linkfolio_database::repositories::memory::{MemoryLinkStore, MemoryUserStore};
    use linkfolio_entity::user::CreateUser;

    struct Fixture {
        service: LinkService,
        links: Arc<MemoryLinkStore>,
        owner: Principal,
        stranger: Principal,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserStore::new());
        let links = Arc::new(MemoryLinkStore::new());

        let owner = users
            .insert(&CreateUser {
                name: "John Smith".to_string(),
                username: "jsmith".to_string(),
                email: "johnsmith@gmail.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let stranger = users
            .insert(&CreateUser {
                name: "Billy Bob".to_string(),
                username: "bbob".to_string(),
                email: "billybob@gmail.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        Fixture {
            service: LinkService::new(links.clone(), users),
            links,
            owner: Principal::new(owner.id, owner.username),
            stranger: Principal::new(stranger.id, stranger.username),
        }
    }

    fn full_create(owner: &Principal) -> CreateLinkRequest {
        CreateLinkRequest {
            url: Some("www.linkedin.com".to_string()),
            desc: Some("Connect with me".to_string()),
            position: Some(0),
            user: Some(owner.user_id),
        }
    }

    #[tokio::test]
    async fn owner_creates_a_link() {
        let fx = fixture().await;

        let link = fx
            .service
            .create(&fx.owner, full_create(&fx.owner))
            .await
            .unwrap();

        assert_eq!(link.url, "www.linkedin.com");
        assert_eq!(link.position, 0);
        assert_eq!(link.user_id, fx.owner.user_id);
        assert_eq!(fx.links.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_validates_fields_in_order() {
        let fx = fixture().await;

        let cases = [
            (
                CreateLinkRequest {
                    url: None,
                    ..full_create(&fx.owner)
                },
                "url required",
            ),
            (
                CreateLinkRequest {
                    desc: None,
                    ..full_create(&fx.owner)
                },
                "description required",
            ),
            (
                CreateLinkRequest {
                    position: None,
                    ..full_create(&fx.owner)
                },
                "position required",
            ),
            (
                CreateLinkRequest {
                    user: None,
                    ..full_create(&fx.owner)
                },
                "User required",
            ),
            // The missing url wins even when later fields are absent too.
            (
                CreateLinkRequest {
                    url: None,
                    desc: None,
                    position: None,
                    user: None,
                },
                "url required",
            ),
        ];

        for (req, expected) in cases {
            let err = fx.service.create(&fx.owner, req).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message, expected);
        }

        assert_eq!(fx.links.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_for_someone_else_is_rejected() {
        let fx = fixture().await;

        // bbob tries to add a link to jsmith's profile.
        let err = fx
            .service
            .create(&fx.stranger, full_create(&fx.owner))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(err.message, "Links can only be added by its authorized user");
        assert_eq!(fx.links.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn zero_position_is_present() {
        let fx = fixture().await;

        let link = fx
            .service
            .create(
                &fx.owner,
                CreateLinkRequest {
                    position: Some(0),
                    ..full_create(&fx.owner)
                },
            )
            .await
            .unwrap();

        assert_eq!(link.position, 0);
    }

    #[tokio::test]
    async fn update_by_non_owner_is_rejected_with_the_update_message() {
        let fx = fixture().await;
        let link = fx
            .service
            .create(&fx.owner, full_create(&fx.owner))
            .await
            .unwrap();

        let err = fx
            .service
            .update(
                &fx.stranger,
                link.id,
                UpdateLinkRequest {
                    url: Some("www.twitter.com".to_string()),
                    desc: Some("Check out my Twitter".to_string()),
                    position: Some(1),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(
            err.message,
            "this link can only be updated by its authorized user"
        );

        let unchanged = fx.links.find_by_id(link.id).await.unwrap().unwrap();
        assert_eq!(unchanged.url, "www.linkedin.com");
    }

    #[tokio::test]
    async fn update_of_unknown_link_is_not_found() {
        let fx = fixture().await;

        let err = fx
            .service
            .update(
                &fx.owner,
                Uuid::new_v4(),
                UpdateLinkRequest {
                    url: Some("www.twitter.com".to_string()),
                    desc: Some("Check out my Twitter".to_string()),
                    position: Some(1),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_rejected_with_the_delete_message() {
        let fx = fixture().await;
        let link = fx
            .service
            .create(&fx.owner, full_create(&fx.owner))
            .await
            .unwrap();

        let err = fx.service.delete(&fx.stranger, link.id).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(
            err.message,
            "this link can only be deleted by its authorized user"
        );
        assert_eq!(fx.links.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn owner_deletes_a_link() {
        let fx = fixture().await;
        let link = fx
            .service
            .create(&fx.owner, full_create(&fx.owner))
            .await
            .unwrap();

        fx.service.delete(&fx.owner, link.id).await.unwrap();

        assert_eq!(fx.links.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_keeps_the_owner_unchanged() {
        let fx = fixture().await;
        let link = fx
            .service
            .create(&fx.owner, full_create(&fx.owner))
            .await
            .unwrap();

        let updated = fx
            .service
            .update(
                &fx.owner,
                link.id,
                UpdateLinkRequest {
                    url: Some("www.twitter.com".to_string()),
                    desc: Some("Check out my Twitter".to_string()),
                    position: Some(1),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user_id, fx.owner.user_id);
        assert_eq!(updated.id, link.id);
        assert_eq!(updated.url, "www.twitter.com");
    }
}
