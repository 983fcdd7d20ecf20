use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct StoredUser {
    username: String,
    password_hash: String,
}

/// Process-local user collection with the same lookup and registration
/// semantics as the document store adapter, including the unguarded
/// check-then-insert.
pub struct InMemoryUserRepo {
    users: DashMap<UserId, StoredUser>,
    hasher: Arc<dyn CredentialHasher>,
    logger: Logger,
}

impl InMemoryUserRepo {
    pub fn new(hasher: Arc<dyn CredentialHasher>, logger: Logger) -> Self {
        InMemoryUserRepo {
            users: DashMap::new(),
            hasher,
            logger,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find_by_username(&self, username: &str) -> Option<(UserId, StoredUser)> {
        self.users
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| (entry.key().clone(), entry.value().clone()))
    }
}

#[async_trait::async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_user(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, RepoError> {
        let found = ctx
            .run(async { self.find_by_username(credentials.username()) })
            .await?;
        let Some((id, user)) = found else {
            return Err(RepoError::NotFound);
        };

        let matches = ctx
            .run(
                self.hasher
                    .verify_password(credentials.password(), &user.password_hash),
            )
            .await??;
        if !matches {
            return Err(RepoError::NotFound);
        }

        Ok(UserView {
            id,
            username: user.username,
        })
    }

    async fn create_user(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, RepoError> {
        let username = credentials.username();
        let existing = ctx.run(async { self.find_by_username(username) }).await?;
        if existing.is_some() {
            return Err(RepoError::Duplicate);
        }

        let password_hash = ctx
            .run(self.hasher.hash_password(credentials.password()))
            .await??;

        let id = UserId(ObjectId::new().to_hex());
        self.users.insert(
            id.clone(),
            StoredUser {
                username: username.to_owned(),
                password_hash,
            },
        );
        log_event!(self.logger, debug, %id, username, "user inserted");

        Ok(UserView {
            id,
            username: username.to_owned(),
        })
    }
}
