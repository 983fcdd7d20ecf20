use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DUPLICATE_KEY: i32 = 11000;

/// Shape of a document in the users collection. `password` holds a PHC hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
}

impl UserDocument {
    fn to_view(&self) -> Result<UserView, RepoError> {
        let id = self
            .id
            .ok_or_else(|| RepoError::Decode("user document without _id".to_string()))?;
        Ok(UserView {
            id: UserId(id.to_hex()),
            username: self.username.clone(),
        })
    }
}

/// The only filter ever sent to the collection: equality on one string field.
pub(crate) fn username_filter(username: &str) -> Document {
    doc! { "username": username }
}

pub(crate) fn map_mongo_error(err: mongodb::error::Error) -> RepoError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY => {
            RepoError::Duplicate
        }
        ErrorKind::BsonDeserialization(_) => RepoError::Decode(err.to_string()),
        _ => RepoError::Store(err.to_string()),
    }
}

pub struct MongoUserRepo {
    collection: Collection<UserDocument>,
    hasher: Arc<dyn CredentialHasher>,
    logger: Logger,
}

impl MongoUserRepo {
    pub fn new(
        collection: Collection<UserDocument>,
        hasher: Arc<dyn CredentialHasher>,
        logger: Logger,
    ) -> Self {
        MongoUserRepo {
            collection,
            hasher,
            logger,
        }
    }

    async fn find_by_username(
        &self,
        ctx: &RequestContext,
        username: &str,
    ) -> Result<Option<UserDocument>, RepoError> {
        ctx.run(self.collection.find_one(username_filter(username)))
            .await?
            .map_err(|e| {
                log_event!(
                    self.logger,
                    error,
                    request_id = ctx.request_id(),
                    username,
                    error = %e,
                    "error finding user"
                );
                map_mongo_error(e)
            })
    }
}

#[async_trait::async_trait]
impl UserRepo for MongoUserRepo {
    async fn find_user(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, RepoError> {
        let Some(user) = self.find_by_username(ctx, credentials.username()).await? else {
            return Err(RepoError::NotFound);
        };

        let matches = ctx
            .run(
                self.hasher
                    .verify_password(credentials.password(), &user.password),
            )
            .await??;
        if !matches {
            return Err(RepoError::NotFound);
        }

        user.to_view()
    }

    async fn create_user(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, RepoError> {
        let request_id = ctx.request_id();
        let username = credentials.username();

        if self.find_by_username(ctx, username).await?.is_some() {
            return Err(RepoError::Duplicate);
        }

        let password = ctx
            .run(self.hasher.hash_password(credentials.password()))
            .await??;
        let user = UserDocument {
            id: Some(ObjectId::new()),
            username: username.to_owned(),
            password,
        };

        ctx.run(self.collection.insert_one(&user))
            .await?
            .map_err(|e| {
                log_event!(self.logger, error, request_id, username, error = %e, "error creating user");
                map_mongo_error(e)
            })?;

        let view = user.to_view()?;
        log_event!(self.logger, debug, request_id, username, id = %view.id, "user document inserted");
        Ok(view)
    }
}
