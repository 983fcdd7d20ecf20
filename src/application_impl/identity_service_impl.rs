use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealIdentityService {
    user_repo: Arc<dyn UserRepo>,
    logger: Logger,
}

impl RealIdentityService {
    pub fn new(user_repo: Arc<dyn UserRepo>, logger: Logger) -> RealIdentityService {
        log_event!(logger, info, "identity service initialized");
        RealIdentityService { user_repo, logger }
    }
}

#[async_trait::async_trait]
impl IdentityService for RealIdentityService {
    async fn login(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, AppError> {
        let request_id = ctx.request_id();
        let username = credentials.username();
        log_event!(self.logger, debug, request_id, username, "looking up user");

        match self.user_repo.find_user(ctx, credentials).await {
            Ok(user) => {
                log_event!(self.logger, info, request_id, username, id = %user.id, "user fetched");
                Ok(user)
            }
            Err(RepoError::NotFound) => {
                log_event!(self.logger, warn, request_id, username, "credentials did not match");
                Err(AppError::NotFound)
            }
            Err(e) => {
                log_event!(self.logger, error, request_id, username, error = %e, "failed to fetch user");
                Err(e.into())
            }
        }
    }

    async fn register(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, AppError> {
        let request_id = ctx.request_id();
        let username = credentials.username();
        log_event!(self.logger, debug, request_id, username, "creating user");

        match self.user_repo.create_user(ctx, credentials).await {
            Ok(user) => {
                log_event!(self.logger, info, request_id, username, id = %user.id, "user created");
                Ok(user)
            }
            Err(RepoError::Duplicate) => {
                log_event!(self.logger, warn, request_id, username, "user already exists");
                Err(AppError::Conflict)
            }
            Err(e) => {
                log_event!(self.logger, error, request_id, username, error = %e, "failed to create user");
                Err(e.into())
            }
        }
    }
}
