use crate::application_port::AppError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Authenticate. Any mismatch is `AppError::NotFound`.
    async fn login(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, AppError>;

    async fn register(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, AppError>;
}
