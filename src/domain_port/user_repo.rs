use crate::domain_model::*;
use crate::domain_port::RepoError;

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Exact match on username plus password verification. An unknown
    /// username and a wrong password are both `RepoError::NotFound`.
    async fn find_user(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, RepoError>;

    /// Insert a user unless the username is taken (`RepoError::Duplicate`).
    ///
    /// The existence check and the insert are separate store calls, so two
    /// concurrent registrations of the same name can both succeed unless the
    /// store itself has a unique index on `username`.
    async fn create_user(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<UserView, RepoError>;
}
