use crate::domain_model::Password;
use crate::domain_port::RepoError;

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &Password) -> Result<String, RepoError>;
    async fn verify_password(
        &self,
        password: &Password,
        password_hash: &str,
    ) -> Result<bool, RepoError>;
}
