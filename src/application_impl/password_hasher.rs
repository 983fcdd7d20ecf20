use crate::domain_model::Password;
use crate::domain_port::{CredentialHasher, RepoError};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// Salted Argon2id PHC strings. Work runs on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(params: Params) -> Self {
        Argon2PasswordHasher { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    #[cfg(test)]
    pub(crate) fn cheap() -> Self {
        Self::new(Params::new(8, 1, 1, None).unwrap())
    }
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &Password) -> Result<String, RepoError> {
        let password = password.expose().to_owned();
        let argon2 = self.argon2();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| RepoError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| RepoError::Internal(format!("hashing task: {e}")))?
    }

    async fn verify_password(
        &self,
        password: &Password,
        password_hash: &str,
    ) -> Result<bool, RepoError> {
        let password = password.expose().to_owned();
        let password_hash = password_hash.to_owned();
        let argon2 = self.argon2();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash)
                .map_err(|e| RepoError::Decode(format!("invalid PHC hash: {e}")))?;

            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(RepoError::Internal(format!("verify error: {e}"))),
            }
        })
        .await
        .map_err(|e| RepoError::Internal(format!("verify task: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::Credentials;

    fn password(raw: &str) -> Password {
        Credentials::try_from_parts("someone", raw)
            .unwrap()
            .password()
            .clone()
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = Argon2PasswordHasher::cheap();
        let hash = hasher.hash_password(&password("p1")).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("p1"));
        assert!(hasher.verify_password(&password("p1"), &hash).await.unwrap());
        assert!(!hasher.verify_password(&password("p2"), &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let hasher = Argon2PasswordHasher::cheap();
        let a = hasher.hash_password(&password("p1")).await.unwrap();
        let b = hasher.hash_password(&password("p1")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn plain_text_stored_value_is_a_decode_error() {
        let hasher = Argon2PasswordHasher::cheap();
        let result = hasher.verify_password(&password("p1"), "p1").await;
        assert!(matches!(result, Err(RepoError::Decode(_))));
    }
}
