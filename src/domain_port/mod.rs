mod repo_error;
pub use repo_error::*;

// hashing

mod credential_hasher;
pub use credential_hasher::*;

// repo

mod article_repo;
mod user_repo;

pub use article_repo::*;
pub use user_repo::*;
