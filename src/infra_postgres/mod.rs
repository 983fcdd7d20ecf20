mod article_repo_pg;
mod pool;

pub use article_repo_pg::*;
pub use pool::*;
