//! In-process adapters selected by the `fake` backend setting.

mod article_repo_memory;
mod user_repo_memory;

pub use article_repo_memory::*;
pub use user_repo_memory::*;
