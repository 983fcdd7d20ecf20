mod client;
mod user_repo_mongo;

pub use client::*;
pub use user_repo_mongo::*;
