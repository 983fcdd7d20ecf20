mod article_service;
mod error;
mod identity_service;

pub use article_service::*;
pub use error::*;
pub use identity_service::*;
