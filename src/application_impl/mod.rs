mod article_service_impl;
mod identity_service_impl;
mod password_hasher;

pub use article_service_impl::*;
pub use identity_service_impl::*;
pub use password_hasher::*;
