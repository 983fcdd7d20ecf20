mod article;
mod context;
mod user;

pub use article::*;
pub use context::*;
pub use user::*;
