mod error;
mod handler;
mod router;
mod view;

pub use error::{ApiError, recover_error};
pub use router::routes;
