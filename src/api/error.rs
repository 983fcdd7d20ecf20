use crate::application_port::*;
use serde::Serialize;
use std::borrow::Cow;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Rejection, reject};

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// Status and fixed client message for a failed request. The underlying
/// cause is logged where it happens and never copied in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Cow<'static, str>,
}

impl reject::Reject for ApiError {}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    }

    /// `GET /news`. A broken store answers like a missing article.
    pub fn for_article(error: &AppError) -> Self {
        match error {
            AppError::InvalidInput(message) => Self::new(StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound | AppError::BackendFailure(_) => {
                Self::new(StatusCode::NOT_FOUND, "article not found")
            }
            AppError::Conflict => Self::internal(),
        }
    }

    /// `POST /login`. Unknown user, wrong password and store trouble all
    /// produce the same response.
    pub fn for_login(error: &AppError) -> Self {
        match error {
            AppError::InvalidInput(_) => Self::new(StatusCode::BAD_REQUEST, "Invalid request"),
            AppError::NotFound | AppError::BackendFailure(_) => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            AppError::Conflict => Self::internal(),
        }
    }

    /// `POST /user/register`.
    pub fn for_register(error: &AppError) -> Self {
        match error {
            AppError::InvalidInput(_) => Self::new(
                StatusCode::BAD_REQUEST,
                "Username and password are required",
            ),
            AppError::Conflict => Self::new(StatusCode::CONFLICT, "User already exists"),
            AppError::NotFound | AppError::BackendFailure(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Failed to create user")
            }
        }
    }
}

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, message): (StatusCode, Cow<'static, str>) = if let Some(e) = err.find::<ApiError>() {
        (e.status, e.message.clone())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".into())
    } else if err.find::<reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".into())
    } else if err.find::<reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".into())
    } else if err.find::<reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string".into())
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        // Checked last: a sibling route on the same path rejects on method
        // even when the matching route failed for another reason.
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".into())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
    };

    let json = warp::reply::json(&ErrorBody { error: &message });
    Ok(warp::reply::with_status(json, status))
}
