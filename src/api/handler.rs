use super::error::*;
use super::view;
use crate::application_port::*;
use crate::domain_model::*;
use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{self, reject};

const MAX_LOGGED_INPUT: usize = 32;

/// Clip and escape client text before it goes into a log line.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .take(MAX_LOGGED_INPUT)
        .flat_map(char::escape_debug)
        .collect()
}

fn client_ip(remote: Option<SocketAddr>) -> String {
    remote
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn health() -> impl warp::Reply {
    warp::reply::json(&HealthResponse { status: "ok" })
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub id: Option<String>,
}

pub async fn get_news(
    query: NewsQuery,
    remote: Option<SocketAddr>,
    ctx: RequestContext,
    article_service: Arc<dyn ArticleService>,
    logger: Logger,
) -> Result<impl warp::Reply, warp::Rejection> {
    let raw_id = query.id.unwrap_or_default();
    let request_id = ctx.request_id();
    let client_ip = client_ip(remote);
    log_event!(logger, debug, request_id, id = %sanitize(&raw_id), %client_ip, "article request received");

    let id = ArticleId::parse(&raw_id)
        .map_err(|e| {
            log_event!(logger, warn, request_id, id = %sanitize(&raw_id), %client_ip, reason = %e, "invalid article request");
            ApiError::for_article(&e.into())
        })
        .map_err(reject::custom)?;

    let article = article_service
        .get_article(&ctx, id)
        .await
        .map_err(|e| {
            log_event!(logger, warn, request_id, id = id.get(), %client_ip, kind = ?e.kind(), "article request failed");
            ApiError::for_article(&e)
        })
        .map_err(reject::custom)?;

    log_event!(logger, info, request_id, id = id.get(), %client_ip, "article request successful");
    Ok(warp::reply::html(view::render_article(&article)))
}

pub fn login_form() -> impl warp::Reply {
    warp::reply::html(view::LOGIN_PAGE)
}

// Both fields must be JSON strings; an object or array in either one fails
// deserialization instead of reaching the store.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub username: String,
}

pub async fn login(
    body: Bytes,
    ctx: RequestContext,
    identity_service: Arc<dyn IdentityService>,
    logger: Logger,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request_id = ctx.request_id();

    let request: LoginRequest = serde_json::from_slice(&body)
        .map_err(|e| {
            log_event!(logger, warn, request_id, category = ?e.classify(), "unreadable login body");
            ApiError::new(StatusCode::BAD_REQUEST, "Invalid request")
        })
        .map_err(reject::custom)?;
    let username = sanitize(&request.username);

    let credentials = Credentials::try_from_parts(&request.username, &request.password)
        .map_err(|e| {
            log_event!(logger, warn, request_id, %username, reason = %e, "invalid login request");
            ApiError::for_login(&e.into())
        })
        .map_err(reject::custom)?;

    let user = identity_service
        .login(&ctx, &credentials)
        .await
        .map_err(|e| {
            log_event!(logger, warn, request_id, %username, kind = ?e.kind(), "login rejected");
            ApiError::for_login(&e)
        })
        .map_err(reject::custom)?;

    log_event!(logger, info, request_id, %username, "login successful");
    Ok(warp::reply::json(&LoginResponse {
        message: "Login successful",
        username: user.username,
    }))
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserView,
}

pub async fn register(
    body: Bytes,
    ctx: RequestContext,
    identity_service: Arc<dyn IdentityService>,
    logger: Logger,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request_id = ctx.request_id();

    let request: SignupRequest = serde_json::from_slice(&body)
        .map_err(|e| {
            log_event!(logger, warn, request_id, category = ?e.classify(), "unreadable register body");
            ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body")
        })
        .map_err(reject::custom)?;
    let username = sanitize(&request.username);
    log_event!(logger, debug, request_id, %username, "register attempt");

    let credentials = Credentials::try_from_parts(&request.username, &request.password)
        .map_err(|e| {
            log_event!(logger, warn, request_id, %username, reason = %e, "invalid register request");
            ApiError::for_register(&e.into())
        })
        .map_err(reject::custom)?;

    let user = identity_service
        .register(&ctx, &credentials)
        .await
        .map_err(|e| {
            log_event!(logger, warn, request_id, %username, kind = ?e.kind(), "register failed");
            ApiError::for_register(&e)
        })
        .map_err(reject::custom)?;

    log_event!(logger, info, request_id, %username, id = %user.id, "user registered successfully");
    let response = SignupResponse {
        message: "User registered successfully",
        user,
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        StatusCode::CREATED,
    ))
}
