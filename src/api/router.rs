use super::handler;
use super::handler::NewsQuery;
use crate::domain_model::RequestContext;
use crate::logger::Logger;
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    // Path before method, so an unknown path stays a 404 instead of
    // surfacing as a 405 from some other route.
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(handler::health);

    let news = warp::path("news")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<NewsQuery>())
        .and(warp::addr::remote())
        .and(with_context(server.clone()))
        .and(with(server.article_service.clone()))
        .and(with_logger(server.api_logger.clone()))
        .and_then(handler::get_news);

    let login_form = warp::path("login")
        .and(warp::path::end())
        .and(warp::get())
        .map(handler::login_form);

    let login = warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_context(server.clone()))
        .and(with(server.identity_service.clone()))
        .and(with_logger(server.api_logger.clone()))
        .and_then(handler::login);

    let register = warp::path("user")
        .and(warp::path("register"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_context(server.clone()))
        .and(with(server.identity_service.clone()))
        .and(with_logger(server.api_logger.clone()))
        .and_then(handler::register);

    health.or(news).or(login_form).or(login).or(register)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_logger(logger: Logger) -> impl Filter<Extract = (Logger,), Error = Infallible> + Clone {
    warp::any().map(move || logger.clone())
}

// A fresh deadline per request. If the client goes away warp drops the
// handler future, and with it any store call in flight; on shutdown the
// server cancels the parent token instead.
fn with_context(
    server: Arc<Server>,
) -> impl Filter<Extract = (RequestContext,), Error = Infallible> + Clone {
    warp::any().map(move || server.request_context())
}
