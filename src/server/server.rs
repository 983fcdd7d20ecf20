use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::RequestContext;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mongo::*;
use crate::infra_postgres::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Wired services plus the connection pools that must be closed on shutdown.
pub struct Server {
    pub article_service: Arc<dyn ArticleService>,
    pub identity_service: Arc<dyn IdentityService>,
    pub request_timeout: Duration,
    pub api_logger: Logger,
    cancel: CancellationToken,
    pg_pool: Option<PgPool>,
    mongo_client: Option<mongodb::Client>,
    logger: Logger,
}

impl Server {
    pub async fn try_new(settings: &Settings, logging: &Logging) -> anyhow::Result<Self> {
        let logger = logging.logger("server");

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher::default());

        let mut pg_pool = None;
        let article_repo: Arc<dyn ArticleRepo> = match settings.articles.backend.as_str() {
            "fake" => Arc::new(InMemoryArticleRepo::with_sample_articles()),
            "real" => {
                let pool = connect_pool(&settings.postgres).await?;
                log_event!(logger, info, "database connection established");
                pg_pool = Some(pool.clone());
                Arc::new(PgArticleRepo::new(pool, logging.logger("article_repo")))
            }
            other => return Err(anyhow::anyhow!("Unknown articles backend: {}", other)),
        };

        let mut mongo_client = None;
        let user_repo: Arc<dyn UserRepo> = match settings.users.backend.as_str() {
            "fake" => Arc::new(InMemoryUserRepo::new(
                credential_hasher.clone(),
                logging.logger("user_repo"),
            )),
            "real" => {
                let client = connect_client(&settings.mongo).await?;
                log_event!(logger, info, "mongodb connection established");
                let collection = users_collection(&client, &settings.mongo);
                mongo_client = Some(client);
                Arc::new(MongoUserRepo::new(
                    collection,
                    credential_hasher.clone(),
                    logging.logger("user_repo"),
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown users backend: {}", other)),
        };

        let article_service: Arc<dyn ArticleService> = Arc::new(RealArticleService::new(
            article_repo,
            logging.logger("article_service"),
        ));
        let identity_service: Arc<dyn IdentityService> = Arc::new(RealIdentityService::new(
            user_repo,
            logging.logger("identity_service"),
        ));

        log_event!(
            logger,
            info,
            articles = %settings.articles.backend,
            users = %settings.users.backend,
            "server started"
        );

        Ok(Self {
            article_service,
            identity_service,
            request_timeout: Duration::from_millis(settings.request.timeout_ms),
            api_logger: logging.logger("http"),
            cancel: CancellationToken::new(),
            pg_pool,
            mongo_client,
            logger,
        })
    }

    /// Server over already-built services with no pools to manage.
    pub fn from_services(
        article_service: Arc<dyn ArticleService>,
        identity_service: Arc<dyn IdentityService>,
        request_timeout: Duration,
        logger: Logger,
    ) -> Self {
        Self {
            article_service,
            identity_service,
            request_timeout,
            api_logger: logger.child("http"),
            cancel: CancellationToken::new(),
            pg_pool: None,
            mongo_client: None,
            logger,
        }
    }

    /// Fresh per-request context, tied to the server-wide cancel token.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_parent(&self.cancel, self.request_timeout)
    }

    /// Abort every store call still in flight. Requests being drained after
    /// the shutdown signal finish with a cancellation failure.
    pub fn cancel_requests(&self) {
        if !self.cancel.is_cancelled() {
            log_event!(self.logger, info, "cancelling in-flight requests");
            self.cancel.cancel();
        }
    }

    pub async fn shutdown(&self) {
        self.cancel_requests();

        log_event!(self.logger, info, "server shutting down...");

        if let Some(pool) = &self.pg_pool {
            pool.close().await;
            log_event!(self.logger, info, "database pool closed");
        }
        if let Some(client) = &self.mongo_client {
            client.clone().shutdown().await;
            log_event!(self.logger, info, "mongodb client shut down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::*;
    use crate::settings::*;

    fn settings(articles: &str, users: &str) -> Settings {
        Settings {
            http: Http {
                address: "127.0.0.1:0".into(),
                tls: None,
            },
            log: Log {
                filter: "info".into(),
            },
            request: Request { timeout_ms: 250 },
            articles: Articles {
                backend: articles.into(),
            },
            users: Users {
                backend: users.into(),
            },
            postgres: Postgres {
                dsn: String::new(),
                max_connections: 1,
                acquire_timeout_ms: 100,
            },
            mongo: Mongo {
                uri: String::new(),
                database: "app".into(),
                collection: "users".into(),
            },
        }
    }

    #[tokio::test]
    async fn fake_backends_serve_sample_article() {
        let logging = Logging::with_writer("off", std::io::sink);
        let server = Server::try_new(&settings("fake", "fake"), &logging)
            .await
            .unwrap();
        assert_eq!(server.request_timeout, Duration::from_millis(250));

        let ctx = RequestContext::with_timeout(server.request_timeout);
        let article = server
            .article_service
            .get_article(&ctx, ArticleId(1))
            .await
            .unwrap();
        assert_eq!(article.title, "Lorem ipsum");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn unknown_backend_is_rejected() {
        let logging = Logging::with_writer("off", std::io::sink);
        let err = Server::try_new(&settings("fake", "redis"), &logging)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("redis"));
    }
}
