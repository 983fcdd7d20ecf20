use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealArticleService {
    article_repo: Arc<dyn ArticleRepo>,
    logger: Logger,
}

impl RealArticleService {
    pub fn new(article_repo: Arc<dyn ArticleRepo>, logger: Logger) -> RealArticleService {
        log_event!(logger, info, "article service initialized");
        RealArticleService {
            article_repo,
            logger,
        }
    }
}

#[async_trait::async_trait]
impl ArticleService for RealArticleService {
    async fn get_article(&self, ctx: &RequestContext, id: ArticleId) -> Result<Article, AppError> {
        let request_id = ctx.request_id();
        log_event!(self.logger, debug, request_id, id = id.get(), "fetching article");

        match self.article_repo.fetch_article(ctx, id).await {
            Ok(article) => {
                log_event!(self.logger, info, request_id, id = id.get(), "article fetched");
                Ok(article)
            }
            Err(RepoError::NotFound) => {
                log_event!(self.logger, warn, request_id, id = id.get(), "article not found");
                Err(AppError::NotFound)
            }
            Err(e) => {
                log_event!(
                    self.logger,
                    error,
                    request_id,
                    id = id.get(),
                    error = %e,
                    "failed to fetch article"
                );
                Err(e.into())
            }
        }
    }
}
