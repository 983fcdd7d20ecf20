use crate::application_port::AppError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait ArticleService: Send + Sync {
    async fn get_article(&self, ctx: &RequestContext, id: ArticleId) -> Result<Article, AppError>;
}
