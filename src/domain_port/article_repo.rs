use crate::domain_model::*;
use crate::domain_port::RepoError;

#[async_trait::async_trait]
pub trait ArticleRepo: Send + Sync {
    /// Fetch one article by id. Zero rows is `RepoError::NotFound`.
    async fn fetch_article(
        &self,
        ctx: &RequestContext,
        id: ArticleId,
    ) -> Result<Article, RepoError>;
}
