use crate::domain_model::*;
use crate::domain_port::*;
use chrono::DateTime;
use std::collections::HashMap;

/// Read-only article table held in process memory.
pub struct InMemoryArticleRepo {
    articles: HashMap<ArticleId, Article>,
}

impl InMemoryArticleRepo {
    pub fn new(articles: impl IntoIterator<Item = (ArticleId, Article)>) -> Self {
        InMemoryArticleRepo {
            articles: articles.into_iter().collect(),
        }
    }

    /// A single article with id 1, for running without a database.
    pub fn with_sample_articles() -> Self {
        let sample = Article {
            title: "Lorem ipsum".to_string(),
            body: "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                   tempor incididunt ut labore et dolore magna aliqua."
                .to_string(),
            published_at: DateTime::from_timestamp(1_705_311_000, 0).unwrap_or_default(),
        };
        Self::new([(ArticleId(1), sample)])
    }
}

#[async_trait::async_trait]
impl ArticleRepo for InMemoryArticleRepo {
    async fn fetch_article(
        &self,
        ctx: &RequestContext,
        id: ArticleId,
    ) -> Result<Article, RepoError> {
        ctx.run(async { self.articles.get(&id).cloned() })
            .await?
            .ok_or(RepoError::NotFound)
    }
}
