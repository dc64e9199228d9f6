//! Full-project article enumeration.
//!
//! Offsets start at 0 and advance by the number of articles each page
//! actually returned. Enumeration ends on the first empty page; the
//! project-info article count is never used as a bound, since articles can
//! be added or removed while we page.

use futures::stream::{self, Stream, TryStreamExt};
use sysrev_core::{Article, ProjectId};

use crate::{ArticleSort, ClientError, SysrevApi};

/// One non-empty page returned during enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticlePage {
    /// Offset the page was requested at.
    pub offset: u64,
    pub articles: Vec<Article>,
}

/// Lazily enumerate every page of a project's articles.
///
/// The stream is finite and restartable only from offset 0: each new call
/// starts over. It yields an error and stops if any page request fails.
pub fn article_pages<'a, A>(
    api: &'a A,
    project_id: ProjectId,
    limit: u32,
    sort: &'a ArticleSort,
) -> impl Stream<Item = Result<ArticlePage, ClientError>> + Send + 'a
where
    A: SysrevApi + ?Sized,
{
    stream::try_unfold(0u64, move |offset| async move {
        let articles = api
            .get_project_articles(project_id, offset, limit, sort)
            .await?;
        if articles.is_empty() {
            tracing::debug!(project_id, offset, "empty page, enumeration complete");
            return Ok(None);
        }
        let next = offset + articles.len() as u64;
        Ok(Some((ArticlePage { offset, articles }, next)))
    })
}

/// Lazily enumerate every article of a project, page by page.
///
/// See [`article_pages`] for termination rules.
pub fn fetch_all_articles<'a, A>(
    api: &'a A,
    project_id: ProjectId,
    limit: u32,
    sort: &'a ArticleSort,
) -> impl Stream<Item = Result<Article, ClientError>> + Send + 'a
where
    A: SysrevApi + ?Sized,
{
    article_pages(api, project_id, limit, sort)
        .map_ok(|page| stream::iter(page.articles.into_iter().map(Ok::<_, ClientError>)))
        .try_flatten()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use sysrev_core::{ArticleDetail, ArticleId, ProjectInfo};

    use super::*;

    /// Serves `total` articles, optionally short-changing one page.
    struct PagedProject {
        total: u64,
        short_page_at: Option<u64>,
        fail_at: Option<u64>,
        offsets: Mutex<Vec<u64>>,
    }

    impl PagedProject {
        fn new(total: u64) -> Self {
            Self {
                total,
                short_page_at: None,
                fail_at: None,
                offsets: Mutex::new(Vec::new()),
            }
        }

        fn offsets(&self) -> Vec<u64> {
            self.offsets.lock().unwrap().clone()
        }
    }

    fn article(id: ArticleId) -> Article {
        serde_json::from_value(serde_json::json!({ "article-id": id })).unwrap()
    }

    impl SysrevApi for PagedProject {
        async fn get_project_info(&self, _: ProjectId) -> Result<ProjectInfo, ClientError> {
            unreachable!("pagination never asks for project info")
        }

        async fn get_project_articles(
            &self,
            _: ProjectId,
            offset: u64,
            limit: u32,
            _: &ArticleSort,
        ) -> Result<Vec<Article>, ClientError> {
            self.offsets.lock().unwrap().push(offset);
            if self.fail_at == Some(offset) {
                return Err(ClientError::Api {
                    status: 502,
                    message: "bad gateway".into(),
                });
            }
            let mut count = u64::from(limit);
            if self.short_page_at == Some(offset) {
                count = 1;
            }
            let end = (offset + count).min(self.total);
            Ok((offset..end).map(|i| article(i + 100)).collect())
        }

        async fn get_article_info(
            &self,
            _: ProjectId,
            _: ArticleId,
        ) -> Result<ArticleDetail, ClientError> {
            unreachable!("pagination never asks for article info")
        }
    }

    async fn collect_ids(api: &PagedProject, limit: u32) -> Result<Vec<ArticleId>, ClientError> {
        let sort = ArticleSort::default();
        fetch_all_articles(api, 1, limit, &sort)
            .map_ok(|a| a.article_id)
            .try_collect()
            .await
    }

    #[tokio::test]
    async fn yields_every_article_once() {
        let api = PagedProject::new(5);
        let ids = collect_ids(&api, 2).await.unwrap();

        assert_eq!(ids.len(), 5);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 5);
        // ceil(5/2) = 3 non-empty pages, then one empty page terminates.
        assert_eq!(api.offsets(), vec![0, 2, 4, 5]);
    }

    #[tokio::test]
    async fn exact_multiple_of_limit() {
        let api = PagedProject::new(4);
        let ids = collect_ids(&api, 2).await.unwrap();
        assert_eq!(ids, vec![100, 101, 102, 103]);
        assert_eq!(api.offsets(), vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn short_page_does_not_stop_enumeration() {
        let mut api = PagedProject::new(5);
        api.short_page_at = Some(2);
        let ids = collect_ids(&api, 2).await.unwrap();

        assert_eq!(ids.len(), 5);
        assert_eq!(api.offsets(), vec![0, 2, 3, 5]);
    }

    #[tokio::test]
    async fn empty_project_makes_one_call() {
        let api = PagedProject::new(0);
        assert!(collect_ids(&api, 10).await.unwrap().is_empty());
        assert_eq!(api.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn page_failure_ends_the_stream_with_error() {
        let mut api = PagedProject::new(6);
        api.fail_at = Some(2);
        let err = collect_ids(&api, 2).await.unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 502, .. }));
        assert_eq!(api.offsets(), vec![0, 2]);
    }

    #[tokio::test]
    async fn pages_report_their_offsets() {
        let api = PagedProject::new(3);
        let sort = ArticleSort::default();
        let pages: Vec<ArticlePage> = article_pages(&api, 1, 2, &sort).try_collect().await.unwrap();
        assert_eq!(pages.iter().map(|p| p.offset).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(pages[1].articles.len(), 1);
    }
}
