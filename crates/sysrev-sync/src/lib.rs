//! # sysrev-sync
//!
//! Mirrors one Sysrev project into a [`SysrevStore`].
//!
//! A sync walks a fixed sequence of states:
//!
//! ```text
//! Uninitialized → SchemaReady → ArticlesFetched → DetailFetched → Persisted → Done
//! ```
//!
//! Everything is fetched before anything is written. Each of the six
//! mirror tables is then replaced in its own transaction, so a failure
//! part way through persisting leaves earlier tables new and later ones
//! old. A table with no rows this run keeps its previous contents.
//!
//! Requests are issued one at a time: project info (which also carries the
//! label definitions), article pages until an empty page, then one detail
//! request per article.

pub mod error;
pub mod normalize;
pub mod progress;

pub use error::SyncError;
pub use progress::SyncProgress;

use std::collections::HashSet;
use std::fmt;
use std::pin::pin;

use futures::TryStreamExt;
use serde::Serialize;
use sysrev_client::{ArticleSort, ClientError, SysrevApi, article_pages};
use sysrev_core::{Article, ArticleDetail, ArticleId, ProjectId};
use sysrev_store::{ReplaceOutcome, SysrevStore};

use crate::progress::ProgressFn;

/// Where a sync run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Uninitialized,
    SchemaReady,
    ArticlesFetched,
    DetailFetched,
    Persisted,
    Done,
}

impl SyncState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::SchemaReady => "schema_ready",
            Self::ArticlesFetched => "articles_fetched",
            Self::DetailFetched => "detail_fetched",
            Self::Persisted => "persisted",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for one sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Articles requested per page.
    pub page_limit: u32,
    pub sort: ArticleSort,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            page_limit: 10,
            sort: ArticleSort::default(),
        }
    }
}

/// Outcome of writing one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: String,
    /// `None` when the table had no rows and was left untouched.
    pub rows: Option<usize>,
}

/// Summary of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub project_id: ProjectId,
    /// Count the server reported up front.
    pub expected_articles: u64,
    pub labels: usize,
    /// Articles actually enumerated.
    pub articles: usize,
    pub judgments: usize,
    pub pages: usize,
    pub tables: Vec<TableReport>,
}

#[derive(Debug, Default)]
struct Tally {
    expected: Option<u64>,
    articles: Option<u64>,
}

/// Drives a full sync of one project into a store.
///
/// Holds the store exclusively for its lifetime; the store is the only
/// writer of the mirror.
pub struct Synchronizer<'a> {
    store: &'a mut SysrevStore,
    options: SyncOptions,
    state: SyncState,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> Synchronizer<'a> {
    #[must_use]
    pub fn new(store: &'a mut SysrevStore, options: SyncOptions) -> Self {
        Self {
            store,
            options,
            state: SyncState::Uninitialized,
            progress: None,
        }
    }

    /// Receive a [`SyncProgress`] event at every step.
    #[must_use]
    pub fn with_progress(mut self, callback: impl FnMut(&SyncProgress) + Send + 'a) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// State reached by the last (or current) run.
    #[must_use]
    pub const fn state(&self) -> SyncState {
        self.state
    }

    fn emit(&mut self, event: SyncProgress) {
        progress::trace(&event);
        if let Some(callback) = self.progress.as_mut() {
            callback(&event);
        }
    }

    /// Fetch project `project_id` from `api` and replace the mirror with it.
    ///
    /// The attempt is recorded in `sync_log` whether it succeeds or not.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Client`] on the first failed request, before
    /// anything is written, and [`SyncError::Store`] if a table cannot be
    /// written. Either carries the last state reached.
    pub async fn sync<A>(&mut self, api: &A, project_id: ProjectId) -> Result<SyncReport, SyncError>
    where
        A: SysrevApi + ?Sized,
    {
        self.state = SyncState::Uninitialized;
        self.emit(SyncProgress::Started { project_id });

        self.store
            .ensure_schema()
            .map_err(|e| SyncError::store(self.state, e))?;
        self.state = SyncState::SchemaReady;

        let run_id = self
            .store
            .begin_sync_run(project_id, self.state.as_str())
            .map_err(|e| SyncError::store(self.state, e))?;

        let mut tally = Tally::default();
        let result = self.run(api, project_id, &mut tally).await;

        match &result {
            Ok(_) => {
                self.store
                    .finish_sync_run(
                        run_id,
                        SyncState::Done.as_str(),
                        tally.expected,
                        tally.articles,
                        None,
                    )
                    .map_err(|e| SyncError::store(self.state, e))?;
                self.state = SyncState::Done;
            }
            Err(err) => {
                tracing::warn!(project_id, state = %err.state(), error = %err, "sync failed");
                if let Err(log_err) = self.store.finish_sync_run(
                    run_id,
                    err.state().as_str(),
                    tally.expected,
                    tally.articles,
                    Some(&err.to_string()),
                ) {
                    tracing::warn!(error = %log_err, "could not record failed sync");
                }
            }
        }

        let report = result?;
        self.emit(SyncProgress::Finished {
            report: report.clone(),
        });
        Ok(report)
    }

    async fn run<A>(
        &mut self,
        api: &A,
        project_id: ProjectId,
        tally: &mut Tally,
    ) -> Result<SyncReport, SyncError>
    where
        A: SysrevApi + ?Sized,
    {
        let info = api
            .get_project_info(project_id)
            .await
            .map_err(|e| SyncError::client(self.state, e))?;
        let expected = info.article_count();
        tally.expected = Some(expected);
        self.emit(SyncProgress::ProjectInfo { expected });

        let labels = info
            .labels()
            .map_err(|e| SyncError::client(self.state, ClientError::from(e)))?;
        self.emit(SyncProgress::Labels {
            count: labels.len(),
        });

        let (articles, pages) = self.enumerate(api, project_id).await?;
        tally.articles = Some(articles.len() as u64);
        self.state = SyncState::ArticlesFetched;

        let details = self.fetch_details(api, project_id, &articles).await?;
        self.state = SyncState::DetailFetched;

        let tables = normalize::mirror_tables(&labels, &articles, &details);
        let judgments = articles.iter().map(|a| a.labels.len()).sum();
        let mut reports = Vec::with_capacity(tables.len());
        for table in &tables {
            let outcome = self
                .store
                .replace_table(table)
                .map_err(|e| SyncError::store(self.state, e))?;
            let rows = match outcome {
                ReplaceOutcome::Written { rows } => {
                    self.emit(SyncProgress::TableWritten {
                        table: table.name.clone(),
                        rows,
                    });
                    Some(rows)
                }
                ReplaceOutcome::Skipped => {
                    self.emit(SyncProgress::TableSkipped {
                        table: table.name.clone(),
                    });
                    None
                }
            };
            reports.push(TableReport {
                table: table.name.clone(),
                rows,
            });
        }
        self.state = SyncState::Persisted;

        Ok(SyncReport {
            project_id,
            expected_articles: expected,
            labels: labels.len(),
            articles: articles.len(),
            judgments,
            pages,
            tables: reports,
        })
    }

    /// Page through every article. An article seen on an earlier page is
    /// not added again.
    ///
    /// Consumes [`article_pages`], the page-level form of
    /// [`sysrev_client::fetch_all_articles`], so each page can be reported.
    async fn enumerate<A>(
        &mut self,
        api: &A,
        project_id: ProjectId,
    ) -> Result<(Vec<Article>, usize), SyncError>
    where
        A: SysrevApi + ?Sized,
    {
        let sort = self.options.sort.clone();
        let mut pages = pin!(article_pages(api, project_id, self.options.page_limit, &sort));
        let mut seen: HashSet<ArticleId> = HashSet::new();
        let mut articles = Vec::new();
        let mut page_count = 0;

        while let Some(page) = pages
            .try_next()
            .await
            .map_err(|e| SyncError::client(self.state, e))?
        {
            page_count += 1;
            self.emit(SyncProgress::ArticlePage {
                offset: page.offset,
                fetched: page.articles.len(),
            });
            for article in page.articles {
                if seen.insert(article.article_id) {
                    articles.push(article);
                } else {
                    tracing::warn!(
                        article_id = article.article_id,
                        offset = page.offset,
                        "article returned on more than one page, keeping first"
                    );
                }
            }
        }
        Ok((articles, page_count))
    }

    async fn fetch_details<A>(
        &mut self,
        api: &A,
        project_id: ProjectId,
        articles: &[Article],
    ) -> Result<Vec<(ArticleId, ArticleDetail)>, SyncError>
    where
        A: SysrevApi + ?Sized,
    {
        let expected = articles.len();
        let mut details = Vec::with_capacity(expected);
        for (index, article) in articles.iter().enumerate() {
            let detail = api
                .get_article_info(project_id, article.article_id)
                .await
                .map_err(|e| SyncError::client(self.state, e))?;
            details.push((article.article_id, detail));
            self.emit(SyncProgress::ArticleDetail {
                article_id: article.article_id,
                done: index + 1,
                expected,
            });
        }
        Ok(details)
    }
}
