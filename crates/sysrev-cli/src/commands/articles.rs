use futures::TryStreamExt;
use sysrev_client::{SysrevApi, fetch_all_articles};

use crate::cli::root_commands::{ArticleArgs, ArticlesArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `sysrev articles <project-id>`.
pub async fn handle_list(args: &ArticlesArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let sort = ctx.sort(args.sort_by.as_ref(), args.sort_dir.as_ref());

    let articles = if args.all {
        let progress = Progress::spinner("listing articles");
        let articles: Vec<_> = fetch_all_articles(&client, args.project_id, args.limit, &sort)
            .inspect_ok(|article| progress.set_message(&format!("article {}", article.article_id)))
            .try_collect()
            .await?;
        progress.finish_clear();
        articles
    } else {
        client
            .get_project_articles(args.project_id, args.offset, args.limit, &sort)
            .await?
    };
    output(&articles, ctx.flags.format)
}

/// Handle `sysrev article <project-id> <article-id>`.
pub async fn handle_detail(args: &ArticleArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let detail = ctx
        .client()?
        .get_article_info(args.project_id, args.article_id)
        .await?;
    output(&detail, ctx.flags.format)
}
