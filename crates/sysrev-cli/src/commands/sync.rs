use sysrev_sync::{SyncOptions, Synchronizer};

use crate::cli::root_commands::SyncArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `sysrev sync <project-id>`.
///
/// The caller holds the store write lock for the duration.
pub async fn handle(args: &SyncArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let mut store = ctx.open_store()?;
    let options = SyncOptions {
        page_limit: args.page_limit.unwrap_or(ctx.config.sync.page_limit),
        sort: ctx.sort(args.sort_by.as_ref(), args.sort_dir.as_ref()),
    };
    tracing::info!(
        project_id = args.project_id,
        page_limit = options.page_limit,
        store = %ctx.store_path().display(),
        "starting sync"
    );

    let progress = Progress::spinner("starting sync");
    let result = Synchronizer::new(&mut store, options)
        .with_progress(|event| progress.on_sync(event))
        .sync(&client, args.project_id)
        .await;

    match result {
        Ok(report) => output(&report, ctx.flags.format),
        Err(error) => {
            progress.finish_err(&format!("sync stopped after {}", error.state()));
            Err(anyhow::Error::new(error)
                .context(format!("failed to sync project {}", args.project_id)))
        }
    }
}
