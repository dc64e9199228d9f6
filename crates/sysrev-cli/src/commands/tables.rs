use serde::Serialize;
use sysrev_store::{SyncRun, TableSummary};

use crate::cli::root_commands::TablesArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TablesResponse {
    store: String,
    tables: Vec<TableSummary>,
    recent_syncs: Vec<SyncRun>,
}

/// Handle `sysrev tables`. Read-only: a store that was never synced
/// reports no tables.
pub fn handle(args: &TablesArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let tables = store.table_summaries()?;
    let recent_syncs = store.recent_sync_runs(args.runs)?;

    // Table output lists only the table summaries.
    if ctx.flags.format == crate::cli::OutputFormat::Table {
        return output(&tables, ctx.flags.format);
    }
    output(
        &TablesResponse {
            store: ctx.store_path().display().to_string(),
            tables,
            recent_syncs,
        },
        ctx.flags.format,
    )
}
