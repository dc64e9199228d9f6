use serde_json::{Map, Value};
use sysrev_client::SysrevApi;
use sysrev_core::Label;

use crate::cli::root_commands::ProjectArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sysrev info <project-id>`.
pub async fn handle_info(args: &ProjectArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let info = ctx.client()?.get_project_info(args.project_id).await?;
    output(&info, ctx.flags.format)
}

/// Handle `sysrev labels <project-id>`.
pub async fn handle_labels(args: &ProjectArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let labels = ctx.client()?.get_labels(args.project_id).await?;
    let records: Vec<Map<String, Value>> = labels.iter().map(Label::to_record).collect();
    output(&records, ctx.flags.format)
}

/// Handle `sysrev annotations <project-id>`.
pub async fn handle_annotations(args: &ProjectArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let annotations = ctx
        .client()?
        .get_project_annotations(args.project_id)
        .await?;
    output(&annotations, ctx.flags.format)
}
