use anyhow::Context;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::cli::root_commands::{DownloadArgs, UploadArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `sysrev upload <project-id> <file>`.
pub async fn handle_upload(args: &UploadArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let progress = Progress::spinner(&format!("uploading {}", args.file.display()));
    let response = ctx
        .client()?
        .upload_jsonlines(&args.file, args.project_id)
        .await
        .with_context(|| format!("failed to upload {}", args.file.display()));
    progress.finish_clear();
    output(&response?, ctx.flags.format)
}

#[derive(Debug, Serialize)]
struct DownloadResponse {
    path: String,
    bytes: usize,
}

/// Handle `sysrev download <project-id> <article-id> <hash>`.
///
/// Without `--output` the file is written to stdout as-is.
pub async fn handle_download(args: &DownloadArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let bytes = ctx
        .client()?
        .get_article_file(args.project_id, args.article_id, &args.hash)
        .await?;

    let Some(path) = &args.output else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&bytes).await?;
        stdout.flush().await?;
        return Ok(());
    };

    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    output(
        &DownloadResponse {
            path: path.display().to_string(),
            bytes: bytes.len(),
        },
        ctx.flags.format,
    )
}
