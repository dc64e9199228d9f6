use crate::cli::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Sync(args) => commands::sync::handle(&args, ctx).await,
        Commands::Info(args) => commands::project::handle_info(&args, ctx).await,
        Commands::Labels(args) => commands::project::handle_labels(&args, ctx).await,
        Commands::Annotations(args) => commands::project::handle_annotations(&args, ctx).await,
        Commands::Articles(args) => commands::articles::handle_list(&args, ctx).await,
        Commands::Article(args) => commands::articles::handle_detail(&args, ctx).await,
        Commands::SetLabels(args) => commands::labels::handle(&args, ctx).await,
        Commands::Upload(args) => commands::files::handle_upload(&args, ctx).await,
        Commands::Download(args) => commands::files::handle_download(&args, ctx).await,
        Commands::Tables(args) => commands::tables::handle(&args, ctx),
    }
}
