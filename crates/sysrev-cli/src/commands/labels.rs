use serde_json::Value;
use sysrev_client::SetLabelFlags;

use crate::cli::root_commands::SetLabelsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Split `--label` assignments into the parallel id/value/type lists the
/// API call takes.
fn columns(args: &SetLabelsArgs) -> (Vec<String>, Vec<Value>, Vec<String>) {
    let ids = args.labels.iter().map(|l| l.label_id.clone()).collect();
    let values = args.labels.iter().map(|l| l.value.clone()).collect();
    let types = args.labels.iter().map(|l| l.label_type.clone()).collect();
    (ids, values, types)
}

/// Handle `sysrev set-labels <project-id> <article-id> --label ...`.
pub async fn handle(args: &SetLabelsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let (ids, values, types) = columns(args);
    let flags = SetLabelFlags {
        confirm: args.confirm,
        change: args.change,
        resolve: args.resolve,
    };
    let response = ctx
        .client()?
        .set_labels(args.project_id, args.article_id, &ids, &values, &types, flags)
        .await?;
    output(&response, ctx.flags.format)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn assignments_split_into_parallel_lists() {
        let cli = Cli::try_parse_from([
            "sysrev",
            "set-labels",
            "456",
            "789",
            "--label",
            "inc:boolean:yes",
            "--label",
            "design:categorical:[\"RCT\"]",
            "--confirm",
        ])
        .unwrap();
        let Commands::SetLabels(args) = cli.command else {
            panic!("expected set-labels");
        };

        let (ids, values, types) = columns(&args);
        assert_eq!(ids, vec!["inc", "design"]);
        assert_eq!(values, vec![json!("yes"), json!(["RCT"])]);
        assert_eq!(types, vec!["boolean", "categorical"]);
        assert!(args.confirm);
        assert!(!args.change);
    }
}
