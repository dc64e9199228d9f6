use std::sync::OnceLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use sysrev_sync::SyncProgress;

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

static MULTI_PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

fn multi_progress() -> &'static MultiProgress {
    MULTI_PROGRESS.get_or_init(MultiProgress::new)
}

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = multi_progress().add(ProgressBar::new_spinner());
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Switch to a bounded bar of `total` steps.
    pub fn set_total(&self, total: u64) {
        if let Some(bar) = &self.bar {
            bar.disable_steady_tick();
            bar.set_style(
                ProgressStyle::with_template(bar_template())
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar.set_length(total);
            bar.set_position(0);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn set_position(&self, pos: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(pos);
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }

    /// Render one sync event.
    pub fn on_sync(&self, event: &SyncProgress) {
        match event {
            SyncProgress::Started { project_id } => {
                self.set_message(&format!("project {project_id}: fetching project info"));
            }
            SyncProgress::ProjectInfo { expected } => {
                self.set_message(&format!("~{expected} articles reported"));
            }
            SyncProgress::Labels { count } => self.set_message(&format!("{count} labels")),
            SyncProgress::ArticlePage { offset, fetched } => {
                self.set_message(&format!("listed {} articles", offset + *fetched as u64));
            }
            SyncProgress::ArticleDetail {
                article_id,
                done,
                expected,
            } => {
                if *done == 1 {
                    self.set_total(*expected as u64);
                }
                self.set_position(*done as u64);
                self.set_message(&format!("article {article_id}"));
            }
            SyncProgress::TableWritten { table, rows } => {
                self.set_message(&format!("wrote {table} ({rows} rows)"));
            }
            SyncProgress::TableSkipped { table } => {
                self.set_message(&format!("kept {table} (no rows)"));
            }
            SyncProgress::Finished { report } => self.finish_ok(&format!(
                "synced {} articles, {} judgments",
                report.articles, report.judgments
            )),
        }
    }
}
