use std::path::{Path, PathBuf};

use anyhow::Context as _;

use calc_history::config::AppConfig;
use calc_history::history::{self, LogEntry};
use calc_history::query::{FilterSpec, HistoryView, SortSpec};
use calc_history::remote::{client, http};

pub struct HistoryArgs {
    pub operation: String,
    pub date: String,
    pub sort: SortSpec,
    pub file: Option<PathBuf>,
    pub json: bool,
}

/// Read a saved history payload, or fetch a fresh snapshot from the service.
fn load_snapshot(file: Option<&Path>, config: &AppConfig) -> anyhow::Result<Vec<LogEntry>> {
    if let Some(path) = file {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
        return history::parse_history_payload(&body)
            .with_context(|| format!("failed to parse snapshot: {}", path.display()));
    }
    let http_client = http::build_client(config.timeout_secs)?;
    client::fetch_history(&http_client, config.base_url())
}

pub fn cmd_history(args: &HistoryArgs, config: &AppConfig) -> anyhow::Result<i32> {
    let snapshot = load_snapshot(args.file.as_deref(), config)?;
    let filter = FilterSpec::new(&args.operation, args.date.as_str());
    let view = HistoryView::new(snapshot, filter, args.sort);

    if args.json {
        let rendered = serde_json::to_string_pretty(view.entries())
            .context("failed to serialize history view")?;
        println!("{rendered}");
        return Ok(0);
    }

    if view.entries().is_empty() {
        eprintln!("[calc-history] no operations in history");
        return Ok(0);
    }

    for entry in view.entries() {
        let date = entry.date.as_deref().unwrap_or("-");
        println!(
            "{date:<16}  {}  [{}]",
            history::operation_text(entry),
            history::operation_label(entry)
        );
    }
    Ok(0)
}
