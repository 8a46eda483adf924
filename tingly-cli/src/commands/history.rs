//! `history` - administrative action history with stats, filters, and export.

use anyhow::Result;
use std::time::Duration;

use tingly_core::history::{export_csv, export_json, export_text, format_action};
use tingly_core::{HistoryEntry, HistoryFilter, HistoryStats};

use super::{expect_data, Context};
use crate::cli::{ExportFormat, OutcomeFilter};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    ctx: &Context,
    limit: Option<usize>,
    search: Option<String>,
    action: Option<String>,
    status: Option<OutcomeFilter>,
    export: Option<ExportFormat>,
    watch: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(ctx.settings.history_limit);
    let filter = HistoryFilter {
        search,
        action,
        status: status.map(|s| matches!(s, OutcomeFilter::Success)),
    };

    if !watch {
        let entries = expect_data(ctx.client.history(Some(limit)).await, "history")?;
        render(&entries, &filter, export)?;
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(ctx.settings.history_refresh_secs));
    loop {
        ticker.tick().await;
        let response = ctx.client.history(Some(limit)).await;
        if response.success {
            render(&response.data.unwrap_or_default(), &filter, export)?;
            println!();
        } else {
            eprintln!(
                "history failed: {}",
                response.error_text().unwrap_or("unknown error")
            );
        }
    }
}

fn render(
    entries: &[HistoryEntry],
    filter: &HistoryFilter,
    export: Option<ExportFormat>,
) -> Result<()> {
    let filtered = filter.apply(entries);

    match export {
        Some(ExportFormat::Json) => {
            println!("{}", export_json(&filtered)?);
            return Ok(());
        }
        Some(ExportFormat::Csv) => {
            println!("{}", export_csv(&filtered));
            return Ok(());
        }
        Some(ExportFormat::Text) => {
            println!("{}", export_text(&filtered));
            return Ok(());
        }
        None => {}
    }

    let stats = HistoryStats::from_entries(entries);
    println!(
        "{} entries ({} ok, {} failed, {} today), showing {}",
        stats.total,
        stats.succeeded,
        stats.failed,
        stats.today,
        filtered.len(),
    );

    for entry in filtered {
        println!(
            "[{}] {} {}: {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            if entry.success { "✅" } else { "❌" },
            format_action(&entry.action),
            entry.message,
        );
    }
    Ok(())
}
