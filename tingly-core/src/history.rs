//! Derived views over the administrative action history.
//!
//! The backend owns the history; this module only summarizes, filters, and
//! exports what `GET /api/history` returned.

use chrono::Local;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::HistoryEntry;

// =============================================================================
// Statistics
// =============================================================================

/// Aggregate counters over a set of history entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Entries whose timestamp falls on the local calendar date.
    pub today: usize,
    /// Entry count per action name.
    pub by_action: BTreeMap<String, usize>,
}

impl HistoryStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let today = Local::now().date_naive();
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            if entry.success {
                stats.succeeded += 1;
            } else {
                stats.failed += 1;
            }
            if entry.timestamp.with_timezone(&Local).date_naive() == today {
                stats.today += 1;
            }
            *stats.by_action.entry(entry.action.clone()).or_default() += 1;
        }

        stats
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Client-side narrowing of the fetched history.
///
/// All criteria must match; unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Case-insensitive substring matched against action OR message.
    pub search: Option<String>,
    /// Exact action name.
    pub action: Option<String>,
    /// Success status.
    pub status: Option<bool>,
}

impl HistoryFilter {
    /// Entries surviving the filter, in source order.
    pub fn apply<'a>(&self, entries: &'a [HistoryEntry]) -> Vec<&'a HistoryEntry> {
        let search = self
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        entries
            .iter()
            .filter(|entry| {
                if let Some(term) = &search {
                    if !entry.action.to_lowercase().contains(term)
                        && !entry.message.to_lowercase().contains(term)
                    {
                        return false;
                    }
                }
                if let Some(action) = &self.action {
                    if &entry.action != action {
                        return false;
                    }
                }
                if let Some(status) = self.status {
                    if entry.success != status {
                        return false;
                    }
                }
                true
            })
            .collect()
    }
}

// =============================================================================
// Display helpers
// =============================================================================

/// Title-case an action name: `fetch_models` -> `Fetch Models`.
pub fn format_action(action: &str) -> String {
    action
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flatten an entry's details for one-line display.
pub fn format_details(details: Option<&Value>) -> String {
    match details {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}: {s}"),
                other => format!("{k}: {other}"),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

// =============================================================================
// Export
// =============================================================================

/// Export entries as a pretty-printed JSON array.
pub fn export_json(entries: &[&HistoryEntry]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Export entries as CSV with a fixed header row.
///
/// Message and details are quoted, embedded quotes doubled.
pub fn export_csv(entries: &[&HistoryEntry]) -> String {
    let mut lines = vec!["Timestamp,Action,Success,Message,Details".to_string()];
    for entry in entries {
        lines.push(format!(
            "{},{},{},\"{}\",\"{}\"",
            entry.timestamp.to_rfc3339(),
            entry.action,
            entry.success,
            entry.message.replace('"', "\"\""),
            format_details(entry.details.as_ref()).replace('"', "\"\""),
        ));
    }
    lines.join("\n")
}

/// Export entries as human-readable lines.
pub fn export_text(entries: &[&HistoryEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "[{}] {} {}: {}",
                entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
                if entry.success { "✅" } else { "❌" },
                entry.action,
                entry.message,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Tests
// =============================================================================
