//! Terminal rendering of session state.
//!
//! Every function returns the text instead of printing it so the REPL
//! decides where output goes.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};
use colored::*;

use crate::config::REGISTRY_FALLBACK_LABEL;
use crate::intel::LookupResult;
use crate::session::{HistoryEntry, SessionState};

const LABEL_WIDTH: usize = 14;

fn push_item(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "    {:<LABEL_WIDTH$} {}", label.dimmed(), value);
    }
}

fn push_section(out: &mut String, title: &str, items: &[(&str, Option<&str>)]) {
    if items.iter().all(|(_, v)| v.is_none()) {
        return;
    }
    let _ = writeln!(out, "  {}", title.bold());
    for (label, value) in items {
        push_item(out, label, *value);
    }
}

/// Renders one lookup result as a card.
///
/// Absent fields are skipped, except the registry which falls back to a
/// fixed label. Sources are listed only when there are any.
pub fn render_result(result: &LookupResult) -> String {
    let mut out = String::new();
    let info = &result.network_info;
    let geo = &result.geography;
    let contacts = &result.contacts;

    let _ = writeln!(out, "{} {}", "Lookup Target".dimmed(), result.ip.blue().bold());
    if !result.summary.is_empty() {
        let _ = writeln!(out, "  {}", result.summary.italic());
    }
    let _ = writeln!(out);

    push_section(
        &mut out,
        "Network Assignment",
        &[
            ("Organization", info.organization.as_deref()),
            ("NetName", info.name.as_deref()),
            ("CIDR Block", info.cidr.as_deref()),
            ("Status", info.status.as_deref()),
        ],
    );
    push_section(
        &mut out,
        "Geolocation",
        &[
            ("Country", geo.country.as_deref()),
            ("City / Region", geo.city.as_deref()),
            ("Coordinates", geo.coordinates.as_deref()),
        ],
    );
    push_section(
        &mut out,
        "Administrative Contacts",
        &[
            ("Abuse Contact", contacts.abuse.as_deref()),
            ("Admin Contact", contacts.admin.as_deref()),
        ],
    );
    push_section(
        &mut out,
        "Registry Status",
        &[
            (
                "Registry",
                Some(info.registry.as_deref().unwrap_or(REGISTRY_FALLBACK_LABEL)),
            ),
            ("IP Range", info.net_range.as_deref()),
        ],
    );

    if !result.sources.is_empty() {
        let _ = writeln!(out, "  {}", "Verification Sources".bold());
        for source in &result.sources {
            let _ = writeln!(out, "    - {} <{}>", source.title, source.uri.underline());
        }
    }

    out
}

/// Renders the error banner (if any) followed by the current result.
pub fn render_state(state: &SessionState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        let _ = writeln!(out, "{} {}", "!".red().bold(), error.red());
    }
    if state.loading {
        let _ = writeln!(out, "{}", "Querying global registries...".yellow());
    }
    if let Some(result) = &state.result {
        if !out.is_empty() {
            let _ = writeln!(out);
        }
        out.push_str(&render_result(result));
    }

    out
}

/// Local `HH:MM` for an epoch-millisecond timestamp.
pub fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Renders the history list, numbered from 1 for `:N` selection.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", "Your search history will appear here.".dimmed());
    }

    let mut out = format!("{}\n", "Recent Inquiries".bold());
    for (idx, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<39} {}",
            idx + 1,
            entry.ip,
            format_time(entry.timestamp).dimmed()
        );
    }
    out
}
