//! End-of-session statistics.

use log::info;

use crate::error_handling::LookupStats;

/// Logs a one-line summary followed by failure counts per category.
pub fn print_lookup_statistics(stats: &LookupStats) {
    let successes = stats.successes();
    let failures = stats.total_failures();
    let total = successes + failures;

    info!(
        "Performed {} lookup{} ({} succeeded, {} failed)",
        total,
        if total == 1 { "" } else { "s" },
        successes,
        failures
    );

    if failures > 0 {
        info!("Failure Counts ({} total):", failures);
        for (kind, count) in stats.failure_breakdown() {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}
