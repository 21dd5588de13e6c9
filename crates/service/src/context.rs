//! Static context and shortcut tables.
//!
//! Immutable configuration loaded once at startup: the report-type →
//! system-context map and the shortcut-label → literal-query map. Shortcut
//! queries are opaque natural-language instructions passed through verbatim;
//! nothing here interprets them.

use std::collections::HashMap;
use std::sync::LazyLock;

use tablechat_core::ReportType;

/// Fallback context for `Others`, `Bpo`, and anything without a dedicated
/// entry.
pub const GENERAL_CONTEXT: &str = "You are a data analysis assistant. Answer questions about \
     the provided tabular data accurately and concisely. When the answer is tabular, reply \
     with a JSON object of the form {\"columns\": [...], \"rows\": [[...], ...]}; otherwise \
     reply in plain text.";

const ALLOCATION_CONTEXT: &str = "You are analyzing a resource allocation report. The data \
     describes employee assignments with columns such as region, account, grade, onsite/offshore \
     status, and allocation percentages. Answer questions about utilization, ratios, and \
     headcount from the provided rows only. When the answer is tabular, reply with a JSON \
     object of the form {\"columns\": [...], \"rows\": [[...], ...]}; otherwise reply in plain \
     text.";

const PERFORMANCE_CONTEXT: &str = "You are analyzing a performance report. The data describes \
     per-employee or per-team performance measures across reporting periods. Answer questions \
     about trends, ratings, and comparisons from the provided rows only. When the answer is \
     tabular, reply with a JSON object of the form {\"columns\": [...], \"rows\": [[...], ...]}; \
     otherwise reply in plain text.";

static REPORT_CONTEXTS: LazyLock<HashMap<ReportType, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (ReportType::Allocation, ALLOCATION_CONTEXT),
        (ReportType::Performance, PERFORMANCE_CONTEXT),
        (ReportType::Others, GENERAL_CONTEXT),
    ])
});

/// Shortcut label → literal query, in display order. The queries go to the
/// collaborator verbatim.
const QUERY_SHORTCUTS: &[(&str, &str)] = &[
    ("Calculate Utilization %", "What is the utilization percentage?"),
    ("Onsite/Offshore Ratio", "What is the ratio of onsite to offshore employees?"),
    ("Grade Mix Ratio", "What is the ratio of employees across grades?"),
    ("Senior/Junior Grade Ratio", "What is the ratio of senior grade to junior grade employees?"),
];

static SHORTCUT_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| QUERY_SHORTCUTS.iter().copied().collect());

/// System context string for a report type. Types without a dedicated
/// context (`Bpo` included) resolve to [`GENERAL_CONTEXT`].
#[must_use]
pub fn context_for(report_type: ReportType) -> &'static str {
    REPORT_CONTEXTS.get(&report_type).copied().unwrap_or(GENERAL_CONTEXT)
}

/// Shortcut labels in display order.
#[must_use]
pub fn shortcut_labels() -> Vec<&'static str> {
    QUERY_SHORTCUTS.iter().map(|(label, _)| *label).collect()
}

/// The literal query behind a shortcut label, if the label exists.
#[must_use]
pub fn shortcut_query(label: &str) -> Option<&'static str> {
    SHORTCUT_MAP.get(label).copied()
}
