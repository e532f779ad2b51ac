//! JSON output for API consumption.
//!
//! The report is serialized as pretty-printed JSON with camelCase field names
//! (`weekStart`, `topTrends`, `mustReadArticles`, ...), nested articles and
//! topics included.

use crate::models::TrendReport;

pub fn render(report: &TrendReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
