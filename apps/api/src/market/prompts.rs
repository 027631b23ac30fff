//! Prompt template and snapshot summary for the market commentary call.

use crate::market::snapshot::MarketSnapshot;
use crate::models::job::format_usd;

/// System persona for the market commentary call.
pub const MARKET_ANALYST_PERSONA: &str = "You are a labor market analyst who turns hiring data into clear, practical guidance for job seekers.";

/// Template for the commentary call. Replace `{snapshot}` before sending.
pub const MARKET_PROMPT_TEMPLATE: &str = r#"MARKET SNAPSHOT:
{snapshot}

Interpret this snapshot for a candidate at the stated experience level. Provide your commentary in the following JSON format:
{
    "outlook_summary": "<2-3 sentence read on where this market is heading>",
    "opportunities": [<3-5 openings or niches worth pursuing>],
    "risks": [<2-4 risks that could cool this market>],
    "advice": [<3-5 actionable recommendations for the candidate>]
}

Respond with ONLY the JSON object, no additional text."#;

pub fn build_market_prompt(snapshot: &MarketSnapshot) -> String {
    MARKET_PROMPT_TEMPLATE.replace("{snapshot}", &snapshot_summary(snapshot))
}

/// Renders the snapshot figures the model should reason over.
pub fn snapshot_summary(snapshot: &MarketSnapshot) -> String {
    [
        format!("- Domain: {}", snapshot.domain),
        format!("- Location: {}", snapshot.location),
        format!("- Experience Level: {}", snapshot.experience_level.as_str()),
        format!("- Open Positions: {}", snapshot.openings.total_openings),
        format!(
            "- New Postings (30 days): {}",
            snapshot.openings.new_postings_30d
        ),
        format!(
            "- Average Time To Fill: {} days",
            snapshot.openings.average_time_to_fill_days
        ),
        format!("- Projected Growth: {}%", snapshot.openings.growth_rate_pct),
        format!("- Demand Index: {}/100", snapshot.openings.demand_index),
        format!(
            "- Market Competitiveness: {}",
            snapshot.openings.competitiveness.as_str()
        ),
        format!("- Median Salary: {}", format_usd(snapshot.salary.band.median)),
        format!(
            "- Salary Range: {} - {}",
            format_usd(snapshot.salary.band.min),
            format_usd(snapshot.salary.band.max)
        ),
        format!("- Competition Level: {}", snapshot.competition_level.as_str()),
        format!("- Top Employers: {}", snapshot.top_employers.join(", ")),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::snapshot::build_snapshot;
    use crate::models::profile::ExperienceLevel;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_market_prompt_fills_placeholder() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let snapshot = build_snapshot("software engineer", "remote", ExperienceLevel::Mid, now);
        let prompt = build_market_prompt(&snapshot);
        assert!(!prompt.contains("{snapshot}"));
        assert!(prompt.contains("- Domain: software engineer"));
        assert!(prompt.contains(r#""outlook_summary""#));
    }

    #[test]
    fn test_snapshot_summary_renders_key_figures() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let snapshot = build_snapshot("software engineer", "remote", ExperienceLevel::Mid, now);
        let summary = snapshot_summary(&snapshot);
        assert!(summary.contains("- Open Positions: 30000"));
        assert!(summary.contains("- Median Salary: $126,500"));
        assert!(summary.contains("- Top Employers: Google, Microsoft, Amazon, Meta, Apple"));
    }
}
