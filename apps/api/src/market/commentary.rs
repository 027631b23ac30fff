//! AI commentary over a market snapshot, with a deterministic fallback
//! assembled from the snapshot figures themselves.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::market::prompts::{build_market_prompt, MARKET_ANALYST_PERSONA};
use crate::market::snapshot::{CompetitionLevel, MarketSnapshot};
use crate::models::job::format_usd;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketCommentary {
    pub outlook_summary: String,
    pub opportunities: Vec<String>,
    pub risks: Vec<String>,
    pub advice: Vec<String>,
    /// 75-100. Grows with market size and demand.
    pub confidence_score: u8,
    /// True when the model was unavailable and the canned commentary is used.
    #[serde(default)]
    pub degraded: bool,
}

/// Reply shape requested from the model. Fields the model omits are filled
/// from the fallback during sanitize.
#[derive(Debug, Deserialize)]
struct RawCommentaryReply {
    outlook_summary: Option<String>,
    #[serde(default)]
    opportunities: Vec<String>,
    #[serde(default)]
    risks: Vec<String>,
    #[serde(default)]
    advice: Vec<String>,
}

impl RawCommentaryReply {
    fn sanitize(self, snapshot: &MarketSnapshot, confidence: u8) -> MarketCommentary {
        let fallback = fallback_commentary(snapshot, confidence);
        MarketCommentary {
            outlook_summary: self
                .outlook_summary
                .filter(|summary| !summary.trim().is_empty())
                .unwrap_or(fallback.outlook_summary),
            opportunities: non_empty_or(self.opportunities, fallback.opportunities),
            risks: non_empty_or(self.risks, fallback.risks),
            advice: non_empty_or(self.advice, fallback.advice),
            confidence_score: confidence,
            degraded: false,
        }
    }
}

fn non_empty_or(values: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        fallback
    } else {
        values
    }
}

/// Confidence in the snapshot figures. Larger, hotter markets carry more
/// signal, so commentary over them is trusted further.
pub fn confidence_score(snapshot: &MarketSnapshot) -> u8 {
    let mut score: u8 = 75;
    if snapshot.openings.total_openings > 5_000 {
        score += 10;
    }
    if snapshot.openings.demand_index > 70 {
        score += 10;
    }
    if snapshot.salary.band.median > 70_000 {
        score += 5;
    }
    score.min(100)
}

/// Asks the model to interpret the snapshot. Never errors: transport or
/// parse failures degrade to the snapshot-derived fallback.
pub async fn generate_commentary(llm: &LlmClient, snapshot: &MarketSnapshot) -> MarketCommentary {
    let confidence = confidence_score(snapshot);
    let prompt = build_market_prompt(snapshot);
    let system = json_system(MARKET_ANALYST_PERSONA);

    match llm.call_json::<RawCommentaryReply>(&prompt, &system).await {
        Ok(reply) => reply.sanitize(snapshot, confidence),
        Err(err) => {
            warn!(
                "Market commentary for {} in {} failed: {}",
                snapshot.domain, snapshot.location, err
            );
            fallback_commentary(snapshot, confidence)
        }
    }
}

fn fallback_commentary(snapshot: &MarketSnapshot, confidence: u8) -> MarketCommentary {
    let outlook_summary = format!(
        "The {} market in {} lists {} open positions with {}% projected growth. Demand for skilled candidates is expected to continue.",
        snapshot.domain,
        snapshot.location,
        snapshot.openings.total_openings,
        snapshot.openings.growth_rate_pct
    );

    let competition_advice = match snapshot.competition_level {
        CompetitionLevel::High => "Stand out with portfolio projects, referrals, and tailored applications",
        CompetitionLevel::Moderate => "Lead applications with measurable impact from recent roles",
        CompetitionLevel::Low => "Use your seniority to negotiate beyond the posted band",
    };

    MarketCommentary {
        outlook_summary,
        opportunities: vec![
            "Remote work positions".to_string(),
            "Emerging technology roles".to_string(),
            "Leadership positions".to_string(),
        ],
        risks: vec![
            "Economic uncertainty".to_string(),
            "Automation impact".to_string(),
            "Market saturation".to_string(),
        ],
        advice: vec![
            format!(
                "Research offers around the {} median before negotiating",
                format_usd(snapshot.salary.band.median)
            ),
            competition_advice.to_string(),
            "Invest in skills the market is short on".to_string(),
        ],
        confidence_score: confidence,
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::snapshot::{
        MarketCompetitiveness, OpeningsOutlook, SalaryBand, SalaryOutlook, TotalCompensation,
    };
    use crate::models::profile::ExperienceLevel;
    use chrono::{TimeZone, Utc};

    fn make_snapshot(total_openings: u32, demand_index: u32, median: u32) -> MarketSnapshot {
        MarketSnapshot {
            domain: "software engineer".to_string(),
            location: "united states".to_string(),
            experience_level: ExperienceLevel::Mid,
            generated_at: Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap(),
            openings: OpeningsOutlook {
                total_openings,
                new_postings_30d: total_openings / 4,
                average_time_to_fill_days: 30,
                growth_rate_pct: 12,
                demand_index,
                competitiveness: MarketCompetitiveness::Competitive,
            },
            salary: SalaryOutlook {
                band: SalaryBand {
                    min: median * 8 / 10,
                    p25: median * 9 / 10,
                    median,
                    p75: median * 115 / 100,
                    max: median * 13 / 10,
                },
                total_compensation: TotalCompensation {
                    base_salary: median,
                    estimated_bonus: median * 15 / 100,
                    equity_value: median / 10,
                    benefits_value: median / 5,
                    total: median + median * 15 / 100 + median / 10 + median / 5,
                },
            },
            competition_level: CompetitionLevel::Moderate,
            top_employers: vec!["Google".to_string()],
        }
    }

    #[test]
    fn test_confidence_rewards_market_strength() {
        assert_eq!(confidence_score(&make_snapshot(4_000, 70, 70_000)), 75);
        assert_eq!(confidence_score(&make_snapshot(15_000, 70, 70_000)), 85);
        assert_eq!(confidence_score(&make_snapshot(15_000, 85, 70_000)), 95);
        assert_eq!(confidence_score(&make_snapshot(15_000, 85, 110_000)), 100);
    }

    #[test]
    fn test_sanitize_fills_blank_fields_from_fallback() {
        let snapshot = make_snapshot(15_000, 85, 110_000);
        let reply = RawCommentaryReply {
            outlook_summary: Some("Strong hiring across the board.".to_string()),
            opportunities: vec!["Platform engineering".to_string()],
            risks: Vec::new(),
            advice: Vec::new(),
        };
        let commentary = reply.sanitize(&snapshot, 90);
        assert_eq!(commentary.outlook_summary, "Strong hiring across the board.");
        assert_eq!(commentary.opportunities, vec!["Platform engineering"]);
        assert_eq!(commentary.risks[0], "Economic uncertainty");
        assert!(!commentary.degraded);
        assert_eq!(commentary.confidence_score, 90);
    }

    #[test]
    fn test_sanitize_replaces_whitespace_summary() {
        let snapshot = make_snapshot(15_000, 85, 110_000);
        let reply = RawCommentaryReply {
            outlook_summary: Some("   ".to_string()),
            opportunities: Vec::new(),
            risks: Vec::new(),
            advice: Vec::new(),
        };
        let commentary = reply.sanitize(&snapshot, 90);
        assert!(commentary.outlook_summary.contains("software engineer"));
    }

    #[test]
    fn test_fallback_derives_from_snapshot() {
        let snapshot = make_snapshot(15_000, 85, 110_000);
        let commentary = fallback_commentary(&snapshot, 100);
        assert!(commentary.outlook_summary.contains("software engineer"));
        assert!(commentary.outlook_summary.contains("15000 open positions"));
        assert!(commentary.advice[0].contains("$110,000"));
        assert!(commentary.degraded);
        assert_eq!(commentary.confidence_score, 100);
    }
}
