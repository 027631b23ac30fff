//! Search-level insights derived from a scored batch of listings.
//!
//! Everything here is computed from the listings themselves, so insights are
//! available even when AI analysis degraded for some or all listings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::matching::analyzer::ScoredListing;
use crate::models::job::{format_usd, CompanySize};
use crate::models::profile::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInsights {
    pub market_trends: MarketTrends,
    pub personalized: PersonalizedInsights,
    pub recommendations: Vec<String>,
    pub skill_development: Vec<String>,
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTrends {
    /// Most requested technologies across the batch, best five.
    pub hot_skills: Vec<SkillDemand>,
    pub salary: SalaryTrends,
    pub remote_share_pct: f64,
    pub company_size_distribution: Vec<SizeShare>,
    pub competitiveness: MarketTemperature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub listings: usize,
}

/// Salary statistics over listing midpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryTrends {
    pub average: u32,
    pub median: u32,
    pub min: u32,
    pub max: u32,
    /// Share of midpoints above $100,000.
    pub high_paying_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeShare {
    pub size: CompanySize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTemperature {
    HighlyFavorable,
    Favorable,
    Competitive,
    Challenging,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizedInsights {
    pub best_fit_companies: Vec<String>,
    pub skill_alignment: SkillAlignmentReport,
    pub progression_opportunities: usize,
    pub negotiation: NegotiationReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillAlignment {
    Excellent,
    Good,
    Developing,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillAlignmentReport {
    pub level: SkillAlignment,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationOutlook {
    High,
    Moderate,
    Limited,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationReport {
    pub level: NegotiationOutlook,
    pub summary: String,
}

/// Builds the full insight block for a scored, sorted batch. Returns `None`
/// for an empty batch, for which no statistic is defined.
pub fn build_search_insights(
    scored: &[ScoredListing],
    profile: &UserProfile,
) -> Option<SearchInsights> {
    if scored.is_empty() {
        return None;
    }

    let avg_match = average_match_score(scored);
    let remote_count = scored.iter().filter(|s| s.job.remote_friendly).count();

    Some(SearchInsights {
        market_trends: MarketTrends {
            hot_skills: most_common_skills(scored).into_iter().take(5).collect(),
            salary: salary_trends(scored),
            remote_share_pct: percentage(remote_count, scored.len()),
            company_size_distribution: size_distribution(scored),
            competitiveness: market_temperature(avg_match),
        },
        personalized: PersonalizedInsights {
            best_fit_companies: scored.iter().take(3).map(|s| s.job.company.clone()).collect(),
            skill_alignment: skill_alignment(scored, profile),
            progression_opportunities: progression_opportunities(scored),
            negotiation: negotiation_outlook(scored, profile.salary_expectation),
        },
        recommendations: market_recommendations(scored, profile),
        skill_development: skill_development(scored, profile),
        action_items: action_items(scored, profile),
    })
}

pub fn average_match_score(scored: &[ScoredListing]) -> f64 {
    if scored.is_empty() {
        return 0.0;
    }
    let total: u32 = scored.iter().map(|s| s.analysis.match_score as u32).sum();
    total as f64 / scored.len() as f64
}

fn percentage(count: usize, total: usize) -> f64 {
    (count as f64 / total as f64) * 100.0
}

/// Skills ranked by how many listings mention them. Ties break
/// alphabetically so the ranking is stable.
fn most_common_skills(scored: &[ScoredListing]) -> Vec<SkillDemand> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in scored {
        for skill in &entry.job.tech_stack {
            *counts.entry(skill.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<SkillDemand> = counts
        .into_iter()
        .map(|(skill, listings)| SkillDemand {
            skill: skill.to_string(),
            listings,
        })
        .collect();
    ranked.sort_by(|a, b| b.listings.cmp(&a.listings).then(a.skill.cmp(&b.skill)));
    ranked
}

fn salary_trends(scored: &[ScoredListing]) -> SalaryTrends {
    let mut midpoints: Vec<u32> = scored.iter().map(|s| s.job.salary_midpoint()).collect();
    midpoints.sort_unstable();

    let sum: u64 = midpoints.iter().map(|&m| m as u64).sum();
    let high = midpoints.iter().filter(|&&m| m > 100_000).count();

    SalaryTrends {
        average: (sum / midpoints.len() as u64) as u32,
        median: midpoints[midpoints.len() / 2],
        min: midpoints[0],
        max: midpoints[midpoints.len() - 1],
        high_paying_pct: percentage(high, midpoints.len()),
    }
}

fn size_distribution(scored: &[ScoredListing]) -> Vec<SizeShare> {
    let mut shares = Vec::new();
    for size in [CompanySize::Small, CompanySize::Medium, CompanySize::Large] {
        let count = scored.iter().filter(|s| s.job.company_profile.size == size).count();
        if count > 0 {
            shares.push(SizeShare {
                size,
                share_pct: percentage(count, scored.len()),
            });
        }
    }
    shares
}

fn market_temperature(avg_match: f64) -> MarketTemperature {
    if avg_match >= 80.0 {
        MarketTemperature::HighlyFavorable
    } else if avg_match >= 65.0 {
        MarketTemperature::Favorable
    } else if avg_match >= 50.0 {
        MarketTemperature::Competitive
    } else {
        MarketTemperature::Challenging
    }
}

/// Average of per-listing overlap ratios, skipping listings with no listed
/// stack. Missing data yields the unknown verdict rather than a guess.
fn skill_alignment(scored: &[ScoredListing], profile: &UserProfile) -> SkillAlignmentReport {
    let user_skills: Vec<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();

    let mut ratios = Vec::new();
    for entry in scored {
        if entry.job.tech_stack.is_empty() {
            continue;
        }
        let overlap = entry
            .job
            .tech_stack
            .iter()
            .filter(|tech| user_skills.contains(&tech.to_lowercase()))
            .count();
        ratios.push(overlap as f64 / entry.job.tech_stack.len() as f64);
    }

    if ratios.is_empty() {
        return SkillAlignmentReport {
            level: SkillAlignment::Unknown,
            summary: "Unable to assess - insufficient data".to_string(),
        };
    }

    let avg = ratios.iter().sum::<f64>() / ratios.len() as f64;
    let (level, summary) = if avg >= 0.7 {
        (
            SkillAlignment::Excellent,
            "Excellent - Strong skill alignment with most positions",
        )
    } else if avg >= 0.5 {
        (
            SkillAlignment::Good,
            "Good - Moderate skill alignment, some gaps to address",
        )
    } else {
        (
            SkillAlignment::Developing,
            "Developing - Significant skill development opportunities identified",
        )
    };

    SkillAlignmentReport {
        level,
        summary: summary.to_string(),
    }
}

const PROGRESSION_KEYWORDS: [&str; 6] =
    ["senior", "lead", "principal", "manager", "director", "architect"];

fn progression_opportunities(scored: &[ScoredListing]) -> usize {
    scored
        .iter()
        .filter(|s| {
            let title = s.job.title.to_lowercase();
            PROGRESSION_KEYWORDS.iter().any(|kw| title.contains(kw))
        })
        .count()
}

fn negotiation_outlook(scored: &[ScoredListing], expectation: u32) -> NegotiationReport {
    let above = scored.iter().filter(|s| s.job.salary_max > expectation).count();
    let pct = percentage(above, scored.len());

    let (level, summary) = if pct >= 70.0 {
        (
            NegotiationOutlook::High,
            "High - Most positions offer salary above expectations",
        )
    } else if pct >= 40.0 {
        (
            NegotiationOutlook::Moderate,
            "Moderate - Good negotiation opportunities available",
        )
    } else {
        (
            NegotiationOutlook::Limited,
            "Limited - Consider expanding search or adjusting expectations",
        )
    };

    NegotiationReport {
        level,
        summary: summary.to_string(),
    }
}

fn missing_top_skills(scored: &[ScoredListing], profile: &UserProfile, top: usize) -> Vec<String> {
    let user_skills: Vec<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();
    most_common_skills(scored)
        .into_iter()
        .take(top)
        .map(|d| d.skill)
        .filter(|skill| !user_skills.contains(&skill.to_lowercase()))
        .collect()
}

fn market_recommendations(scored: &[ScoredListing], profile: &UserProfile) -> Vec<String> {
    let mut recommendations = Vec::new();

    let expectation = profile.salary_expectation as f64;
    let avg_offered: f64 = scored
        .iter()
        .map(|s| s.job.salary_midpoint() as f64)
        .sum::<f64>()
        / scored.len() as f64;

    if avg_offered > expectation * 1.1 {
        recommendations.push(format!(
            "Market offers {} on average - consider raising salary expectations",
            format_usd(avg_offered as u32)
        ));
    } else if avg_offered < expectation * 0.9 {
        recommendations.push(format!(
            "Market average {} is below expectations - consider expanding search criteria",
            format_usd(avg_offered as u32)
        ));
    }

    let remote = scored.iter().filter(|s| s.job.remote_friendly).count();
    if remote as f64 > scored.len() as f64 * 0.6 {
        recommendations.push(
            "Strong remote work opportunities available - highlight remote work experience"
                .to_string(),
        );
    }

    let missing = missing_top_skills(scored, profile, 3);
    if !missing.is_empty() {
        recommendations.push(format!(
            "Consider learning {} - highly demanded in current market",
            missing.join(", ")
        ));
    }

    recommendations
}

/// Top technologies the searcher does not list yet, with demand counts.
fn skill_development(scored: &[ScoredListing], profile: &UserProfile) -> Vec<String> {
    let user_skills: Vec<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();

    most_common_skills(scored)
        .into_iter()
        .filter(|d| !user_skills.contains(&d.skill.to_lowercase()))
        .take(5)
        .map(|d| format!("{} (mentioned in {} job listings)", d.skill, d.listings))
        .collect()
}

pub fn action_items(scored: &[ScoredListing], profile: &UserProfile) -> Vec<String> {
    if scored.is_empty() {
        return vec![
            "Expand search criteria (location, experience level, or job titles)".to_string(),
            "Update and optimize your profile with additional skills".to_string(),
            "Consider entry-level positions to gain experience".to_string(),
            "Network with professionals in your target industry".to_string(),
        ];
    }

    let mut actions = Vec::new();

    let high_matches = scored.iter().filter(|s| s.analysis.match_score >= 80).count();
    if high_matches > 0 {
        actions.push(format!(
            "Apply immediately to {high_matches} high-match positions (80%+ match)"
        ));
    }

    let missing = missing_top_skills(scored, profile, 3);
    if !missing.is_empty() {
        actions.push(format!(
            "Develop skills in {} to increase competitiveness",
            missing.join(", ")
        ));
    }

    let mut research_targets = Vec::new();
    for entry in scored.iter().take(10) {
        if !research_targets.contains(&entry.job.company) {
            research_targets.push(entry.job.company.clone());
        }
        if research_targets.len() == 3 {
            break;
        }
    }
    actions.push(format!(
        "Research and network with employees at {}",
        research_targets.join(", ")
    ));

    actions.push("Customize resume and cover letter for each high-match position".to_string());

    if scored.iter().any(|s| s.analysis.match_score >= 70) {
        actions.push(
            "Prepare for technical interviews focusing on your strongest skill areas".to_string(),
        );
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::analyzer::MatchReport;
    use crate::matching::scoring::{
        CultureFit, NegotiationPotential, ProgressionFit, ProgressionTrack, SalaryAssessment,
        SalaryFit,
    };
    use crate::models::job::{CompanyProfile, JobListing, JobType};
    use chrono::Utc;

    fn make_scored(
        company: &str,
        score: u8,
        midpoint_band: (u32, u32),
        remote: bool,
        stack: &[&str],
    ) -> ScoredListing {
        let job = JobListing {
            id: format!("test_{company}"),
            title: "Software Engineer".to_string(),
            company: company.to_string(),
            company_profile: CompanyProfile {
                size: CompanySize::Medium,
                industry: "Technology".to_string(),
                rating: 4.0,
            },
            salary_min: midpoint_band.0,
            salary_max: midpoint_band.1,
            location: "Remote".to_string(),
            tech_stack: stack.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
            posted_at: Utc::now(),
            source: "indeed".to_string(),
            job_type: JobType::FullTime,
            remote_friendly: remote,
            visa_sponsorship: false,
            equity_offered: false,
            benefits: vec![],
        };
        ScoredListing {
            analysis: MatchReport {
                match_score: score,
                match_reasons: vec![],
                skill_gaps: vec![],
                growth_potential: String::new(),
                recommendations: vec![],
                degraded: false,
            },
            salary_analysis: SalaryFit {
                assessment: SalaryAssessment::Good,
                message: String::new(),
                negotiation_potential: NegotiationPotential::Medium,
            },
            culture_fit: CultureFit {
                score: 70,
                company_size_fit: true,
                work_style_fit: true,
                industry_alignment: false,
            },
            career_progression: ProgressionFit {
                score: 60,
                track: ProgressionTrack::SkillDevelopment,
                growth_path: String::new(),
                mentorship_available: true,
                learning_budget: false,
            },
            urgency_score: 50,
            competitiveness_score: 50,
            job,
        }
    }

    fn make_profile(skills: &[&str], expectation: u32) -> UserProfile {
        let skills: Vec<String> = skills.iter().map(|s| s.to_string()).collect();
        serde_json::from_value(serde_json::json!({
            "user_id": "u-1",
            "skills": skills,
            "salary_expectation": expectation,
        }))
        .expect("profile should deserialize")
    }

    #[test]
    fn test_empty_batch_yields_no_insights() {
        assert!(build_search_insights(&[], &make_profile(&[], 75_000)).is_none());
    }

    #[test]
    fn test_market_temperature_tiers() {
        assert_eq!(market_temperature(80.0), MarketTemperature::HighlyFavorable);
        assert_eq!(market_temperature(79.9), MarketTemperature::Favorable);
        assert_eq!(market_temperature(65.0), MarketTemperature::Favorable);
        assert_eq!(market_temperature(64.9), MarketTemperature::Competitive);
        assert_eq!(market_temperature(50.0), MarketTemperature::Competitive);
        assert_eq!(market_temperature(49.9), MarketTemperature::Challenging);
    }

    #[test]
    fn test_hot_skills_ranked_by_demand() {
        let scored = vec![
            make_scored("A", 80, (80_000, 100_000), false, &["Python", "AWS"]),
            make_scored("B", 70, (80_000, 100_000), false, &["Python", "React"]),
            make_scored("C", 60, (80_000, 100_000), false, &["Python"]),
        ];
        let ranked = most_common_skills(&scored);
        assert_eq!(ranked[0].skill, "Python");
        assert_eq!(ranked[0].listings, 3);
        // AWS and React tie at one listing each, alphabetical order breaks it.
        assert_eq!(ranked[1].skill, "AWS");
        assert_eq!(ranked[2].skill, "React");
    }

    #[test]
    fn test_salary_trends_over_midpoints() {
        let scored = vec![
            make_scored("A", 80, (80_000, 100_000), false, &[]), // midpoint 90k
            make_scored("B", 70, (100_000, 120_000), false, &[]), // midpoint 110k
            make_scored("C", 60, (60_000, 80_000), false, &[]),  // midpoint 70k
        ];
        let trends = salary_trends(&scored);
        assert_eq!(trends.average, 90_000);
        assert_eq!(trends.median, 90_000);
        assert_eq!(trends.min, 70_000);
        assert_eq!(trends.max, 110_000);
        // One of three midpoints clears 100k.
        assert!((trends.high_paying_pct - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_skill_alignment_thresholds() {
        let profile = make_profile(&["Python", "AWS"], 75_000);

        let strong = vec![make_scored("A", 80, (80_000, 100_000), false, &["Python", "AWS"])];
        assert_eq!(skill_alignment(&strong, &profile).level, SkillAlignment::Excellent);

        let half = vec![make_scored("A", 80, (80_000, 100_000), false, &["Python", "Go"])];
        assert_eq!(skill_alignment(&half, &profile).level, SkillAlignment::Good);

        let weak = vec![make_scored("A", 80, (80_000, 100_000), false, &["Go", "Rust", "C"])];
        assert_eq!(skill_alignment(&weak, &profile).level, SkillAlignment::Developing);

        let no_data = vec![make_scored("A", 80, (80_000, 100_000), false, &[])];
        assert_eq!(skill_alignment(&no_data, &profile).level, SkillAlignment::Unknown);
    }

    #[test]
    fn test_negotiation_outlook_thresholds() {
        let profile_expectation = 95_000;
        // Both listings top out above expectation.
        let high = vec![
            make_scored("A", 80, (80_000, 120_000), false, &[]),
            make_scored("B", 70, (80_000, 110_000), false, &[]),
        ];
        assert_eq!(
            negotiation_outlook(&high, profile_expectation).level,
            NegotiationOutlook::High
        );

        // One of two, 50%.
        let moderate = vec![
            make_scored("A", 80, (80_000, 120_000), false, &[]),
            make_scored("B", 70, (60_000, 90_000), false, &[]),
        ];
        assert_eq!(
            negotiation_outlook(&moderate, profile_expectation).level,
            NegotiationOutlook::Moderate
        );

        let limited = vec![
            make_scored("A", 80, (60_000, 90_000), false, &[]),
            make_scored("B", 70, (60_000, 85_000), false, &[]),
            make_scored("C", 60, (60_000, 80_000), false, &[]),
        ];
        assert_eq!(
            negotiation_outlook(&limited, profile_expectation).level,
            NegotiationOutlook::Limited
        );
    }

    #[test]
    fn test_recommendations_flag_rich_market_and_missing_skills() {
        let profile = make_profile(&["Python"], 75_000);
        let scored = vec![
            make_scored("A", 80, (90_000, 110_000), true, &["Python", "Kubernetes"]),
            make_scored("B", 70, (90_000, 110_000), true, &["Kubernetes", "Go"]),
        ];
        let recs = market_recommendations(&scored, &profile);
        // Average midpoint 100k > 75k * 1.1, both listings remote.
        assert!(recs.iter().any(|r| r.contains("raising salary expectations")));
        assert!(recs.iter().any(|r| r.contains("remote work experience")));
        assert!(recs.iter().any(|r| r.contains("Kubernetes")));
    }

    #[test]
    fn test_action_items_for_results() {
        let profile = make_profile(&["Python"], 75_000);
        let scored = vec![
            make_scored("Acme", 85, (80_000, 100_000), false, &["Python", "Go"]),
            make_scored("Beta", 72, (80_000, 100_000), false, &["Python"]),
        ];
        let actions = action_items(&scored, &profile);
        assert!(actions.iter().any(|a| a.contains("Apply immediately to 1")));
        assert!(actions.iter().any(|a| a.contains("Go")));
        assert!(actions.iter().any(|a| a.contains("Acme")));
        assert!(actions.iter().any(|a| a.contains("technical interviews")));
    }

    #[test]
    fn test_action_items_for_empty_results() {
        let actions = action_items(&[], &make_profile(&[], 75_000));
        assert_eq!(actions.len(), 4);
        assert!(actions[0].contains("Expand search criteria"));
    }

    #[test]
    fn test_full_insights_assembly() {
        let profile = make_profile(&["Python"], 75_000);
        let scored = vec![
            make_scored("Acme", 85, (80_000, 100_000), true, &["Python", "Go"]),
            make_scored("Beta", 65, (80_000, 100_000), false, &["Python"]),
        ];
        let insights = build_search_insights(&scored, &profile).expect("insights for results");
        assert_eq!(insights.market_trends.competitiveness, MarketTemperature::Favorable);
        assert_eq!(insights.personalized.best_fit_companies, vec!["Acme", "Beta"]);
        assert_eq!(insights.personalized.progression_opportunities, 0);
        assert_eq!(insights.market_trends.company_size_distribution.len(), 1);
        assert!((insights.market_trends.remote_share_pct - 50.0).abs() < f64::EPSILON);
        assert!(!insights.skill_development.is_empty());
    }
}
