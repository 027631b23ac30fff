//! Deterministic listing heuristics.
//!
//! Every function here is a pure score over a listing and, where relevant,
//! the searcher's profile. They run on every listing in a search regardless
//! of whether AI analysis is enabled, so the search report always carries a
//! full set of salary, culture, progression, urgency, and competitiveness
//! signals. Scores are 0 to 100 and additive rules saturate at 100.

use serde::{Deserialize, Serialize};

use crate::models::job::{format_usd, CompanySize, JobListing};
use crate::models::profile::{ExperienceLevel, SizePreference, UserProfile, WorkStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryAssessment {
    Excellent,
    AboveExpectations,
    Good,
    BelowExpectations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationPotential {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryFit {
    pub assessment: SalaryAssessment,
    pub message: String,
    pub negotiation_potential: NegotiationPotential,
}

/// Rates a listing's salary band against the searcher's expectation.
/// An expectation at or below the band's midpoint is an excellent fit, the
/// upper half of the band is still negotiable, and anything outside the band
/// falls to the above or below verdicts.
pub fn analyze_salary_fit(job: &JobListing, expectation: u32) -> SalaryFit {
    let band = format!("{}-{}", format_usd(job.salary_min), format_usd(job.salary_max));

    let (assessment, message) = if expectation < job.salary_min {
        (
            SalaryAssessment::AboveExpectations,
            format!(
                "Salary range {band} exceeds your expectation of {}",
                format_usd(expectation)
            ),
        )
    } else if expectation <= job.salary_midpoint() {
        (
            SalaryAssessment::Excellent,
            format!(
                "Salary range {band} meets your expectation of {}",
                format_usd(expectation)
            ),
        )
    } else if expectation <= job.salary_max {
        (
            SalaryAssessment::Good,
            format!("Salary negotiable within range {band}"),
        )
    } else {
        (
            SalaryAssessment::BelowExpectations,
            format!(
                "Salary range {band} below expectation of {}",
                format_usd(expectation)
            ),
        )
    };

    SalaryFit {
        assessment,
        message,
        negotiation_potential: if job.equity_offered {
            NegotiationPotential::High
        } else {
            NegotiationPotential::Medium
        },
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CultureFit {
    pub score: u8,
    pub company_size_fit: bool,
    pub work_style_fit: bool,
    pub industry_alignment: bool,
}

fn size_matches(pref: SizePreference, size: CompanySize) -> bool {
    match pref {
        SizePreference::Any => true,
        SizePreference::Small => size == CompanySize::Small,
        SizePreference::Medium => size == CompanySize::Medium,
        SizePreference::Large => size == CompanySize::Large,
    }
}

fn work_style_fits(style: WorkStyle, job: &JobListing) -> bool {
    match style {
        WorkStyle::Remote => job.remote_friendly || job.is_remote(),
        WorkStyle::OnSite => !job.is_remote(),
        WorkStyle::Hybrid => true,
    }
}

/// Scores how well the company matches the searcher's stated preferences
/// around size, work style, and industry. Neutral baseline is 70.
pub fn analyze_culture_fit(job: &JobListing, profile: &UserProfile) -> CultureFit {
    let company_size_fit = size_matches(profile.company_size_preference, job.company_profile.size);
    let work_style_fit = work_style_fits(profile.work_style, job);
    let industry_alignment = profile
        .industry_preference
        .as_deref()
        .map(|pref| {
            job.company_profile
                .industry
                .to_lowercase()
                .contains(&pref.to_lowercase())
        })
        .unwrap_or(false);

    let mut score: u32 = 70;
    if company_size_fit {
        score += 15;
    }
    if profile.work_style == WorkStyle::Remote && job.remote_friendly {
        score += 10;
    } else if profile.work_style == WorkStyle::Hybrid && (!job.is_remote() || job.remote_friendly) {
        score += 5;
    }
    if industry_alignment {
        score += 5;
    }

    CultureFit {
        score: score.min(100) as u8,
        company_size_fit,
        work_style_fit,
        industry_alignment,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionTrack {
    AdvancementOpportunity,
    LeadershipTrack,
    SkillDevelopment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionFit {
    pub score: u8,
    pub track: ProgressionTrack,
    pub growth_path: String,
    pub mentorship_available: bool,
    pub learning_budget: bool,
}

/// Estimates growth potential from the title's seniority signals and the
/// company's size. Smaller companies score higher on raw growth, larger ones
/// on structure and mentorship.
pub fn analyze_progression(job: &JobListing, level: ExperienceLevel) -> ProgressionFit {
    let title = job.title.to_lowercase();
    let mut score: u32 = 60;

    let track = if title.contains("senior")
        && matches!(level, ExperienceLevel::Entry | ExperienceLevel::Mid)
    {
        score += 20;
        ProgressionTrack::AdvancementOpportunity
    } else if title.contains("lead") || title.contains("principal") {
        score += 25;
        ProgressionTrack::LeadershipTrack
    } else {
        ProgressionTrack::SkillDevelopment
    };

    let (size_bonus, growth_path) = match job.company_profile.size {
        CompanySize::Large => (10, "Structured career ladder with defined levels"),
        CompanySize::Medium => (15, "Flexible growth with cross-functional opportunities"),
        CompanySize::Small => (20, "Rapid growth potential with broad responsibilities"),
    };
    score += size_bonus;

    ProgressionFit {
        score: score.min(100) as u8,
        track,
        growth_path: growth_path.to_string(),
        mentorship_available: matches!(
            job.company_profile.size,
            CompanySize::Medium | CompanySize::Large
        ),
        learning_budget: job
            .benefits
            .iter()
            .any(|b| b.to_lowercase().contains("development")),
    }
}

/// Fresher postings are more likely to still be open and actively triaged.
pub fn urgency_score(days_posted: i64) -> u8 {
    if days_posted <= 3 {
        90
    } else if days_posted <= 7 {
        70
    } else if days_posted <= 14 {
        50
    } else {
        30
    }
}

/// How attractive the listing looks to other candidates, which is a proxy
/// for how much competition an applicant should expect.
pub fn competitiveness_score(job: &JobListing) -> u8 {
    let mut score: u32 = 50;

    if job.salary_max > 120_000 {
        score += 20;
    } else if job.salary_max > 90_000 {
        score += 10;
    }
    if job.remote_friendly {
        score += 15;
    }
    if job.equity_offered {
        score += 10;
    }
    if job.company_profile.rating >= 4.0 {
        score += 10;
    }

    score.min(100) as u8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicMatch {
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Profile-to-listing match without any model involvement. This score backs
/// the heuristic matcher and the AI fallback path, so it must always return
/// something sensible.
pub fn basic_match_score(job: &JobListing, profile: &UserProfile) -> BasicMatch {
    let title = job.title.to_lowercase();
    let mut score: u32 = 0;
    let mut reasons = Vec::new();

    if title.contains(&profile.target_role.to_lowercase()) {
        score += 30;
        reasons.push(format!("Job title matches your {} target", profile.target_role));
    }

    let expectation = profile.salary_expectation;
    if (job.salary_min..=job.salary_max).contains(&expectation) {
        score += 25;
        reasons.push("Salary range meets your expectations".to_string());
    } else if (job.salary_min as i64 - expectation as i64).abs() < 15_000 {
        score += 15;
        reasons.push("Salary range is close to your expectations".to_string());
    }

    if job
        .location
        .to_lowercase()
        .contains(&profile.location.to_lowercase())
        || job.remote_friendly
    {
        score += 20;
        reasons.push("Location preferences aligned".to_string());
    }

    if title.contains(&profile.experience_level.as_str().to_lowercase()) {
        score += 15;
        reasons.push("Experience level is a good match".to_string());
    }

    let overlap = skill_overlap(&profile.skills, &job.tech_stack);
    if overlap > 0 {
        score += (overlap as u32 * 3).min(10);
        reasons.push(format!("Matching skills: {overlap} technologies"));
    }

    if reasons.is_empty() {
        reasons.push("Basic compatibility assessment".to_string());
    }

    BasicMatch {
        score: score.min(100) as u8,
        reasons,
    }
}

pub fn skill_overlap(skills: &[String], tech_stack: &[String]) -> usize {
    skills
        .iter()
        .filter(|skill| {
            let skill = skill.to_lowercase();
            tech_stack.iter().any(|tech| tech.to_lowercase() == skill)
        })
        .count()
}
