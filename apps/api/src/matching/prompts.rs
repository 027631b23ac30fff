//! Prompt templates and summary builders for AI-assisted match analysis.

use crate::models::job::{format_usd, JobListing};
use crate::models::profile::UserProfile;

/// Template for the per-listing match analysis call.
/// Replace `{candidate}` and `{job}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"CANDIDATE PROFILE:
{candidate}

JOB OPPORTUNITY:
{job}

Evaluate how well this opportunity fits the candidate. Provide a comprehensive analysis in the following JSON format:
{
    "score": <0-100 integer>,
    "reasons": [<3-5 specific reasons for the match>],
    "skill_gaps": [<skills the candidate should develop for this role>],
    "growth_potential": "<assessment of career growth opportunities>",
    "recommendations": [<3-4 actionable recommendations for applying>]
}

Consider: technical skill alignment, experience level fit, salary expectations, location preferences, company culture fit, career growth potential, learning opportunities, and long-term career trajectory.

Respond with ONLY the JSON object, no additional text."#;

pub fn build_match_prompt(job: &JobListing, profile: &UserProfile) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{candidate}", &profile_summary(profile))
        .replace("{job}", &listing_summary(job))
}

/// Renders the profile fields the model needs to judge fit. Optional fields
/// are omitted rather than sent as placeholders.
pub fn profile_summary(profile: &UserProfile) -> String {
    let mut lines = vec![
        format!("- Target Role: {}", profile.target_role),
        format!("- Experience Level: {}", profile.experience_level.as_str()),
        format!("- Location: {}", profile.location),
        format!("- Salary Expectation: {}", format_usd(profile.salary_expectation)),
        format!("- Skills: {}", join_or(&profile.skills, "Not specified")),
        format!("- Work Style: {}", profile.work_style.as_str()),
        format!("- Company Size Preference: {}", profile.company_size_preference.as_str()),
    ];
    if let Some(industry) = &profile.industry_preference {
        lines.push(format!("- Industry Interest: {industry}"));
    }
    if let Some(graduation) = profile.graduation_date {
        lines.push(format!("- Graduation Date: {graduation}"));
    }
    lines.join("\n")
}

pub fn listing_summary(job: &JobListing) -> String {
    let benefits: Vec<&str> = job.benefits.iter().take(3).map(String::as_str).collect();
    // Descriptions are bounded to keep the prompt inside a predictable size.
    let description: String = job.description.chars().take(800).collect();

    [
        format!("- Title: {}", job.title),
        format!(
            "- Company: {} ({} company, {} industry, rated {:.1})",
            job.company,
            job.company_profile.size.as_str(),
            job.company_profile.industry,
            job.company_profile.rating
        ),
        format!("- Location: {} (Remote friendly: {})", job.location, job.remote_friendly),
        format!("- Salary Range: {}", job.salary_range_display()),
        format!("- Tech Stack: {}", join_or(&job.tech_stack, "Not listed")),
        format!("- Job Type: {}", job.job_type.as_str()),
        format!("- Benefits: {}", benefits.join(", ")),
        format!("- Visa Sponsorship: {}", job.visa_sponsorship),
        format!("- Equity: {}", job.equity_offered),
        format!("- Description: {description}"),
    ]
    .join("\n")
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
