//! Job listing model shared by the matching and market modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    Small,
    Medium,
    Large,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Small => "Small",
            CompanySize::Medium => "Medium",
            CompanySize::Large => "Large",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    Contract,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::Contract => "Contract",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub size: CompanySize,
    pub industry: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_profile: CompanyProfile,
    pub salary_min: u32,
    pub salary_max: u32,
    pub location: String,
    pub tech_stack: Vec<String>,
    pub description: String,
    pub posted_at: DateTime<Utc>,
    /// Board the listing was sourced from.
    pub source: String,
    pub job_type: JobType,
    pub remote_friendly: bool,
    pub visa_sponsorship: bool,
    pub equity_offered: bool,
    pub benefits: Vec<String>,
}

impl JobListing {
    pub fn salary_midpoint(&self) -> u32 {
        (self.salary_min + self.salary_max) / 2
    }

    pub fn is_remote(&self) -> bool {
        self.location.eq_ignore_ascii_case("remote")
    }

    pub fn days_since_posted(&self, now: DateTime<Utc>) -> i64 {
        (now - self.posted_at).num_days()
    }

    /// "$80,000 - $120,000", the form salary bands take in user-facing text.
    pub fn salary_range_display(&self) -> String {
        format!("{} - {}", format_usd(self.salary_min), format_usd(self.salary_max))
    }
}

/// Dollar amount with thousands separators, "$95,000".
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_listing() -> JobListing {
        JobListing {
            id: "indeed-0".to_string(),
            title: "Software Engineer".to_string(),
            company: "TechCorp".to_string(),
            company_profile: CompanyProfile {
                size: CompanySize::Large,
                industry: "Technology".to_string(),
                rating: 4.2,
            },
            salary_min: 80_000,
            salary_max: 120_000,
            location: "Remote".to_string(),
            tech_stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            description: "Build backend services.".to_string(),
            posted_at: Utc::now() - chrono::Duration::days(5),
            source: "indeed".to_string(),
            job_type: JobType::FullTime,
            remote_friendly: true,
            visa_sponsorship: false,
            equity_offered: false,
            benefits: vec!["Health Insurance".to_string()],
        }
    }

    #[test]
    fn test_salary_midpoint() {
        assert_eq!(make_listing().salary_midpoint(), 100_000);
    }

    #[test]
    fn test_is_remote_case_insensitive() {
        let mut listing = make_listing();
        assert!(listing.is_remote());
        listing.location = "Austin".to_string();
        assert!(!listing.is_remote());
    }

    #[test]
    fn test_days_since_posted() {
        let listing = make_listing();
        assert_eq!(listing.days_since_posted(Utc::now()), 5);
    }

    #[test]
    fn test_job_type_full_time_serde_rename() {
        let jt: JobType = serde_json::from_str(r#""Full-time""#).unwrap();
        assert_eq!(jt, JobType::FullTime);
        assert_eq!(serde_json::to_string(&JobType::Contract).unwrap(), r#""Contract""#);
    }

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(500), "$500");
        assert_eq!(format_usd(95_000), "$95,000");
        assert_eq!(format_usd(120_000), "$120,000");
        assert_eq!(format_usd(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_salary_range_display() {
        assert_eq!(make_listing().salary_range_display(), "$80,000 - $120,000");
    }
}
