//! User profile model and the graduation-outlook heuristic derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where the user currently stands in their career.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum CareerStatus {
    #[default]
    Student,
    RecentGraduate,
    Employed,
    BetweenJobs,
}

/// Experience band used by the salary tables and title matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
        }
    }
}

/// Preferred working arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum WorkStyle {
    Remote,
    #[default]
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStyle::Remote => "Remote",
            WorkStyle::Hybrid => "Hybrid",
            WorkStyle::OnSite => "On-site",
        }
    }
}

/// Preferred employer size. `Any` disables the size filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum SizePreference {
    #[default]
    Any,
    Small,
    Medium,
    Large,
}

impl SizePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizePreference::Any => "Any",
            SizePreference::Small => "Small",
            SizePreference::Medium => "Medium",
            SizePreference::Large => "Large",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: CareerStatus,
    #[serde(default)]
    pub graduation_date: Option<NaiveDate>,
    #[serde(default = "default_target_role")]
    pub target_role: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_salary_expectation")]
    pub salary_expectation: u32,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub work_style: WorkStyle,
    #[serde(default)]
    pub company_size_preference: SizePreference,
    #[serde(default)]
    pub industry_preference: Option<String>,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

fn default_target_role() -> String {
    "Software Engineer".to_string()
}

fn default_salary_expectation() -> u32 {
    75_000
}

fn default_location() -> String {
    "United States".to_string()
}

impl UserProfile {
    /// Outlook derived from the graduation date, if one is set.
    pub fn graduation_outlook(&self, today: NaiveDate) -> Option<GraduationOutlook> {
        self.graduation_date
            .map(|date| GraduationOutlook::assess(date, today))
    }
}

/// Career phase relative to graduation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CareerPhase {
    Graduate,
    FinalSprint,
    Preparation,
    Planning,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
}

/// How close graduation is and how hard the job search should be pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduationOutlook {
    pub phase: CareerPhase,
    /// Negative once the graduation date has passed.
    pub days_until: i64,
    pub urgency: UrgencyLevel,
    pub guidance: String,
}

impl GraduationOutlook {
    /// Phase boundaries: past date, within 90 days, within 180 days, beyond.
    pub fn assess(graduation_date: NaiveDate, today: NaiveDate) -> Self {
        let days_until = (graduation_date - today).num_days();

        let (phase, urgency, guidance) = if days_until < 0 {
            (
                CareerPhase::Graduate,
                UrgencyLevel::High,
                "Already graduated. Focus on active applications and interview scheduling.",
            )
        } else if days_until <= 90 {
            (
                CareerPhase::FinalSprint,
                UrgencyLevel::High,
                "Graduation is close. Prioritize applications now and line up interviews.",
            )
        } else if days_until <= 180 {
            (
                CareerPhase::Preparation,
                UrgencyLevel::Medium,
                "Six months out. Sharpen your resume and start targeted applications.",
            )
        } else {
            (
                CareerPhase::Planning,
                UrgencyLevel::Low,
                "Over six months out. Build skills and research target companies.",
            )
        };

        GraduationOutlook {
            phase,
            days_until,
            urgency,
            guidance: guidance.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> (NaiveDate, NaiveDate) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        (today + chrono::Duration::days(offset), today)
    }

    #[test]
    fn test_outlook_past_date_is_graduate_phase() {
        let (grad, today) = day(-1);
        let outlook = GraduationOutlook::assess(grad, today);
        assert_eq!(outlook.phase, CareerPhase::Graduate);
        assert_eq!(outlook.urgency, UrgencyLevel::High);
        assert_eq!(outlook.days_until, -1);
    }

    #[test]
    fn test_outlook_same_day_is_final_sprint() {
        let (grad, today) = day(0);
        let outlook = GraduationOutlook::assess(grad, today);
        assert_eq!(outlook.phase, CareerPhase::FinalSprint);
        assert_eq!(outlook.urgency, UrgencyLevel::High);
    }

    #[test]
    fn test_outlook_90_day_boundary() {
        let (grad, today) = day(90);
        assert_eq!(
            GraduationOutlook::assess(grad, today).phase,
            CareerPhase::FinalSprint
        );
        let (grad, today) = day(91);
        assert_eq!(
            GraduationOutlook::assess(grad, today).phase,
            CareerPhase::Preparation
        );
    }

    #[test]
    fn test_outlook_180_day_boundary() {
        let (grad, today) = day(180);
        let outlook = GraduationOutlook::assess(grad, today);
        assert_eq!(outlook.phase, CareerPhase::Preparation);
        assert_eq!(outlook.urgency, UrgencyLevel::Medium);

        let (grad, today) = day(181);
        let outlook = GraduationOutlook::assess(grad, today);
        assert_eq!(outlook.phase, CareerPhase::Planning);
        assert_eq!(outlook.urgency, UrgencyLevel::Low);
    }

    #[test]
    fn test_profile_without_graduation_date_has_no_outlook() {
        let profile: UserProfile = serde_json::from_str(r#"{"user_id": "u1"}"#).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(profile.graduation_outlook(today).is_none());
    }

    #[test]
    fn test_profile_defaults_from_minimal_payload() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.user_id, "anonymous");
        assert_eq!(profile.target_role, "Software Engineer");
        assert_eq!(profile.experience_level, ExperienceLevel::Mid);
        assert_eq!(profile.salary_expectation, 75_000);
        assert_eq!(profile.location, "United States");
        assert_eq!(profile.work_style, WorkStyle::Hybrid);
        assert_eq!(profile.company_size_preference, SizePreference::Any);
    }

    #[test]
    fn test_work_style_on_site_serde_rename() {
        let style: WorkStyle = serde_json::from_str(r#""On-site""#).unwrap();
        assert_eq!(style, WorkStyle::OnSite);
    }
}
