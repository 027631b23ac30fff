//! Job board catalog and listing synthesis.
//!
//! Live board integrations are out of scope for now, so each board produces a
//! deterministic batch of listings derived from its position in the catalog.
//! The synthesis is index-cycled rather than random: the same profile always
//! sees the same listings, which keeps scoring reproducible across runs.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::models::job::{CompanyProfile, CompanySize, JobListing, JobType};
use crate::models::profile::{ExperienceLevel, UserProfile};

/// A job board the search fans out to. The weight reflects how much signal
/// we attribute to the board when presenting sources, not how many listings
/// it yields.
pub struct BoardProfile {
    pub key: &'static str,
    pub weight: f64,
    pub features: [&'static str; 3],
}

pub const JOB_BOARDS: [BoardProfile; 5] = [
    BoardProfile {
        key: "indeed",
        weight: 0.30,
        features: ["salary_insights", "company_reviews", "easy_apply"],
    },
    BoardProfile {
        key: "linkedin",
        weight: 0.25,
        features: ["network_connections", "recruiter_insights", "skill_match"],
    },
    BoardProfile {
        key: "glassdoor",
        weight: 0.20,
        features: ["salary_data", "interview_reviews", "culture_ratings"],
    },
    BoardProfile {
        key: "dice",
        weight: 0.15,
        features: ["tech_focus", "contract_roles", "skill_assessment"],
    },
    BoardProfile {
        key: "monster",
        weight: 0.10,
        features: ["resume_visibility", "career_advice", "job_alerts"],
    },
];

const LISTINGS_PER_BOARD: usize = 8;

const COMPANIES: [(&str, CompanySize, &str, f64); 10] = [
    ("TechCorp", CompanySize::Large, "Technology", 4.2),
    ("InnovateLab", CompanySize::Medium, "AI/ML", 4.5),
    ("StartupXYZ", CompanySize::Small, "Fintech", 4.0),
    ("DataDriven Inc", CompanySize::Medium, "Analytics", 4.3),
    ("CloudFirst", CompanySize::Large, "Cloud Services", 4.1),
    ("AI Solutions", CompanySize::Medium, "Artificial Intelligence", 4.4),
    ("DevOps Masters", CompanySize::Small, "DevOps", 4.2),
    ("ScaleUp Co", CompanySize::Medium, "SaaS", 4.0),
    ("NextGen Tech", CompanySize::Large, "Enterprise Software", 4.3),
    ("FutureSoft", CompanySize::Small, "Mobile Apps", 4.1),
];

const BASE_TITLES: [&str; 12] = [
    "Software Engineer",
    "Senior Software Engineer",
    "Frontend Developer",
    "Backend Engineer",
    "Full Stack Developer",
    "Data Scientist",
    "Machine Learning Engineer",
    "DevOps Engineer",
    "Product Manager",
    "Cloud Architect",
    "Security Engineer",
    "Mobile Developer",
];

const TECH_STACKS: [[&str; 4]; 8] = [
    ["Python", "Django", "PostgreSQL", "AWS"],
    ["JavaScript", "React", "Node.js", "MongoDB"],
    ["Java", "Spring Boot", "MySQL", "Docker"],
    ["Python", "FastAPI", "Redis", "Kubernetes"],
    ["TypeScript", "Angular", "GraphQL", "Azure"],
    ["Go", "Microservices", "gRPC", "GCP"],
    ["C#", ".NET Core", "SQL Server", "Azure"],
    ["Rust", "WebAssembly", "PostgreSQL", "Docker"],
];

fn level_prefix(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::Entry => "Entry Level",
        ExperienceLevel::Mid => "Mid Level",
        ExperienceLevel::Senior => "Senior",
    }
}

fn base_salary(level: ExperienceLevel) -> u32 {
    match level {
        ExperienceLevel::Entry => 75_000,
        ExperienceLevel::Mid => 95_000,
        ExperienceLevel::Senior => 130_000,
    }
}

fn benefits_for(size: CompanySize) -> Vec<String> {
    let mut benefits = vec![
        "Competitive salary and performance bonuses".to_string(),
        "Comprehensive health, dental, and vision insurance".to_string(),
        "401(k) with company matching".to_string(),
        "Flexible PTO and work-life balance".to_string(),
    ];

    match size {
        CompanySize::Large => {
            benefits.push("Professional development budget ($3,000/year)".to_string());
            benefits.push("On-site gym and wellness programs".to_string());
            benefits.push("Stock purchase plan".to_string());
        }
        CompanySize::Medium => {
            benefits.push("Learning and development stipend ($2,000/year)".to_string());
            benefits.push("Catered lunches and snacks".to_string());
        }
        CompanySize::Small => {
            benefits.push("Significant equity upside potential".to_string());
            benefits.push("Direct impact on product direction".to_string());
        }
    }

    benefits
}

fn description_for(title: &str, company: &str, stack: &[String]) -> String {
    let focus = if title.contains("Frontend") {
        "building responsive, accessible user interfaces"
    } else if title.contains("Backend") {
        "designing scalable services and APIs"
    } else if title.contains("Data") || title.contains("Machine Learning") {
        "turning data into product decisions and models"
    } else if title.contains("DevOps") || title.contains("Cloud") {
        "automating infrastructure and improving reliability"
    } else {
        "shipping features across the stack"
    };

    format!(
        "{company} is hiring a {title} focused on {focus}. \
         You will work with {} in a collaborative team that values \
         code review, testing, and continuous delivery.",
        stack.join(", ")
    )
}

/// Synthesizes one board's batch of listings. `offset` shifts which slice of
/// the company/title/stack catalogs this board draws from so that different
/// boards surface different openings.
fn synthesize_board_listings(
    board: &BoardProfile,
    level: ExperienceLevel,
    location: &str,
    offset: usize,
    now: DateTime<Utc>,
) -> Vec<JobListing> {
    let base = base_salary(level);
    let mut listings = Vec::with_capacity(LISTINGS_PER_BOARD);

    for i in 0..LISTINGS_PER_BOARD {
        let idx = offset + i;
        let (name, size, industry, rating) = COMPANIES[idx % COMPANIES.len()];
        let title = format!("{} {}", level_prefix(level), BASE_TITLES[idx % BASE_TITLES.len()]);
        let stack: Vec<String> = TECH_STACKS[idx % TECH_STACKS.len()]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let salary_min = (base + i as u32 * 2_000).saturating_sub(15_000).max(50_000);
        let salary_max = (base + i as u32 * 3_000 + 15_000).min(200_000);

        let job_location = if i % 4 == 0 { "Remote".to_string() } else { location.to_string() };
        let equity_offered =
            matches!(size, CompanySize::Small | CompanySize::Medium) && i % 4 == 0;

        listings.push(JobListing {
            id: format!("{}_job_{}", board.key, i + 1),
            title: title.clone(),
            company: name.to_string(),
            company_profile: CompanyProfile {
                size,
                industry: industry.to_string(),
                rating,
            },
            salary_min,
            salary_max,
            location: job_location,
            tech_stack: stack.clone(),
            description: description_for(&title, name, &stack),
            posted_at: now - Duration::days((i % 14) as i64),
            source: board.key.to_string(),
            job_type: if i % 5 == 0 { JobType::Contract } else { JobType::FullTime },
            remote_friendly: i % 3 == 0,
            visa_sponsorship: i % 6 == 0,
            equity_offered,
            benefits: benefits_for(size),
        });
    }

    listings
}

/// Fans the search out across every board in the catalog and removes
/// duplicate openings. Two listings are the same opening when their title and
/// company match case-insensitively; the first board to surface an opening
/// keeps it.
pub fn search_all_boards(profile: &UserProfile, now: DateTime<Utc>) -> Vec<JobListing> {
    let mut all = Vec::new();
    for (board_idx, board) in JOB_BOARDS.iter().enumerate() {
        all.extend(synthesize_board_listings(
            board,
            profile.experience_level,
            &profile.location,
            board_idx * LISTINGS_PER_BOARD,
            now,
        ));
    }
    dedup_listings(all)
}

pub fn dedup_listings(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|job| seen.insert((job.title.to_lowercase(), job.company.to_lowercase())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> UserProfile {
        serde_json::from_str(r#"{"user_id": "u-1", "location": "Austin, TX"}"#)
            .expect("profile should deserialize")
    }

    #[test]
    fn test_each_board_yields_a_full_batch() {
        let listings = synthesize_board_listings(
            &JOB_BOARDS[0],
            ExperienceLevel::Entry,
            "Austin, TX",
            0,
            Utc::now(),
        );
        assert_eq!(listings.len(), LISTINGS_PER_BOARD);
        assert!(listings.iter().all(|job| job.source == "indeed"));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let now = Utc::now();
        let a = synthesize_board_listings(&JOB_BOARDS[1], ExperienceLevel::Mid, "Remote", 8, now);
        let b = synthesize_board_listings(&JOB_BOARDS[1], ExperienceLevel::Mid, "Remote", 8, now);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.title, y.title);
            assert_eq!(x.salary_min, y.salary_min);
            assert_eq!(x.salary_max, y.salary_max);
        }
    }

    #[test]
    fn test_salary_bands_stay_inside_floor_and_ceiling() {
        for level in [ExperienceLevel::Entry, ExperienceLevel::Mid, ExperienceLevel::Senior] {
            let listings =
                synthesize_board_listings(&JOB_BOARDS[0], level, "Remote", 0, Utc::now());
            for job in &listings {
                assert!(job.salary_min >= 50_000, "floor violated: {}", job.salary_min);
                assert!(job.salary_max <= 200_000, "ceiling violated: {}", job.salary_max);
                assert!(job.salary_min < job.salary_max);
            }
        }
    }

    #[test]
    fn test_senior_listings_pay_more_than_entry() {
        let now = Utc::now();
        let entry = synthesize_board_listings(&JOB_BOARDS[0], ExperienceLevel::Entry, "R", 0, now);
        let senior = synthesize_board_listings(&JOB_BOARDS[0], ExperienceLevel::Senior, "R", 0, now);
        assert!(senior[0].salary_min > entry[0].salary_min);
        assert!(senior[0].salary_max > entry[0].salary_max);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let now = Utc::now();
        let mut listings =
            synthesize_board_listings(&JOB_BOARDS[0], ExperienceLevel::Entry, "Austin", 0, now);
        let mut dupe = listings[0].clone();
        dupe.id = "linkedin_job_9".to_string();
        dupe.source = "linkedin".to_string();
        dupe.title = listings[0].title.to_uppercase();
        listings.push(dupe);

        let unique = dedup_listings(listings);
        assert_eq!(unique.len(), LISTINGS_PER_BOARD);
        assert!(unique.iter().all(|job| job.source == "indeed"));
    }

    #[test]
    fn test_search_all_boards_covers_every_source() {
        let listings = search_all_boards(&make_profile(), Utc::now());
        for board in &JOB_BOARDS {
            assert!(
                listings.iter().any(|job| job.source == board.key),
                "no listings surfaced from {}",
                board.key
            );
        }
        // Offsets keep the boards' catalogs from colliding wholesale.
        assert!(listings.len() > LISTINGS_PER_BOARD);
    }

    #[test]
    fn test_board_weights_sum_to_one() {
        let total: f64 = JOB_BOARDS.iter().map(|b| b.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
