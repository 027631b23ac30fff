//! Deterministic market snapshot built from pinned demand and salary tables.
//!
//! Every figure is a pure function of (domain, location, level): table lookups
//! adjusted by location multipliers, with residual variation drawn from a
//! stable string hash so repeated queries always agree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::ExperienceLevel;

/// Baseline open positions per domain before location adjustment.
const BASE_OPENINGS: &[(&str, u32)] = &[
    ("software engineer", 15_000),
    ("data scientist", 8_000),
    ("product manager", 5_000),
    ("devops engineer", 6_000),
    ("ux/ui designer", 4_000),
    ("cybersecurity", 7_000),
    ("machine learning engineer", 3_500),
    ("cloud architect", 4_500),
];
const DEFAULT_OPENINGS: u32 = 5_000;

/// Location effect on posting volume. Remote pools supply nationwide.
const OPENINGS_LOCATION_MULT: &[(&str, f64)] = &[
    ("san francisco", 1.8),
    ("new york", 1.6),
    ("seattle", 1.4),
    ("austin", 1.2),
    ("remote", 2.0),
];

/// Base salary per domain at Entry / Mid / Senior.
const SALARY_BASES: &[(&str, [u32; 3])] = &[
    ("software engineer", [75_000, 110_000, 150_000]),
    ("data scientist", [80_000, 120_000, 160_000]),
    ("product manager", [85_000, 125_000, 170_000]),
    ("devops engineer", [78_000, 115_000, 155_000]),
    ("ux/ui designer", [65_000, 95_000, 130_000]),
    ("cybersecurity", [82_000, 118_000, 165_000]),
    ("machine learning engineer", [85_000, 125_000, 175_000]),
    ("cloud architect", [80_000, 120_000, 170_000]),
];
const DEFAULT_SALARY_BASE: [u32; 3] = [75_000, 95_000, 130_000];

const SALARY_LOCATION_MULT: &[(&str, f64)] = &[
    ("san francisco", 1.4),
    ("new york", 1.3),
    ("seattle", 1.25),
    ("austin", 1.1),
    ("remote", 1.15),
];

/// Markets where equity is a first-class part of offers.
const HIGH_EQUITY_LOCATIONS: &[&str] = &["san francisco", "seattle"];

const TOP_EMPLOYERS: &[(&str, [&str; 5])] = &[
    (
        "software engineer",
        ["Google", "Microsoft", "Amazon", "Meta", "Apple"],
    ),
    (
        "data scientist",
        ["Google", "Microsoft", "Amazon", "Netflix", "Spotify"],
    ),
    (
        "product manager",
        ["Google", "Meta", "Amazon", "Microsoft", "Stripe"],
    ),
    (
        "devops engineer",
        ["Amazon", "Microsoft", "Google", "HashiCorp", "Docker"],
    ),
    (
        "cybersecurity",
        ["CrowdStrike", "Palo Alto Networks", "Okta", "Zscaler", "Fortinet"],
    ),
];
const DEFAULT_EMPLOYERS: [&str; 5] = [
    "TechCorp",
    "InnovateLab",
    "DataDriven Inc",
    "CloudFirst",
    "AI Solutions",
];

/// FNV-1a over the lowercased input. Keeps the derived figures identical
/// across runs and hosts, unlike the stdlib hasher.
pub fn stable_hash(input: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in input.to_lowercase().bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCompetitiveness {
    HighlyCompetitive,
    Competitive,
    Moderate,
    Low,
}

impl MarketCompetitiveness {
    /// Tiers over a 0-99 score.
    fn from_score(score: u64) -> Self {
        match score {
            80.. => MarketCompetitiveness::HighlyCompetitive,
            60..=79 => MarketCompetitiveness::Competitive,
            40..=59 => MarketCompetitiveness::Moderate,
            _ => MarketCompetitiveness::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCompetitiveness::HighlyCompetitive => "Highly Competitive",
            MarketCompetitiveness::Competitive => "Competitive",
            MarketCompetitiveness::Moderate => "Moderate",
            MarketCompetitiveness::Low => "Low",
        }
    }
}

/// How hard candidates at a given level have to fight for offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    High,
    Moderate,
    Low,
}

impl CompetitionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionLevel::High => "High",
            CompetitionLevel::Moderate => "Moderate",
            CompetitionLevel::Low => "Low",
        }
    }
}

/// Posting volume and demand pressure for a (domain, location) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningsOutlook {
    pub total_openings: u32,
    /// Estimated postings added over the trailing 30 days.
    pub new_postings_30d: u32,
    pub average_time_to_fill_days: u32,
    pub growth_rate_pct: u32,
    /// 70-99. Tracks how actively employers are hiring.
    pub demand_index: u32,
    pub competitiveness: MarketCompetitiveness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub min: u32,
    pub p25: u32,
    pub median: u32,
    pub p75: u32,
    pub max: u32,
}

/// First-year package estimate on top of the median base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalCompensation {
    pub base_salary: u32,
    pub estimated_bonus: u32,
    pub equity_value: u32,
    pub benefits_value: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryOutlook {
    pub band: SalaryBand,
    pub total_compensation: TotalCompensation,
}

/// Point-in-time view of one market, rebuilt on cache expiry or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub domain: String,
    pub location: String,
    pub experience_level: ExperienceLevel,
    pub generated_at: DateTime<Utc>,
    pub openings: OpeningsOutlook,
    pub salary: SalaryOutlook,
    pub competition_level: CompetitionLevel,
    pub top_employers: Vec<String>,
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

fn openings_outlook(domain: &str, location: &str) -> OpeningsOutlook {
    let base = lookup(BASE_OPENINGS, domain).unwrap_or(DEFAULT_OPENINGS);
    let multiplier = lookup(OPENINGS_LOCATION_MULT, location).unwrap_or(1.0);
    let total_openings = scale(base, multiplier);

    let domain_hash = stable_hash(domain);
    let pair_hash = stable_hash(&format!("{domain}{location}"));

    OpeningsOutlook {
        total_openings,
        new_postings_30d: scale(total_openings, 0.25),
        average_time_to_fill_days: 25 + (domain_hash % 20) as u32,
        growth_rate_pct: 8 + (domain_hash % 15) as u32,
        demand_index: 70 + (pair_hash % 30) as u32,
        competitiveness: MarketCompetitiveness::from_score(pair_hash % 100),
    }
}

fn salary_outlook(domain: &str, location: &str, level: ExperienceLevel) -> SalaryOutlook {
    let bases = lookup(SALARY_BASES, domain).unwrap_or(DEFAULT_SALARY_BASE);
    let base = match level {
        ExperienceLevel::Entry => bases[0],
        ExperienceLevel::Mid => bases[1],
        ExperienceLevel::Senior => bases[2],
    };
    let multiplier = lookup(SALARY_LOCATION_MULT, location).unwrap_or(1.0);
    let adjusted = scale(base, multiplier);

    let band = SalaryBand {
        min: scale(adjusted, 0.8),
        p25: scale(adjusted, 0.9),
        median: adjusted,
        p75: scale(adjusted, 1.15),
        max: scale(adjusted, 1.3),
    };

    let bonus_share = match level {
        ExperienceLevel::Entry => 0.10,
        ExperienceLevel::Mid => 0.15,
        ExperienceLevel::Senior => 0.25,
    };
    let equity_share = if HIGH_EQUITY_LOCATIONS.contains(&location) {
        0.25
    } else {
        0.10
    };
    let estimated_bonus = scale(adjusted, bonus_share);
    let equity_value = scale(adjusted, equity_share);
    let benefits_value = scale(adjusted, 0.20);

    SalaryOutlook {
        total_compensation: TotalCompensation {
            base_salary: adjusted,
            estimated_bonus,
            equity_value,
            benefits_value,
            total: adjusted + estimated_bonus + equity_value + benefits_value,
        },
        band,
    }
}

/// Multiplies a dollar or count figure, rounding to the nearest whole unit so
/// inexact decimal factors (1.15, 1.4) never shave a unit off.
pub(super) fn scale(amount: u32, factor: f64) -> u32 {
    (f64::from(amount) * factor).round() as u32
}

/// Location-adjusted median base for one level. The progression ladder keys
/// off the Mid rung.
pub(super) fn level_median(domain: &str, location: &str, level: ExperienceLevel) -> u32 {
    salary_outlook(domain, location, level).band.median
}

fn competition_level(level: ExperienceLevel) -> CompetitionLevel {
    match level {
        ExperienceLevel::Entry => CompetitionLevel::High,
        ExperienceLevel::Mid => CompetitionLevel::Moderate,
        ExperienceLevel::Senior => CompetitionLevel::Low,
    }
}

fn top_employers(domain: &str) -> Vec<String> {
    let pool = lookup(TOP_EMPLOYERS, domain).unwrap_or(DEFAULT_EMPLOYERS);
    pool.iter().map(|name| name.to_string()).collect()
}

/// Builds the snapshot for a normalized (lowercased, trimmed) domain and
/// location. Unknown domains and locations fall back to the default rows.
pub fn build_snapshot(
    domain: &str,
    location: &str,
    level: ExperienceLevel,
    now: DateTime<Utc>,
) -> MarketSnapshot {
    MarketSnapshot {
        domain: domain.to_string(),
        location: location.to_string(),
        experience_level: level,
        generated_at: now,
        openings: openings_outlook(domain, location),
        salary: salary_outlook(domain, location, level),
        competition_level: competition_level(level),
        top_employers: top_employers(domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_stable_hash_is_deterministic_and_case_insensitive() {
        assert_eq!(stable_hash("software engineer"), stable_hash("software engineer"));
        assert_eq!(stable_hash("Software Engineer"), stable_hash("software engineer"));
        assert_ne!(stable_hash("software engineer"), stable_hash("data scientist"));
    }

    #[test]
    fn test_openings_scale_with_location() {
        let base = openings_outlook("software engineer", "united states");
        let remote = openings_outlook("software engineer", "remote");
        assert_eq!(base.total_openings, 15_000);
        assert_eq!(remote.total_openings, 30_000);
        assert_eq!(remote.new_postings_30d, 7_500);
    }

    #[test]
    fn test_unknown_domain_uses_default_row() {
        let outlook = openings_outlook("basket weaver", "united states");
        assert_eq!(outlook.total_openings, DEFAULT_OPENINGS);
    }

    #[test]
    fn test_derived_figures_stay_in_range() {
        for (domain, _) in BASE_OPENINGS {
            let outlook = openings_outlook(domain, "austin");
            assert!((25..45).contains(&outlook.average_time_to_fill_days));
            assert!((8..23).contains(&outlook.growth_rate_pct));
            assert!((70..100).contains(&outlook.demand_index));
        }
    }

    #[test]
    fn test_salary_band_ratios() {
        let salary = salary_outlook("software engineer", "united states", ExperienceLevel::Mid);
        assert_eq!(salary.band.median, 110_000);
        assert_eq!(salary.band.min, 88_000);
        assert_eq!(salary.band.p25, 99_000);
        assert_eq!(salary.band.p75, 126_500);
        assert_eq!(salary.band.max, 143_000);
    }

    #[test]
    fn test_salary_applies_location_multiplier() {
        let sf = salary_outlook("software engineer", "san francisco", ExperienceLevel::Senior);
        assert_eq!(sf.band.median, 210_000);
    }

    #[test]
    fn test_total_compensation_shares() {
        let salary = salary_outlook("data scientist", "united states", ExperienceLevel::Mid);
        let comp = &salary.total_compensation;
        assert_eq!(comp.base_salary, 120_000);
        assert_eq!(comp.estimated_bonus, 18_000);
        assert_eq!(comp.equity_value, 12_000);
        assert_eq!(comp.benefits_value, 24_000);
        assert_eq!(comp.total, 174_000);
    }

    #[test]
    fn test_equity_share_rises_in_equity_markets() {
        let sf = salary_outlook("software engineer", "san francisco", ExperienceLevel::Entry);
        // 75_000 * 1.4 = 105_000 base, 25% equity
        assert_eq!(sf.total_compensation.equity_value, 26_250);
    }

    #[test]
    fn test_competition_tracks_level() {
        assert_eq!(
            competition_level(ExperienceLevel::Entry),
            CompetitionLevel::High
        );
        assert_eq!(
            competition_level(ExperienceLevel::Mid),
            CompetitionLevel::Moderate
        );
        assert_eq!(
            competition_level(ExperienceLevel::Senior),
            CompetitionLevel::Low
        );
    }

    #[test]
    fn test_competitiveness_tiers() {
        assert_eq!(
            MarketCompetitiveness::from_score(85),
            MarketCompetitiveness::HighlyCompetitive
        );
        assert_eq!(
            MarketCompetitiveness::from_score(60),
            MarketCompetitiveness::Competitive
        );
        assert_eq!(
            MarketCompetitiveness::from_score(40),
            MarketCompetitiveness::Moderate
        );
        assert_eq!(
            MarketCompetitiveness::from_score(39),
            MarketCompetitiveness::Low
        );
    }

    #[test]
    fn test_top_employers_known_and_default_pools() {
        let snapshot = build_snapshot("cybersecurity", "remote", ExperienceLevel::Mid, now());
        assert_eq!(snapshot.top_employers[0], "CrowdStrike");
        assert_eq!(snapshot.top_employers.len(), 5);

        let fallback = build_snapshot("archaeologist", "remote", ExperienceLevel::Mid, now());
        assert_eq!(fallback.top_employers[0], "TechCorp");
    }

    #[test]
    fn test_snapshot_is_reproducible() {
        let a = build_snapshot("devops engineer", "seattle", ExperienceLevel::Senior, now());
        let b = build_snapshot("devops engineer", "seattle", ExperienceLevel::Senior, now());
        assert_eq!(a.openings, b.openings);
        assert_eq!(a.salary, b.salary);
        assert_eq!(a.top_employers, b.top_employers);
    }
}
