//! Salary benchmarking against the snapshot market.
//!
//! Positions a salary (the caller's, or the market median when none is given)
//! against fixed thresholds, adjusts it for cost of living, and lays out the
//! level-progression ladder for the snapshot's domain and location.

use serde::{Deserialize, Serialize};

use crate::market::snapshot::{self, MarketSnapshot};
use crate::models::profile::ExperienceLevel;

/// Cost-of-living index per market, 1.0 = national baseline.
const COST_OF_LIVING_INDEX: &[(&str, f64)] = &[
    ("san francisco", 1.8),
    ("new york", 1.6),
    ("seattle", 1.4),
    ("austin", 1.1),
    ("remote", 1.0),
];

/// Ladder rungs as multiples of the Mid-level median.
const PROGRESSION_LADDER: &[(&str, f64)] = &[
    ("Entry", 0.8),
    ("Mid", 1.0),
    ("Senior", 1.4),
    ("Staff", 1.8),
    ("Director", 2.2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    TopTenPercent,
    TopQuarter,
    AboveAverage,
    Average,
    BelowAverage,
}

impl MarketPosition {
    fn assess(salary: u32) -> (Self, &'static str) {
        match salary {
            150_000.. => (MarketPosition::TopTenPercent, "Top 10% of market"),
            120_000..=149_999 => (MarketPosition::TopQuarter, "Top 25% of market"),
            90_000..=119_999 => (MarketPosition::AboveAverage, "Above market average"),
            70_000..=89_999 => (MarketPosition::Average, "At market average"),
            _ => (MarketPosition::BelowAverage, "Below market average"),
        }
    }
}

/// What a salary buys after the local cost of living is stripped out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchasingPower {
    High,
    Good,
    Moderate,
    Limited,
}

impl PurchasingPower {
    fn from_adjusted(adjusted_salary: u32) -> Self {
        match adjusted_salary {
            100_000.. => PurchasingPower::High,
            75_000..=99_999 => PurchasingPower::Good,
            60_000..=74_999 => PurchasingPower::Moderate,
            _ => PurchasingPower::Limited,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentileThresholds {
    pub p25: u32,
    pub median: u32,
    pub p75: u32,
    /// Salary at roughly the top decile of this market.
    pub top_decile: u32,
    pub top_5_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostOfLivingView {
    pub index: f64,
    pub adjusted_salary: u32,
    pub purchasing_power: PurchasingPower,
}

/// Asks to open with, depending on appetite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationRange {
    pub conservative_ask: u32,
    pub moderate_ask: u32,
    pub aggressive_ask: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadderRung {
    pub level: String,
    pub typical_salary: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextLevel {
    pub level: String,
    pub typical_salary: u32,
    /// Step up from the current level's rung, not from the assessed salary.
    pub salary_increase: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBenchmark {
    /// The salary the benchmark was run against.
    pub assessed_salary: u32,
    pub market_position: MarketPosition,
    pub position_summary: String,
    pub percentiles: PercentileThresholds,
    pub cost_of_living: CostOfLivingView,
    pub negotiation: NegotiationRange,
    pub progression: Vec<LadderRung>,
    pub next_level: Option<NextLevel>,
}

/// Benchmarks `current_salary` against the snapshot market, falling back to
/// the market median when the caller did not supply one.
pub fn benchmark_salary(snapshot: &MarketSnapshot, current_salary: Option<u32>) -> SalaryBenchmark {
    let assessed = current_salary.unwrap_or(snapshot.salary.band.median);
    let (market_position, summary) = MarketPosition::assess(assessed);

    let median = snapshot.salary.band.median;
    let percentiles = PercentileThresholds {
        p25: snapshot.salary.band.p25,
        median,
        p75: snapshot.salary.band.p75,
        top_decile: snapshot::scale(median, 1.4),
        top_5_percent: snapshot::scale(median, 1.6),
    };

    let index = col_index(&snapshot.location);
    let adjusted_salary = (f64::from(assessed) / index).round() as u32;
    let cost_of_living = CostOfLivingView {
        index,
        adjusted_salary,
        purchasing_power: PurchasingPower::from_adjusted(adjusted_salary),
    };

    let negotiation = NegotiationRange {
        conservative_ask: snapshot::scale(assessed, 1.05),
        moderate_ask: snapshot::scale(assessed, 1.15),
        aggressive_ask: snapshot::scale(assessed, 1.25),
    };

    let mid_median = snapshot::level_median(&snapshot.domain, &snapshot.location, ExperienceLevel::Mid);
    let progression: Vec<LadderRung> = PROGRESSION_LADDER
        .iter()
        .map(|(level, multiplier)| LadderRung {
            level: level.to_string(),
            typical_salary: snapshot::scale(mid_median, *multiplier),
        })
        .collect();
    let next_level = next_rung(&progression, snapshot.experience_level);

    SalaryBenchmark {
        assessed_salary: assessed,
        market_position,
        position_summary: summary.to_string(),
        percentiles,
        cost_of_living,
        negotiation,
        progression,
        next_level,
    }
}

fn col_index(location: &str) -> f64 {
    COST_OF_LIVING_INDEX
        .iter()
        .find(|(name, _)| *name == location)
        .map(|(_, index)| *index)
        .unwrap_or(1.0)
}

fn next_rung(ladder: &[LadderRung], level: ExperienceLevel) -> Option<NextLevel> {
    let current = match level {
        ExperienceLevel::Entry => 0,
        ExperienceLevel::Mid => 1,
        ExperienceLevel::Senior => 2,
    };
    let rung = ladder.get(current)?;
    let next = ladder.get(current + 1)?;
    Some(NextLevel {
        level: next.level.clone(),
        typical_salary: next.typical_salary,
        salary_increase: next.typical_salary.saturating_sub(rung.typical_salary),
    })
}
