//! Deterministic ATS screening.
//!
//! Scores a resume the way a keyword-driven applicant tracking system would:
//! keyword coverage against the target job description (or the built-in skill
//! catalog when no description is supplied), core-section structure, and a
//! word-count readability band. Produces the same report shape on every run
//! for the same inputs.

use serde::{Deserialize, Serialize};

use crate::resume::audit;

/// Weights applied to the three score components.
const COVERAGE_WEIGHT: f64 = 0.40;
const STRUCTURE_WEIGHT: f64 = 0.35;
const READABILITY_WEIGHT: f64 = 0.25;

/// Score per detected core section (contact, experience, education, skills).
const SECTION_POINTS: usize = 25;

pub struct SkillCategory {
    pub name: &'static str,
    pub terms: &'static [&'static str],
}

/// Built-in skill catalog used when no job description is supplied, and as
/// the vocabulary for extracting target keywords from one.
pub const SKILL_CATALOG: &[SkillCategory] = &[
    SkillCategory {
        name: "technical",
        terms: &[
            "python",
            "javascript",
            "typescript",
            "rust",
            "java",
            "go",
            "sql",
            "react",
            "node.js",
            "aws",
            "docker",
            "kubernetes",
            "terraform",
            "postgresql",
            "redis",
            "graphql",
            "rest",
            "git",
            "linux",
            "machine learning",
        ],
    },
    SkillCategory {
        name: "soft",
        terms: &[
            "leadership",
            "communication",
            "teamwork",
            "problem solving",
            "collaboration",
            "mentoring",
            "time management",
            "adaptability",
        ],
    },
    SkillCategory {
        name: "role",
        terms: &[
            "software engineer",
            "developer",
            "full stack",
            "frontend",
            "backend",
            "devops",
            "architect",
            "data scientist",
            "product manager",
            "analyst",
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassLikelihood {
    High,
    Medium,
    Low,
}

impl PassLikelihood {
    fn from_score(score: u8) -> Self {
        if score >= 75 {
            PassLikelihood::High
        } else if score >= 50 {
            PassLikelihood::Medium
        } else {
            PassLikelihood::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub overall_score: u8,
    /// Fraction of target keywords found in the resume, 0.0 to 1.0.
    pub keyword_coverage: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub structure_score: u8,
    pub sections_found: Vec<String>,
    pub readability_score: u8,
    pub word_count: usize,
    pub pass_likelihood: PassLikelihood,
    pub recommendations: Vec<String>,
}

/// Screens a resume against a target job description, or against the skill
/// catalog when none is supplied.
pub fn screen_resume(resume_text: &str, job_description: Option<&str>) -> AtsReport {
    let targets = target_keywords(job_description);
    let resume_lower = resume_text.to_lowercase();

    let (matched, missing): (Vec<&str>, Vec<&str>) = targets
        .iter()
        .copied()
        .partition(|term| resume_lower.contains(term));

    let keyword_coverage = matched.len() as f64 / targets.len() as f64;

    let sections_found = core_sections(resume_text);
    let structure_score = (sections_found.len() * SECTION_POINTS).min(100) as u8;

    let word_count = audit::word_count(resume_text);
    let readability_score = readability(word_count);

    let overall = keyword_coverage * 100.0 * COVERAGE_WEIGHT
        + f64::from(structure_score) * STRUCTURE_WEIGHT
        + f64::from(readability_score) * READABILITY_WEIGHT;
    let overall_score = overall.round() as u8;

    let recommendations = build_recommendations(
        resume_text,
        keyword_coverage,
        &sections_found,
        word_count,
        job_description.is_some(),
    );

    AtsReport {
        overall_score,
        keyword_coverage,
        matched_keywords: matched.iter().map(|s| s.to_string()).collect(),
        missing_keywords: missing.iter().map(|s| s.to_string()).collect(),
        structure_score,
        sections_found: sections_found.iter().map(|s| s.to_string()).collect(),
        readability_score,
        word_count,
        pass_likelihood: PassLikelihood::from_score(overall_score),
        recommendations,
    }
}

/// Target keywords for the screen: catalog terms appearing in the job
/// description when one is supplied, the whole catalog otherwise. A
/// description mentioning no known term falls back to the catalog so the
/// coverage denominator is never zero.
fn target_keywords(job_description: Option<&str>) -> Vec<&'static str> {
    let catalog: Vec<&'static str> = SKILL_CATALOG
        .iter()
        .flat_map(|category| category.terms.iter().copied())
        .collect();

    match job_description {
        Some(description) if !description.trim().is_empty() => {
            let lower = description.to_lowercase();
            let found: Vec<&'static str> = catalog
                .iter()
                .copied()
                .filter(|term| lower.contains(term))
                .collect();
            if found.is_empty() {
                catalog
            } else {
                found
            }
        }
        _ => catalog,
    }
}

/// Core sections an ATS checks for. Contact counts when either an email or
/// phone number is present; the rest come from the header scan.
fn core_sections(resume_text: &str) -> Vec<&'static str> {
    let detected = audit::detect_sections(resume_text);
    let mut found = Vec::new();
    if audit::has_email(resume_text) || audit::has_phone(resume_text) {
        found.push("contact");
    }
    for name in ["experience", "education", "skills"] {
        if detected.iter().any(|s| s == name) {
            found.push(name);
        }
    }
    found
}

fn readability(word_count: usize) -> u8 {
    match word_count {
        300..=800 => 90,
        200..=1000 => 70,
        _ => 50,
    }
}

fn build_recommendations(
    resume_text: &str,
    coverage: f64,
    sections_found: &[&'static str],
    word_count: usize,
    has_job_description: bool,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if coverage < 0.5 {
        if has_job_description {
            recommendations
                .push("Ensure keywords from the job description are included".to_string());
        } else {
            recommendations
                .push("Include more recognized technical and role keywords".to_string());
        }
    }

    let missing_sections: Vec<&str> = ["contact", "experience", "education", "skills"]
        .into_iter()
        .filter(|name| !sections_found.contains(name))
        .collect();
    if !missing_sections.is_empty() {
        recommendations.push(format!(
            "Use standard section headings: missing {}",
            missing_sections.join(", ")
        ));
    }

    if word_count < 300 {
        recommendations.push(format!(
            "Expand the resume, {word_count} words reads as too thin"
        ));
    } else if word_count > 800 {
        recommendations.push("Tighten the resume to under two pages".to_string());
    }

    if audit::quantified_bullets(resume_text) == 0 {
        recommendations.push("Include quantified achievements in experience bullets".to_string());
    }

    recommendations
}
