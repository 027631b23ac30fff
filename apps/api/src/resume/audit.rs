//! Deterministic content audit.
//!
//! Structural signals computed straight from the resume text, with no model
//! involvement. The audit is merged into every analysis response so the
//! caller always gets these fields even when the AI path degrades.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAudit {
    pub word_count: usize,
    pub email_found: bool,
    pub phone_found: bool,
    pub sections_detected: Vec<String>,
    pub quantified_bullets: usize,
}

/// Section headers recognized by the structural scan, with the aliases that
/// count as a hit.
const SECTION_ALIASES: &[(&str, &[&str])] = &[
    ("summary", &["summary", "objective", "professional profile"]),
    ("experience", &["experience", "employment", "work history"]),
    ("education", &["education", "academic background"]),
    ("skills", &["skills", "technologies", "core competencies"]),
    ("projects", &["projects", "portfolio"]),
    ("certifications", &["certifications", "certificates", "licenses"]),
];

pub fn audit_content(text: &str) -> ContentAudit {
    ContentAudit {
        word_count: word_count(text),
        email_found: has_email(text),
        phone_found: has_phone(text),
        sections_detected: detect_sections(text),
        quantified_bullets: quantified_bullets(text),
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A token counts as an email when it has a non-empty local part and a
/// domain carrying an interior dot.
pub fn has_email(text: &str) -> bool {
    text.split_whitespace().any(|token| {
        let token = token.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '(' | ')' | '<' | '>'));
        match token.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        }
    })
}

/// Digit-run scan for a US-style phone number: three digits, three digits,
/// four digits, with at most one separator between the groups. Year ranges
/// and dates do not satisfy the grouping, so they never match.
pub fn has_phone(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len()).any(|start| phone_at(&chars, start))
}

fn phone_at(chars: &[char], start: usize) -> bool {
    let mut idx = start;
    for (group, len) in [3usize, 3, 4].into_iter().enumerate() {
        if group > 0 && idx < chars.len() && matches!(chars[idx], '-' | '.' | ' ') {
            idx += 1;
        }
        for _ in 0..len {
            if idx >= chars.len() || !chars[idx].is_ascii_digit() {
                return false;
            }
            idx += 1;
        }
    }
    true
}

pub fn detect_sections(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SECTION_ALIASES
        .iter()
        .filter(|(_, aliases)| aliases.iter().any(|alias| lower.contains(alias)))
        .map(|(name, _)| (*name).to_string())
        .collect()
}

/// Counts bullet lines that carry a number ("Cut deploy time by 40%").
pub fn quantified_bullets(text: &str) -> usize {
    text.lines()
        .map(str::trim_start)
        .filter(|line| matches!(line.chars().next(), Some('-' | '*' | '•')))
        .filter(|line| line.chars().any(|c| c.is_ascii_digit()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "\
Jane Doe
jane.doe@example.com | 555-123-4567 | Seattle, WA

Summary
Backend engineer with four years of production experience.

Experience
Software Engineer, Acme Corp
- Reduced API latency by 45% through query optimization
- Led migration of 3 services to Kubernetes
- Mentored junior engineers

Education
B.S. Computer Science, University of Washington

Skills
Rust, Python, PostgreSQL, Docker";

    #[test]
    fn test_detects_email() {
        assert!(has_email("reach me at jane@example.com today"));
        assert!(has_email("contact: (jane@example.com)"));
    }

    #[test]
    fn test_rejects_malformed_email() {
        assert!(!has_email("no contact info here"));
        assert!(!has_email("at-sign without domain: jane@localhost"));
        assert!(!has_email("dangling dot jane@example."));
    }

    #[test]
    fn test_detects_phone_formats() {
        assert!(has_phone("call 555-123-4567"));
        assert!(has_phone("call 555.123.4567"));
        assert!(has_phone("call 555 123 4567"));
        assert!(has_phone("call 5551234567"));
    }

    #[test]
    fn test_dates_are_not_phones() {
        assert!(!has_phone("2019-06 to 2023-08"));
        assert!(!has_phone("graduated 2023, started 2024"));
        assert!(!has_phone("version 1.2.3"));
    }

    #[test]
    fn test_detects_sections() {
        let sections = detect_sections(SAMPLE_RESUME);
        assert!(sections.iter().any(|s| s == "summary"));
        assert!(sections.iter().any(|s| s == "experience"));
        assert!(sections.iter().any(|s| s == "education"));
        assert!(sections.iter().any(|s| s == "skills"));
        assert!(!sections.iter().any(|s| s == "certifications"));
    }

    #[test]
    fn test_counts_quantified_bullets() {
        // Two bullets carry numbers, the mentoring one does not.
        assert_eq!(quantified_bullets(SAMPLE_RESUME), 2);
    }

    #[test]
    fn test_full_audit() {
        let audit = audit_content(SAMPLE_RESUME);
        assert!(audit.email_found);
        assert!(audit.phone_found);
        assert!(audit.word_count > 30);
        assert_eq!(audit.quantified_bullets, 2);
        assert_eq!(audit.sections_detected.len(), 4);
    }
}
