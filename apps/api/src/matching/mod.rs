// Job matching: listing synthesis, deterministic scoring heuristics,
// AI-assisted match analysis, and search-level insights.

pub mod analyzer;
pub mod boards;
pub mod handlers;
pub mod insights;
pub mod prompts;
pub mod scoring;
