//! Resume services: document text extraction, AI-assisted analysis with a
//! deterministic content audit, ATS screening, and job-targeted optimization
//! (rewrite, cover letter, application insights).

pub mod analysis;
pub mod ats;
pub mod audit;
pub mod extract;
pub mod handlers;
pub mod optimizer;
pub mod prompts;
