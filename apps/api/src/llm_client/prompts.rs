// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona fragment shared by the career-facing prompts.
pub const CAREER_ADVISOR_PERSONA: &str = "You are an experienced career advisor \
    for early-career and mid-career technologists. \
    Be concrete and actionable. \
    Never invent employers, salaries, or credentials that were not provided.";

/// Builds a system prompt from a persona plus the JSON-only contract.
pub fn json_system(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_SYSTEM}")
}
