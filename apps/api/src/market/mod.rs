//! Market intelligence: deterministic demand and salary snapshots, salary
//! benchmarking, and AI commentary, cached with a background refresh.

pub mod benchmarks;
pub mod commentary;
pub mod handlers;
pub mod prompts;
pub mod refresh;
pub mod snapshot;
