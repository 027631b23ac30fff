//! Profile persistence and the graduation outlook endpoint.

pub mod handlers;
