//! Interaction store: records query/response pairs, their feedback and training status
//!
//! (c) Softlandia 2025

pub mod api;
pub mod config;
pub mod infrastructure;
