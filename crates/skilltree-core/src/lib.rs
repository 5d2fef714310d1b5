//! Core types for the skill-tree prerequisite graph engine.
//!
//! Provides the graph data model ([`model::TrickGraph`]), entity and edge types,
//! render-ready output structures, configuration, and versioned JSON schema.

pub mod config;
pub mod model;
pub mod schema;
