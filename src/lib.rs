//! # DEPSCOPE
//!
//! Lightweight dependency graph extraction for quick architectural assessment.
//!
//! DEPSCOPE matches import/include statements line by line instead of parsing,
//! resolves them heuristically to files in the same repository, and derives
//! structural insights from the result: central files, entry points, isolated
//! files and aggregate coupling metrics. Matching favours recall over
//! precision; the report is advisory.
//!
//! ## Pipeline
//!
//! 1. **Extraction** (`parsers`): per-extension regex patterns, run in parallel
//! 2. **Resolution** (`core::resolver`): per-language heuristics build `imported_by`
//! 3. **Graph** (`core::graph`): substring heuristic builds the centrality graph
//! 4. **Analytics** (`core::analytics`): centrality, entry points, metrics
//!
//! ## Output Formats
//!
//! - **Markdown**: human-readable summary
//! - **JSON**: the full report

pub mod core;
pub mod formatters;
pub mod parsers;
