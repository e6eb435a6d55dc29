//! Analysis Pipeline
//!
//! Turns validated inputs into a finished report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TechniqueInput (CSV, CLI flags, or seed dataset)
//!       │
//!       ▼
//! ┌─────────────┐
//! │ statistics  │  Metrics + Wilson CIs per technique (parallel), ranking
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Ratios, requirement checks, summary
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`statistics`] - Parallel metric computation and ranking
//! - [`report`] - Report building
//! - [`formatting`] - Human-readable output formatting

mod formatting;
mod report;
mod statistics;

// Re-export public API
pub use formatting::format_human_output;
pub use report::{ReportContext, build_report};
pub use statistics::analyze_techniques;
