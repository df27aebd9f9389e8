//! # Mindset Analytics Engine
//!
//! This crate turns a trader's journal into psychology analytics: which emotions
//! show up, which side of the market they push towards, and how disciplined the
//! overall emotional profile is.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0) and its settings from `configuration`.
//! - **Stateless Calculation:** The `AnalyticsEngine` takes a snapshot of trades and
//!   produces a `PsychologyReport`. Nothing is cached between calls, so an engine can be
//!   shared freely across threads.
//! - **Always Answers:** Scoring never returns an error to the caller. When there is
//!   nothing meaningful to score, the result is the neutral 50/50 reading.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Runs aggregation and scoring over a slice of `TradeRecord`s.
//! - `EmotionAggregator` / `PsychologyScorer`: The two stages, usable on their own.
//! - `EmotionDatum`, `PsychologicalMetrics`, `PsychologyReport`: The output types.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod emotions;
pub mod engine;
pub mod error;
pub mod psychology;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use emotions::{EmotionAggregate, EmotionAggregator};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use psychology::{CategoryScores, PsychologyScorer};
pub use report::{EmotionDatum, Leaning, LeaningSide, PsychologicalMetrics, PsychologyReport};
