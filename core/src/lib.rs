//! finops-core: analytics and recommendation engine for the spend dashboard.
//!
//! Data flows one way:
//!   feed → aggregator / benchmark → synthesizer → review
//!
//! RULES:
//!   - Every component is a pure function of its inputs.
//!   - All randomness flows through an injected JitterSource or RngBank.
//!   - Nothing here holds state across analysis passes.

pub mod aggregator;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod review;
pub mod rng;
pub mod synthesizer;
pub mod types;
