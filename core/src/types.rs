//! Shared primitive types used across the engine.

/// A stable, unique identifier for any record (transaction, campaign, nudge).
pub type EntityId = String;

/// A monetary amount in whole-currency units.
pub type Money = f64;

/// A percentage on the 0–100 scale.
pub type Percent = f64;

/// ROI below this marks a campaign as underperforming.
pub const UNDERPERFORMING_ROI: f64 = 0.7;

/// ROI above this marks a campaign as a high performer.
pub const HIGH_PERFORMER_ROI: f64 = 1.5;
