//! Nudge review board — accept/ignore bookkeeping over one analysis pass.
//!
//! The board never changes the nudges themselves. Accepting or ignoring
//! only moves an id into the matching set; active = neither.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    model::Nudge,
    types::{EntityId, Money, Percent},
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct NudgeBoard {
    nudges: Vec<Nudge>,
    accepted: BTreeSet<EntityId>,
    ignored: BTreeSet<EntityId>,
}

impl NudgeBoard {
    pub fn new(nudges: Vec<Nudge>) -> Self {
        Self {
            nudges,
            accepted: BTreeSet::new(),
            ignored: BTreeSet::new(),
        }
    }

    pub fn accept(&mut self, nudge_id: &str) -> AnalyticsResult<()> {
        self.decide(nudge_id, Decision::Accepted)
    }

    pub fn ignore(&mut self, nudge_id: &str) -> AnalyticsResult<()> {
        self.decide(nudge_id, Decision::Ignored)
    }

    /// Record a decision. A later decision replaces an earlier one.
    pub fn decide(&mut self, nudge_id: &str, decision: Decision) -> AnalyticsResult<()> {
        if !self.nudges.iter().any(|n| n.id == nudge_id) {
            return Err(AnalyticsError::InvalidRecord {
                field: "nudge_id",
                reason: format!("no nudge with id '{nudge_id}'"),
            });
        }
        self.accepted.remove(nudge_id);
        self.ignored.remove(nudge_id);
        match decision {
            Decision::Accepted => self.accepted.insert(nudge_id.to_string()),
            Decision::Ignored  => self.ignored.insert(nudge_id.to_string()),
        };
        log::debug!("nudge {nudge_id} marked {decision:?}");
        Ok(())
    }

    pub fn decision(&self, nudge_id: &str) -> Option<Decision> {
        if self.accepted.contains(nudge_id) {
            Some(Decision::Accepted)
        } else if self.ignored.contains(nudge_id) {
            Some(Decision::Ignored)
        } else {
            None
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &Nudge> {
        self.nudges.iter().filter(|n| self.decision(&n.id).is_none())
    }

    pub fn accepted(&self) -> impl Iterator<Item = &Nudge> {
        self.nudges.iter().filter(|n| self.accepted.contains(&n.id))
    }

    pub fn total_potential_impact(&self) -> Money {
        self.active().map(|n| n.impact).sum()
    }

    /// Mean confidence of active nudges, whole percent. 0 when none are active.
    pub fn average_confidence(&self) -> Percent {
        let (sum, count) = self
            .active()
            .fold((0.0, 0usize), |(sum, count), n| (sum + n.confidence, count + 1));
        if count == 0 {
            0.0
        } else {
            (sum / count as f64).round()
        }
    }
}
