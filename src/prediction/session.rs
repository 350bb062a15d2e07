//! Dashboard view state
//!
//! The state a dashboard front end keeps between user actions: which tab is
//! open, which model is selected, the form values, and the prediction
//! currently on screen. Results are matched to the call that produced them
//! by ticket, never by arrival order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::PredictionResult;
use super::error::PredictionError;
use super::features::FeatureRecord;
use super::registry::ModelKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Prediction,
    Analytics,
    Models,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub selected_model: ModelKey,
    pub input: FeatureRecord,
    pub predictions: PredictionTracker,
}

/// Identity of one submitted prediction call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub id: Uuid,
    seq: u64,
}

#[derive(Debug, Clone)]
pub struct FailedAttempt {
    pub ticket: Ticket,
    pub message: String,
}

/// What happened to a completed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result is now the one on screen
    Applied,
    /// The call failed; the previous result stays on screen
    Failed,
    /// Cancelled, superseded, or older than the result or failure on screen
    Discarded,
}

#[derive(Debug, Default)]
pub struct PredictionTracker {
    next_seq: u64,
    outstanding: HashSet<Ticket>,
    current: Option<(Ticket, PredictionResult)>,
    last_failure: Option<FailedAttempt>,
}

impl PredictionTracker {
    /// Register a new call
    pub fn submit(&mut self) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            id: Uuid::new_v4(),
            seq: self.next_seq,
        };
        self.outstanding.insert(ticket);
        ticket
    }

    /// Drop interest in a call; its outcome will be discarded
    pub fn cancel(&mut self, ticket: &Ticket) -> bool {
        self.outstanding.remove(ticket)
    }

    /// Cancel every outstanding call, returning how many were dropped
    pub fn supersede_pending(&mut self) -> usize {
        let dropped = self.outstanding.len();
        self.outstanding.clear();
        dropped
    }

    pub fn pending(&self) -> usize {
        self.outstanding.len()
    }

    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> Completion {
        if !self.outstanding.remove(&ticket) {
            tracing::debug!(ticket = %ticket.id, "Discarding outcome of cancelled call");
            return Completion::Discarded;
        }

        let newer_on_screen = self
            .current
            .as_ref()
            .is_some_and(|(shown, _)| shown.seq > ticket.seq);
        if newer_on_screen {
            tracing::debug!(ticket = %ticket.id, "Discarding outcome older than current result");
            return Completion::Discarded;
        }

        match outcome {
            Ok(result) => {
                self.current = Some((ticket, result));
                Completion::Applied
            }
            Err(err) => {
                if err.is_local() {
                    tracing::debug!(ticket = %ticket.id, "Prediction rejected: {}", err);
                } else {
                    tracing::warn!(ticket = %ticket.id, "Prediction failed: {}", err);
                }
                let newer_failure = self
                    .last_failure
                    .as_ref()
                    .is_some_and(|failure| failure.ticket.seq > ticket.seq);
                if newer_failure {
                    tracing::debug!(ticket = %ticket.id, "Keeping failure of a later call");
                    return Completion::Discarded;
                }
                self.last_failure = Some(FailedAttempt {
                    ticket,
                    message: err.to_string(),
                });
                Completion::Failed
            }
        }
    }

    pub fn current(&self) -> Option<&PredictionResult> {
        self.current.as_ref().map(|(_, result)| result)
    }

    /// Ticket of the result on screen
    pub fn current_ticket(&self) -> Option<Ticket> {
        self.current.as_ref().map(|(ticket, _)| *ticket)
    }

    /// Latest failure, if it happened after the result on screen
    pub fn last_failure(&self) -> Option<&FailedAttempt> {
        let shown_seq = self.current.as_ref().map_or(0, |(t, _)| t.seq);
        self.last_failure
            .as_ref()
            .filter(|failure| failure.ticket.seq > shown_seq)
    }
}
