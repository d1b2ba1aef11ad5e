//! Adaptive test session state machine
//!
//! A [`TestSession`] owns one [`DimensionState`] per Big Five dimension and
//! drives them strictly in administration order: a dimension must reach its
//! own termination before the next one starts. The session holds no shared
//! mutable state; the caller owns it and passes the (read-only, shareable)
//! item bank into each call, so many sessions can run concurrently without
//! any locking.
//!
//! Per-dimension termination, evaluated after every accepted answer:
//!
//! - the per-dimension maximum is reached, or
//! - the per-dimension minimum is reached and the standard error has
//!   dropped to the target (the last open dimension additionally waits
//!   for the global question minimum), or
//! - the dimension's item pool is exhausted (forced completion).
//!
//! Derived quantities (phase, progress, expected next item) are recomputed
//! from state on demand rather than cached.

use serde::{Deserialize, Serialize};

use crate::bank::{Dimension, Item, ItemBank, ItemId};
use crate::config::CatConfig;
use crate::error::{ResponseError, SnapshotError};
use crate::estimator::{self, MAX_STANDARD_ERROR};
use crate::model;
use crate::selector;

/// A single recorded answer
///
/// Immutable once created; owned by its dimension's history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// The item that was answered
    pub item_id: ItemId,
    /// The dimension the item belongs to
    pub dimension: Dimension,
    /// Raw Likert answer, 1..=5
    pub raw_response: u8,
    /// Dichotomized answer after any reverse-scoring flip
    pub scored_response: bool,
}

/// Per-dimension testing state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionState {
    /// The dimension this state tracks
    pub dimension: Dimension,
    /// Current ability estimate
    pub theta: f64,
    /// Current standard error of the estimate
    pub se: f64,
    /// Items administered so far, in order
    pub administered: Vec<Item>,
    /// Recorded answers, parallel to `administered`
    pub responses: Vec<ResponseRecord>,
    /// Whether this dimension has terminated
    pub finished: bool,
}

impl DimensionState {
    /// Fresh state: theta at the scale midpoint, maximal uncertainty
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            theta: 0.0,
            se: MAX_STANDARD_ERROR,
            administered: Vec::new(),
            responses: Vec::new(),
            finished: false,
        }
    }

    /// Number of answers recorded for this dimension
    pub fn count(&self) -> usize {
        self.responses.len()
    }

    /// Whether the given item was already administered here
    pub fn has_administered(&self, id: ItemId) -> bool {
        self.administered.iter().any(|item| item.id == id)
    }

    /// Scored answers in administration order
    pub fn scored_responses(&self) -> Vec<bool> {
        self.responses.iter().map(|r| r.scored_response).collect()
    }

    #[cfg(test)]
    pub(crate) fn force_administer(&mut self, item: Item) {
        self.responses.push(ResponseRecord {
            item_id: item.id,
            dimension: item.dimension,
            raw_response: 5,
            scored_response: true,
        });
        self.administered.push(item);
    }
}

/// Where the session currently stands
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TestPhase {
    /// No answers recorded yet
    NotStarted,
    /// Actively administering the given dimension
    InProgress { dimension: Dimension },
    /// Every dimension has terminated
    Completed,
}

/// Session status reported to the boundary layer after each answer
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Active,
    Completed,
}

/// Outcome of an accepted answer submission
///
/// All fields are recomputed from the session state; nothing here is
/// cached.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// Whether the session is still running
    pub status: TestStatus,
    /// Total answers recorded so far
    pub total_answered: usize,
    /// Share of the maximum question count already administered, 0-100
    pub progress_percentage: f64,
    /// Updated ability estimate for the answered dimension
    pub theta: f64,
    /// Updated standard error for the answered dimension
    pub se: f64,
}

/// A full adaptive testing session over the five dimensions
///
/// Created at test start, mutated through [`TestSession::submit_response`],
/// effectively immutable once completed (further submissions are rejected).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestSession {
    config: CatConfig,
    dimensions: Vec<DimensionState>,
}

impl TestSession {
    /// Start a new session with the given configuration
    pub fn new(config: CatConfig) -> Self {
        Self {
            config,
            dimensions: Dimension::ALL.iter().map(|&d| DimensionState::new(d)).collect(),
        }
    }

    /// The session's configuration
    pub fn config(&self) -> &CatConfig {
        &self.config
    }

    /// State of one dimension
    pub fn dimension_state(&self, dimension: Dimension) -> &DimensionState {
        &self.dimensions[dimension.index()]
    }

    /// States of all five dimensions in administration order
    pub fn dimension_states(&self) -> &[DimensionState] {
        &self.dimensions
    }

    /// Total answers recorded across all dimensions
    pub fn total_answered(&self) -> usize {
        self.dimensions.iter().map(|d| d.count()).sum()
    }

    /// Whether every dimension has terminated
    pub fn is_completed(&self) -> bool {
        self.dimensions.iter().all(|d| d.finished)
    }

    /// Current phase, derived from the dimension states
    pub fn phase(&self) -> TestPhase {
        match self.dimensions.iter().find(|d| !d.finished) {
            None => TestPhase::Completed,
            Some(_) if self.total_answered() == 0 => TestPhase::NotStarted,
            Some(state) => TestPhase::InProgress {
                dimension: state.dimension,
            },
        }
    }

    /// Share of the maximum question count already administered, 0-100
    pub fn progress_percentage(&self) -> f64 {
        if self.config.max_questions == 0 {
            return 100.0;
        }
        let raw = self.total_answered() as f64 / self.config.max_questions as f64 * 100.0;
        raw.min(100.0)
    }

    /// The item to administer next, or `None` once the session is complete
    ///
    /// Idempotent: repeated calls without an intervening submission return
    /// the same item. Dimensions whose pool is empty before they begin are
    /// skipped here and closed for good when the next answer is accepted.
    pub fn current_question<'a>(&self, bank: &'a ItemBank) -> Option<&'a Item> {
        self.next_pending(bank).map(|(_, item)| item)
    }

    /// Record an answer to the expected current item
    ///
    /// Validates the raw response and the item id before touching any
    /// state: a rejected submission leaves the session exactly as it was.
    /// On success the dimension's ability estimate is refreshed, its
    /// termination criteria are evaluated, and the session advances to the
    /// next dimension or completes.
    pub fn submit_response(
        &mut self,
        bank: &ItemBank,
        item_id: ItemId,
        raw_response: u8,
    ) -> Result<AnswerOutcome, ResponseError> {
        let (dimension, item) = match self.next_pending(bank) {
            Some((dimension, item)) => (dimension, *item),
            None => return Err(ResponseError::AlreadyCompleted),
        };

        if !(1..=5).contains(&raw_response) {
            return Err(ResponseError::InvalidResponse(raw_response));
        }
        if item_id != item.id {
            return Err(ResponseError::UnexpectedItem {
                submitted: item_id,
                expected: item.id,
            });
        }

        let scored_response = model::score_response(raw_response, item.reverse_scored);
        let state = &mut self.dimensions[dimension.index()];
        state.administered.push(item);
        state.responses.push(ResponseRecord {
            item_id: item.id,
            dimension,
            raw_response,
            scored_response,
        });

        let est = estimator::estimate(
            state.theta,
            &state.administered,
            &state.scored_responses(),
            &self.config,
        );
        state.theta = est.theta;
        state.se = est.se;

        self.evaluate_termination(bank, dimension);

        Ok(AnswerOutcome {
            status: if self.is_completed() {
                TestStatus::Completed
            } else {
                TestStatus::Active
            },
            total_answered: self.total_answered(),
            progress_percentage: self.progress_percentage(),
            theta: est.theta,
            se: est.se,
        })
    }

    /// First unfinished dimension that still has an item to offer
    ///
    /// Dimensions with exhausted pools are walked past without being
    /// mutated, which keeps this (and `current_question`) a pure read.
    fn next_pending<'a>(&self, bank: &'a ItemBank) -> Option<(Dimension, &'a Item)> {
        self.dimensions
            .iter()
            .filter(|state| !state.finished)
            .find_map(|state| {
                selector::select_next(state, bank).map(|item| (state.dimension, item))
            })
    }

    /// Apply the stopping rules to the dimension that just received an
    /// answer, close every dimension with nothing left to offer, then
    /// apply the global question cap to the whole session
    fn evaluate_termination(&mut self, bank: &ItemBank, dimension: Dimension) {
        let min = self.config.min_per_dimension;
        let max = self.config.max_per_dimension;
        let target_se = self.config.target_se;
        let global_min = self.config.min_questions;
        let total = self.total_answered();

        // The global minimum gates the precision stop of the last open
        // dimension; the per-dimension minimums cover the earlier ones
        let last_open = self
            .dimensions
            .iter()
            .filter(|d| !d.finished)
            .all(|d| d.dimension == dimension);

        let state = &mut self.dimensions[dimension.index()];
        let count = state.count();
        let min_met = count >= min && (!last_open || total >= global_min);

        if count >= max || (min_met && state.se <= target_se) {
            state.finished = true;
        }

        // Exhausted pools are forced completions, distinct from the
        // precision-based rule; closing them here, after every accepted
        // answer, means a trailing empty pool can never strand the session
        // one transition short of the terminal state
        for index in 0..self.dimensions.len() {
            if !self.dimensions[index].finished
                && selector::select_next(&self.dimensions[index], bank).is_none()
            {
                self.dimensions[index].finished = true;
            }
        }

        if total >= self.config.max_questions {
            for state in &mut self.dimensions {
                state.finished = true;
            }
        }
    }

    /// Serialize the session to JSON
    ///
    /// Persistence lives outside the core; this exists so the boundary
    /// layer can store and restore sessions losslessly between requests.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self)
            .map_err(|e| SnapshotError::Serialization(format!("Failed to serialize session: {}", e)))
    }

    /// Restore a session from JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json)
            .map_err(|e| SnapshotError::Deserialization(format!("Failed to deserialize session: {}", e)))
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new(CatConfig::default())
    }
}
