//! Simulated respondents for end-to-end exercising of the engine
//!
//! A [`SimulatedRespondent`] holds a true ability per dimension and
//! answers items stochastically under the response model: it endorses an
//! item with the model probability at its true ability, then translates
//! the endorsement into a raw Likert answer (inverting it for
//! reverse-scored items so the scored response still reflects the draw).
//! Useful for recovery studies and for driving whole sessions in tests.

use rand::Rng;

use crate::bank::{Dimension, Item, ItemBank};
use crate::config::CatConfig;
use crate::error::ResponseError;
use crate::model;
use crate::session::TestSession;

/// A respondent with known true abilities
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedRespondent {
    /// True theta per dimension, in administration order
    pub abilities: [f64; 5],
}

impl SimulatedRespondent {
    /// Respondent with the given per-dimension abilities
    pub fn new(abilities: [f64; 5]) -> Self {
        Self { abilities }
    }

    /// Respondent with the same ability on every dimension
    pub fn with_uniform(theta: f64) -> Self {
        Self::new([theta; 5])
    }

    /// True ability on one dimension
    pub fn ability(&self, dimension: Dimension) -> f64 {
        self.abilities[dimension.index()]
    }

    /// Draw a raw Likert answer for the given item
    ///
    /// The endorsement draw uses the model probability at the true
    /// ability; the raw answer is then chosen so that scoring recovers
    /// exactly that draw, including the reverse-scoring flip.
    pub fn answer<R: Rng + ?Sized>(&self, item: &Item, rng: &mut R) -> u8 {
        let p = model::probability(self.ability(item.dimension), item);
        let endorse = rng.gen_bool(p);
        let raw = if endorse { 5 } else { 1 };
        if item.reverse_scored {
            6 - raw
        } else {
            raw
        }
    }

    /// Drive a fresh session to completion against the given bank
    pub fn run<R: Rng + ?Sized>(
        &self,
        bank: &ItemBank,
        config: CatConfig,
        rng: &mut R,
    ) -> Result<TestSession, ResponseError> {
        let mut session = TestSession::new(config);
        while let Some(item) = session.current_question(bank).copied() {
            let raw = self.answer(&item, rng);
            session.submit_response(bank, item.id, raw)?;
        }
        Ok(session)
    }
}
