//! Two-parameter logistic (2PL) response model
//!
//! The 2PL model gives the probability that a respondent at trait level
//! theta endorses an item with difficulty `b` and discrimination `a`:
//!
//! ```text
//! P(endorse | theta) = 1 / (1 + exp(-a * (theta - b)))
//! ```
//!
//! Fisher information, `a^2 * p * (1 - p)`, measures how precisely the item
//! constrains the estimate of theta at a given trait level; it peaks where
//! theta equals the item's difficulty.
//!
//! All functions here are pure and never fail for finite inputs. The logit
//! is clamped before exponentiation so probabilities stay strictly inside
//! (0, 1) and the log-likelihood gradient remains defined.

use crate::bank::Item;

/// Clamp bound on the logit `a * (theta - b)` before exponentiation
///
/// At +-35 the sigmoid is within a few ulps of its asymptote but still
/// strictly inside (0, 1) in f64.
pub const LOGIT_BOUND: f64 = 35.0;

/// Likert raw responses at or above this count as endorsement (after any
/// reverse-scoring flip)
pub const ENDORSE_THRESHOLD: u8 = 3;

/// Probability of an endorsing response at the given trait level
///
/// Always strictly inside (0, 1) for finite inputs.
pub fn probability(theta: f64, item: &Item) -> f64 {
    let logit = item.discrimination * (theta - item.difficulty);
    sigmoid(logit.clamp(-LOGIT_BOUND, LOGIT_BOUND))
}

/// Fisher information of an item at the given trait level
pub fn information(theta: f64, item: &Item) -> f64 {
    let p = probability(theta, item);
    item.discrimination * item.discrimination * p * (1.0 - p)
}

/// Dichotomize a raw 1-5 Likert response into endorse/reject
///
/// Reverse-scored items flip the raw value (`6 - raw`) before thresholding,
/// so a scored `true` always means endorsement of the trait itself. The
/// caller is responsible for validating that `raw` lies in 1..=5.
pub fn score_response(raw: u8, reverse_scored: bool) -> bool {
    let effective = if reverse_scored { 6 - raw } else { raw };
    effective >= ENDORSE_THRESHOLD
}

/// Sigmoid function: 1 / (1 + exp(-x))
///
/// Split into two branches for numerical stability at large |x|.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let ex = x.exp();
        ex / (1.0 + ex)
    }
}
