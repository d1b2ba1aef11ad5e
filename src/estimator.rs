//! Maximum-likelihood ability estimation
//!
//! Newton-Raphson iteration on the 2PL log-likelihood
//!
//! ```text
//! L(theta) = sum_i [ r_i * ln(p_i) + (1 - r_i) * ln(1 - p_i) ]
//! ```
//!
//! with score function `sum_i a_i * (r_i - p_i)` and observed information
//! `sum_i a_i^2 * p_i * (1 - p_i)`. Each step is damped to at most one
//! unit and the estimate is clamped into the configured theta bounds, so
//! a warm start at a bound cannot oscillate between the extremes when a
//! contradictory response arrives.
//!
//! Non-convergence within the iteration cap is a recoverable condition, not
//! an error: the last clamped value is returned and flagged. With zero
//! responses, or with all responses identical, the score function never
//! crosses zero inside the bounds; iteration then runs to a boundary and
//! the standard error falls back to a large finite sentinel so callers
//! never see NaN or infinity.

use serde::{Deserialize, Serialize};

use crate::bank::Item;
use crate::config::CatConfig;
use crate::model;

/// Finite sentinel reported when accumulated information is too small to
/// support a meaningful standard error
pub const MAX_STANDARD_ERROR: f64 = 10.0;

/// Information below this is treated as zero (flat likelihood)
const MIN_INFORMATION: f64 = 1e-9;

/// Largest Newton step taken in one iteration
const MAX_NEWTON_STEP: f64 = 1.0;

/// An ability estimate with its uncertainty
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThetaEstimate {
    /// Latent trait estimate, clamped into the configured bounds
    pub theta: f64,
    /// Standard error: `1 / sqrt(total information)`, capped at
    /// [`MAX_STANDARD_ERROR`]
    pub se: f64,
    /// Did Newton-Raphson converge within the iteration cap?
    pub converged: bool,
    /// Number of iterations performed
    pub iterations: usize,
}

impl ThetaEstimate {
    /// Estimate for a dimension with no responses yet
    pub fn initial() -> Self {
        Self {
            theta: 0.0,
            se: MAX_STANDARD_ERROR,
            converged: true,
            iterations: 0,
        }
    }
}

impl Default for ThetaEstimate {
    fn default() -> Self {
        Self::initial()
    }
}

/// Refine an ability estimate from administered items and scored responses
///
/// `items` and `responses` are parallel slices: `responses[i]` is the
/// dichotomized answer to `items[i]`. With an empty history the starting
/// estimate is returned unchanged with the sentinel standard error.
pub fn estimate(theta0: f64, items: &[Item], responses: &[bool], config: &CatConfig) -> ThetaEstimate {
    debug_assert_eq!(items.len(), responses.len());

    if items.is_empty() {
        return ThetaEstimate {
            theta: config.clamp_theta(theta0),
            se: MAX_STANDARD_ERROR,
            converged: true,
            iterations: 0,
        };
    }

    let mut theta = config.clamp_theta(theta0);
    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..config.max_iterations {
        iterations = iter + 1;

        let mut score = 0.0;
        let mut info = 0.0;
        for (item, &endorsed) in items.iter().zip(responses) {
            let p = model::probability(theta, item);
            let r = if endorsed { 1.0 } else { 0.0 };
            score += item.discrimination * (r - p);
            info += item.discrimination * item.discrimination * p * (1.0 - p);
        }

        // Flat likelihood: no Newton step is defined, keep the current
        // clamped value
        if info <= MIN_INFORMATION {
            break;
        }

        let step = (score / info).clamp(-MAX_NEWTON_STEP, MAX_NEWTON_STEP);
        let next = config.clamp_theta(theta + step);
        let delta = (next - theta).abs();
        theta = next;

        if delta < config.convergence_tolerance {
            converged = true;
            break;
        }
    }

    ThetaEstimate {
        theta,
        se: standard_error(theta, items),
        converged,
        iterations,
    }
}

/// Standard error of an estimate from the total test information at theta
pub fn standard_error(theta: f64, items: &[Item]) -> f64 {
    let total: f64 = items.iter().map(|item| model::information(theta, item)).sum();
    if total > MIN_INFORMATION {
        (1.0 / total.sqrt()).min(MAX_STANDARD_ERROR)
    } else {
        MAX_STANDARD_ERROR
    }
}
