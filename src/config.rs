//! Test configuration
//!
//! Question-count bounds, precision targets and numerical-stability knobs
//! for the adaptive engine. Defaults follow the standard 25-50 question
//! Big Five protocol: five dimensions, 5-10 questions each, stopping early
//! once the standard error drops to 0.3.

use serde::{Deserialize, Serialize};

/// Score thresholds mapping a normalized 1-5 score to a qualitative level
///
/// Cutpoints are policy, not algorithm, so they are injectable rather than
/// hardcoded in the report generator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelCutpoints {
    /// Scores strictly below this are `Low`
    pub low_below: f64,
    /// Scores at or above this are `High`; everything between is `Medium`
    pub high_from: f64,
}

impl Default for LevelCutpoints {
    fn default() -> Self {
        Self {
            low_below: 2.0,
            high_from: 3.5,
        }
    }
}

/// Configuration for the adaptive test engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatConfig {
    /// Maximum questions across the whole session
    pub max_questions: usize,
    /// Minimum questions across the whole session; the last open dimension
    /// cannot stop on precision until this many answers are recorded
    pub min_questions: usize,
    /// Maximum questions per dimension
    pub max_per_dimension: usize,
    /// Minimum questions per dimension before precision-based stopping applies
    pub min_per_dimension: usize,
    /// Target standard error; a dimension stops once its SE drops to this
    pub target_se: f64,
    /// Lower bound for ability estimates
    pub min_theta: f64,
    /// Upper bound for ability estimates
    pub max_theta: f64,
    /// Newton-Raphson convergence tolerance on successive theta values
    pub convergence_tolerance: f64,
    /// Newton-Raphson iteration cap; non-convergence is recoverable
    pub max_iterations: usize,
    /// Score-to-level thresholds for the report
    pub cutpoints: LevelCutpoints,
}

impl Default for CatConfig {
    fn default() -> Self {
        Self {
            max_questions: 50,
            min_questions: 25,
            max_per_dimension: 10,
            min_per_dimension: 5,
            target_se: 0.3,
            min_theta: -3.0,
            max_theta: 3.0,
            convergence_tolerance: 1e-4,
            max_iterations: 20,
            cutpoints: LevelCutpoints::default(),
        }
    }
}

impl CatConfig {
    /// Set the per-dimension question bounds
    pub fn with_per_dimension_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_per_dimension = min;
        self.max_per_dimension = max;
        self
    }

    /// Set the target standard error
    pub fn with_target_se(mut self, target: f64) -> Self {
        self.target_se = target;
        self
    }

    /// Set the ability-estimate bounds
    pub fn with_theta_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_theta = min;
        self.max_theta = max;
        self
    }

    /// Set the score-to-level cutpoints
    pub fn with_cutpoints(mut self, cutpoints: LevelCutpoints) -> Self {
        self.cutpoints = cutpoints;
        self
    }

    /// Width of the theta range
    pub fn theta_range(&self) -> f64 {
        self.max_theta - self.min_theta
    }

    /// Clamp a theta value into the configured bounds
    pub fn clamp_theta(&self, theta: f64) -> f64 {
        theta.clamp(self.min_theta, self.max_theta)
    }
}
