//! Report generation for completed sessions
//!
//! Maps each dimension's final ability estimate onto a 1-5 score scale,
//! classifies it into a level using the configured cutpoints, and wraps
//! the five scores in a short narrative summary with per-level
//! recommendations. Pure functions of the completed session; calling
//! them twice yields identical reports.

use serde::{Deserialize, Serialize};

use crate::bank::Dimension;
use crate::config::LevelCutpoints;
use crate::error::ReportError;
use crate::session::TestSession;

/// Qualitative trait level
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Classify a 1-5 score against the given cutpoints
    pub fn from_score(score: f64, cutpoints: &LevelCutpoints) -> Self {
        if score < cutpoints.low_below {
            Level::Low
        } else if score < cutpoints.high_from {
            Level::Medium
        } else {
            Level::High
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "Low"),
            Level::Medium => write!(f, "Medium"),
            Level::High => write!(f, "High"),
        }
    }
}

/// Final result for one dimension
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// The dimension
    pub dimension: Dimension,
    /// Ability mapped onto the 1-5 scale
    pub score: f64,
    /// Qualitative classification of the score
    pub level: Level,
    /// Final ability estimate on the theta scale
    pub theta: f64,
    /// Final standard error of the estimate
    pub se: f64,
    /// Number of items this dimension used
    pub items_administered: usize,
}

/// Complete assessment report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// One score per dimension, in administration order
    pub scores: Vec<DimensionScore>,
    /// Total items administered across the session
    pub total_answered: usize,
    /// Short narrative over the five levels
    pub summary: String,
    /// One guidance line per dimension
    pub recommendations: Vec<String>,
}

/// Build the report for a completed session
///
/// Fails with [`ReportError::NotCompleted`] while any dimension is still
/// open; a report never exists for a partial session.
pub fn build_report(session: &TestSession) -> Result<Report, ReportError> {
    if !session.is_completed() {
        return Err(ReportError::NotCompleted {
            answered: session.total_answered(),
        });
    }

    let config = session.config();
    let range = config.theta_range();

    let scores: Vec<DimensionScore> = session
        .dimension_states()
        .iter()
        .map(|state| {
            // Linear map of [min_theta, max_theta] onto [1, 5]
            let score = (state.theta - config.min_theta) / range * 4.0 + 1.0;
            DimensionScore {
                dimension: state.dimension,
                score,
                level: Level::from_score(score, &config.cutpoints),
                theta: state.theta,
                se: state.se,
                items_administered: state.count(),
            }
        })
        .collect();

    let summary = summarize(&scores);
    let recommendations = scores.iter().map(recommend).collect();

    Ok(Report {
        scores,
        total_answered: session.total_answered(),
        summary,
        recommendations,
    })
}

fn summarize(scores: &[DimensionScore]) -> String {
    let highs: Vec<&str> = scores
        .iter()
        .filter(|s| s.level == Level::High)
        .map(|s| s.dimension.name())
        .collect();
    let lows: Vec<&str> = scores
        .iter()
        .filter(|s| s.level == Level::Low)
        .map(|s| s.dimension.name())
        .collect();

    let mut parts = Vec::new();
    if !highs.is_empty() {
        parts.push(format!("Pronounced traits: {}.", highs.join(", ")));
    }
    if !lows.is_empty() {
        parts.push(format!("Less pronounced traits: {}.", lows.join(", ")));
    }
    if parts.is_empty() {
        parts.push("All five traits fall in the medium range, indicating a balanced profile.".to_string());
    }
    parts.join(" ")
}

fn recommend(score: &DimensionScore) -> String {
    let trait_name = score.dimension.name();
    match score.level {
        Level::High => format!(
            "{}: a clear strength; look for roles and activities that draw on it.",
            trait_name
        ),
        Level::Medium => format!(
            "{}: flexibly expressed; context determines how strongly it shows.",
            trait_name
        ),
        Level::Low => format!(
            "{}: less characteristic; situations demanding it may take more deliberate effort.",
            trait_name
        ),
    }
}
