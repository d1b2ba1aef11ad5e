//! # bigfive-cat
//!
//! A Computerized Adaptive Testing engine for Big Five personality assessment.
//!
//! This library implements the full adaptive loop: a two-parameter logistic
//! response model, maximum-likelihood ability estimation, maximum-information
//! item selection, and a sequential per-dimension test controller with
//! precision-based stopping rules.
//!
//! ## Core Concepts
//!
//! - **Ability as Latent Trait**: each dimension's standing is a theta on a
//!   bounded scale, estimated by Newton-Raphson from dichotomized answers
//! - **Information-Driven Selection**: the next item is always the one that
//!   is most informative at the current ability estimate
//! - **Adaptive Stopping**: dimensions terminate on precision, item caps, or
//!   pool exhaustion, so test length adapts to the respondent
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bigfive_cat::prelude::*;
//!
//! let bank = ItemBank::new(items)?;
//! let mut session = TestSession::new(CatConfig::default());
//!
//! while let Some(item) = session.current_question(&bank).copied() {
//!     let raw = ask_user(&item);
//!     let outcome = session.submit_response(&bank, item.id, raw)?;
//!     println!("progress: {:.0}%", outcome.progress_percentage);
//! }
//!
//! let report = build_report(&session)?;
//! ```

pub mod bank;
pub mod config;
pub mod error;
pub mod estimator;
pub mod model;
pub mod report;
pub mod selector;
pub mod session;
pub mod simulate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bank::{Dimension, Item, ItemBank, ItemId};
    pub use crate::config::{CatConfig, LevelCutpoints};
    pub use crate::error::*;
    pub use crate::estimator::{estimate, standard_error, ThetaEstimate, MAX_STANDARD_ERROR};
    pub use crate::model::{information, probability, score_response, ENDORSE_THRESHOLD};
    pub use crate::report::{build_report, DimensionScore, Level, Report};
    pub use crate::selector::select_next;
    pub use crate::session::{
        AnswerOutcome, DimensionState, ResponseRecord, TestPhase, TestSession, TestStatus,
    };
    pub use crate::simulate::SimulatedRespondent;
}
