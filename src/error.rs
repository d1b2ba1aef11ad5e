//! Error types for bigfive-cat
//!
//! This module defines all error types used throughout the library.
//!
//! Only caller-input violations are surfaced as errors. Numerical
//! non-convergence and item-pool exhaustion are recoverable conditions
//! handled internally by the estimator and the session state machine.

use thiserror::Error;

use crate::bank::ItemId;

/// Error type for item-bank construction
///
/// The bank validates external item payloads once, at load time, so that
/// malformed parameters never reach the numerical core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BankError {
    /// The same item id appeared more than once
    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),

    /// An item carried a psychometric parameter the 2PL model cannot use
    #[error("Invalid {parameter} for item {item}: {value}")]
    InvalidParameter {
        item: ItemId,
        parameter: &'static str,
        value: f64,
    },
}

/// Error type for answer submissions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResponseError {
    /// Raw response outside the 1-5 Likert range
    #[error("Raw response {0} is outside the Likert range 1..=5")]
    InvalidResponse(u8),

    /// Submitted item does not match the expected next item
    ///
    /// Protects session state against out-of-order or replayed submissions.
    #[error("Item {submitted} does not match the expected item {expected}")]
    UnexpectedItem { submitted: ItemId, expected: ItemId },

    /// The test already reached its terminal state
    #[error("Test is already completed")]
    AlreadyCompleted,
}

/// Error type for report queries
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    /// Report requested before all dimensions terminated
    #[error("Test not completed yet: {answered} questions answered so far")]
    NotCompleted { answered: usize },
}

/// Error type for session snapshot serialization
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Top-level error type for adaptive-testing operations
#[derive(Debug, Error)]
pub enum CatError {
    /// Item-bank error
    #[error("Item bank error: {0}")]
    Bank(#[from] BankError),

    /// Answer submission error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Report error
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Snapshot error
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result type alias for adaptive-testing operations
pub type CatResult<T> = Result<T, CatError>;
