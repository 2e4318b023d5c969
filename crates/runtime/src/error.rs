//! Run failure carrying the partial history.

use plan_core::{ErrorCategory, PlanError};
use thiserror::Error;

use crate::summary::StepRecord;

/// A run that stopped on an error.
///
/// Every [`PlanError`] is fatal; the steps executed before it are kept so
/// the driver can still report them.
#[derive(Debug, Error)]
#[error("run stopped after {} steps: {error}", .steps.len())]
pub struct RunFailure {
    pub steps: Vec<StepRecord>,
    #[source]
    pub error: PlanError,
}

impl RunFailure {
    pub fn category(&self) -> ErrorCategory {
        self.error.category()
    }

    pub fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}
