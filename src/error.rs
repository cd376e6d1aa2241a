//! Error taxonomy for the parts of the public API that can fail outside of
//! ordinary backtracking. Inconsistency discovered during search or
//! propagation is not represented here: it is recoverable control flow and
//! stays in the existing `Result<State<U, E>, ()>` (`SResult`) idiom used
//! throughout `state`. `CoreError` covers everything a caller needs to
//! actually react to: bad configuration, exhausted resources, cancellation,
//! and bugs in user-supplied constraints/plugins.
use thiserror::Error;

/// Errors surfaced by the finite-domain model, the hybrid store, and the
/// tabling/SLG engines.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("constraint rejected at add-time: {reason}")]
    AddTimeValidation { reason: String },

    #[error("resource exhausted: {resource} (limit {limit})")]
    ResourceExhausted { resource: &'static str, limit: u64 },

    #[error("operation cancelled after {completed} unit(s) of work")]
    Cancelled { completed: u64 },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("invariant violation in {component}: {message}")]
    InvariantViolation {
        component: &'static str,
        message: String,
    },
}

impl CoreError {
    pub fn add_time_validation<S: Into<String>>(reason: S) -> Self {
        CoreError::AddTimeValidation {
            reason: reason.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        CoreError::Configuration {
            message: message.into(),
        }
    }

    pub fn invariant<S: Into<String>>(component: &'static str, message: S) -> Self {
        CoreError::InvariantViolation {
            component,
            message: message.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
