use thiserror::Error;

/// Errors raised while configuring synthetic data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("series must contain at least one point")]
    EmptySeries,
}
