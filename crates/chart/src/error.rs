use coinboard_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("no points to render")]
    EmptySeries,

    #[error(transparent)]
    Domain(#[from] DomainError),
}
