use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Description must not be empty")]
    EmptyDescription,
    #[error("Unknown id policy: {0} (expected follow-last or monotonic)")]
    UnknownIdPolicy(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
