use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid email format")]
    InvalidEmail,
    #[error("nickname must be between {min} and {max} characters")]
    NicknameLength { min: usize, max: usize },
    #[error("focus must be between 0 and {max}")]
    FocusOutOfRange { max: u32 },
    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },
    #[error("unknown region '{0}', expected europe, asia or west")]
    UnknownRegion(String),
    #[error("unknown item kind '{0}', expected refine or resource")]
    UnknownItemKind(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("invalid tier '{0}'")]
    InvalidTier(String),
    #[error("unknown cap policy '{0}', expected leave_stale or clamp_and_commit")]
    UnknownCapPolicy(String),
}
