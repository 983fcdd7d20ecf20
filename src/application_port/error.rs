use crate::domain_model::{ArticleIdError, CredentialsError};
use crate::domain_port::RepoError;

/// The four outcome kinds shared by services and handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    BackendFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendFailure {
    #[error("store error: {0}")]
    Store(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("operation timed out")]
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("backend failure: {0}")]
    BackendFailure(#[from] BackendFailure),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::NotFound => ErrorKind::NotFound,
            AppError::Conflict => ErrorKind::Conflict,
            AppError::BackendFailure(_) => ErrorKind::BackendFailure,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Duplicate => AppError::Conflict,
            RepoError::Store(e) => BackendFailure::Store(e).into(),
            RepoError::Decode(e) => BackendFailure::Decode(e).into(),
            RepoError::Internal(e) => BackendFailure::Internal(e).into(),
            RepoError::Cancelled => BackendFailure::Cancelled.into(),
            RepoError::TimedOut => BackendFailure::TimedOut.into(),
        }
    }
}

impl From<ArticleIdError> for AppError {
    fn from(error: ArticleIdError) -> Self {
        AppError::InvalidInput(error.to_string())
    }
}

impl From<CredentialsError> for AppError {
    fn from(error: CredentialsError) -> Self {
        AppError::InvalidInput(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_repo_error_lands_on_a_kind() {
        let cases = [
            (RepoError::NotFound, ErrorKind::NotFound),
            (RepoError::Duplicate, ErrorKind::Conflict),
            (RepoError::Store("refused".into()), ErrorKind::BackendFailure),
            (RepoError::Decode("bad column".into()), ErrorKind::BackendFailure),
            (RepoError::Internal("join".into()), ErrorKind::BackendFailure),
            (RepoError::Cancelled, ErrorKind::BackendFailure),
            (RepoError::TimedOut, ErrorKind::BackendFailure),
        ];
        for (repo_error, kind) in cases {
            assert_eq!(AppError::from(repo_error).kind(), kind);
        }
    }

    #[test]
    fn cancellation_stays_recognisable() {
        assert_eq!(
            AppError::from(RepoError::Cancelled),
            AppError::BackendFailure(BackendFailure::Cancelled)
        );
    }

    #[test]
    fn validation_errors_are_invalid_input() {
        assert_eq!(
            AppError::from(ArticleIdError::Missing),
            AppError::InvalidInput("id parameter is required".into())
        );
        assert_eq!(
            AppError::from(CredentialsError::EmptyPassword).kind(),
            ErrorKind::InvalidInput
        );
    }
}
