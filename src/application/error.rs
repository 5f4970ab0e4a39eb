use thiserror::Error;

use crate::domain::{
    IdsExhausted, ParseCategoryError, ParseCentsError, ParseKindError, RecordId, RecordKind,
    RecordNotFound,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{kind} #{id} not found")]
    RecordNotFound { kind: RecordKind, id: RecordId },

    #[error(transparent)]
    IdsExhausted(#[from] IdsExhausted),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseCentsError),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(#[from] ParseCategoryError),

    #[error("Invalid record kind: {0}")]
    InvalidKind(#[from] ParseKindError),

    #[error("Data provider error: {0}")]
    Provider(#[from] anyhow::Error),
}

impl From<RecordNotFound> for AppError {
    fn from(err: RecordNotFound) -> Self {
        AppError::RecordNotFound {
            kind: err.kind,
            id: err.id,
        }
    }
}
