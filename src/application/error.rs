use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Member already exists: {0}")]
    DuplicateName(String),

    #[error("Member name cannot be empty")]
    EmptyMemberName,

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("No member selected")]
    SelectionRequired,

    #[error("Invalid contribution: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
