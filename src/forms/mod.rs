//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod agent;
pub mod comment;
pub mod lead;
pub mod multi_select;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid sales agent id")]
    InvalidAgentId,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid role")]
    InvalidRole,

    #[error("comment cannot be empty")]
    EmptyComment,
}
