//! Error conversion glue between the `data` layer and the services.
//!
//! The domain and form layers must not depend on service error types, so the
//! conversions live here and only compile with the `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
