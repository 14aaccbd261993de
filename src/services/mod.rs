pub mod agents;
pub mod errors;
pub mod leads;
pub mod report;
pub mod settings;

pub use errors::{ServiceError, ServiceResult};
