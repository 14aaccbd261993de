//! DTO modules that bridge services with templates.

pub mod agents;
pub mod leads;
pub mod settings;
