//! Domain records exchanged with the collaborator API.

pub mod agent;
pub mod lead;
pub mod types;
