//! Response types of the dashboard endpoints.

pub mod catalog;
pub mod dashboard;
