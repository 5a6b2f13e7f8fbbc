//! Core types for the hierarchy engine

mod employee;
mod ids;
mod node;
mod snapshot;

pub use employee::{EmployeeRecord, SupervisorRef};
pub use ids::EmployeeId;
pub use node::{Forest, HierarchyNode};
pub use snapshot::Snapshot;
