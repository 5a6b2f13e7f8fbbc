//! Organizational hierarchy construction and traversal
//!
//! This crate turns a flat snapshot of employee records, each naming zero or
//! more supervisors, into a forest of reporting-line trees, and tracks which
//! nodes of that forest are expanded in a tree view.
//!
//! ## Overview
//!
//! - **Inferred roots** - An employee is a root when none of its supervisor
//!   references resolve inside the snapshot
//! - **Multiple supervisors** - An employee is copied under every supervisor
//!   it reports to; copies are matched by id
//! - **Tolerant** - Dangling and self references are dropped, never errors
//! - **Separate expansion state** - Expanded ids live outside the forest and
//!   are re-seeded only when a new snapshot arrives
//!
//! ## Basic Usage
//!
//! ```rust
//! use orgchart::{select_forest, EmployeeRecord, ExpansionState, SupervisorIndex};
//!
//! let employees = vec![
//!     EmployeeRecord::new("alice", "Alice"),
//!     EmployeeRecord::new("bob", "Bob").reports_to("alice"),
//!     EmployeeRecord::new("carol", "Carol").reports_to("bob"),
//! ];
//!
//! let forest = select_forest(None, &employees);
//! let supervisors = SupervisorIndex::build(&employees);
//! let mut state = ExpansionState::seeded(&forest);
//!
//! assert!(state.is_expanded("bob"));
//! assert!(!state.is_expanded("carol"));
//! assert_eq!(supervisors.supervisors_of("carol")[0].id.as_str(), "bob");
//!
//! state.collapse_all();
//! assert!(state.is_empty());
//! ```
//!
//! For a long-lived view backed by a [`HierarchyDataSource`], use
//! [`HierarchySession`].

pub mod builder;
mod error;
pub mod expansion;
pub mod selector;
pub mod session;
pub mod source;
pub mod supervisors;
pub mod types;
pub mod visible;

pub use builder::{build_hierarchy, CyclePolicy, HierarchyBuilder};
pub use error::{OrgChartError, Result};
pub use expansion::{ExpansionState, INITIAL_EXPANSION_DEPTH};
pub use selector::{select_forest, ForestSelector, ForestSource};
pub use session::{HierarchySession, RefreshOutcome, SessionOptions};
pub use source::{HierarchyDataSource, InMemorySource, JsonFileSource};
pub use supervisors::SupervisorIndex;
pub use types::{EmployeeId, EmployeeRecord, Forest, HierarchyNode, Snapshot, SupervisorRef};
pub use visible::{visible_rows, OwnedVisibleRow, VisibleRow};
