//! timeline-rs: zoomable, pannable timeline layout engine plus a generic
//! transaction manager with rollback and linear undo.
//!
//! The timeline is split into pure geometry ([`core`]), pure navigation
//! transforms ([`interaction`]), a backend-agnostic scene ([`render`]) and the
//! stateful view component ([`api`]). [`transaction`] is independent of all of
//! them.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod transaction;

pub use api::{TimelineAccessors, TimelineView, TimelineViewConfig};
pub use error::{TimelineError, TimelineResult};
pub use transaction::{Transaction, TransactionManager};
