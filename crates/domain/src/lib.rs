//! Domain layer of the driver sync pipeline: wire payloads, the merged
//! driver record, the component seams, the pure join, and the orchestrator
//! that sequences one run.

pub mod entities;
pub mod join;
pub mod services;
pub mod traits;

pub use entities::{ApiToken, AssignmentMap, DispatcherEntry, DriverRecord, RawDriver};
pub use join::join_drivers;
pub use services::{SyncOutcome, SyncService};
pub use traits::{DispatcherFetcher, DriverFetcher, DriverRepository, TokenProvider};
