//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract for parcels.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Parcel::validate()` before persistence.
//! - Lifecycle-gated writes are single conditional statements; there is no
//!   read-then-write window between the status check and the mutation.

pub mod parcel_repo;
