//! Domain model for parcel tracking.
//!
//! # Responsibility
//! - Define the canonical parcel record used by core business logic.
//! - Keep the lifecycle-gating rule a pure predicate, independent of storage.
//!
//! # Invariants
//! - Every persisted parcel is identified by a unique storage-assigned
//!   `number`.
//! - Address changes and deletion are legal only while a parcel is still
//!   `registered`.

pub mod parcel;
