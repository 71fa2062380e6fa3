//! Parcel domain model.
//!
//! # Responsibility
//! - Define the parcel record and its lifecycle status.
//! - Express the status-gating rule as a pure function so it stays testable
//!   without a database.
//!
//! # Invariants
//! - `number` is assigned by storage on insert; `0` means "not persisted yet".
//! - `client` and `created_at` never change after creation.
//! - Only `ParcelStatus::Registered` admits address changes and deletion.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted shape for `created_at`: RFC-3339 in UTC, e.g.
/// `2026-08-06T09:00:00Z` (fractional seconds and `+00:00` allowed).
static CREATED_AT_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|\+00:00)$")
        .expect("created_at pattern is a valid regex")
});

/// Lifecycle status of a parcel.
///
/// The store does not restrict transitions between these values; the status
/// only gates the side effects of other mutations (address change, delete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Accepted into the system; still mutable.
    Registered,
    /// Handed over for delivery.
    Sent,
    /// Received by the client.
    Delivered,
}

impl ParcelStatus {
    /// Pure gating predicate: whether address changes and deletion are
    /// allowed in this status.
    pub fn allows_mutation(self) -> bool {
        matches!(self, Self::Registered)
    }

    /// Storage representation of the status.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }

    /// Parses a persisted status value. Returns `None` for unknown text.
    pub fn parse_db_str(value: &str) -> Option<Self> {
        match value {
            "registered" => Some(Self::Registered),
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

/// Validation failure for a parcel record about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParcelValidationError {
    /// Client identifiers are strictly positive.
    NonPositiveClient(i64),
    /// `created_at` does not look like an RFC-3339 UTC timestamp.
    MalformedCreatedAt(String),
}

impl Display for ParcelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveClient(client) => {
                write!(f, "client id must be positive, got {client}")
            }
            Self::MalformedCreatedAt(value) => {
                write!(f, "created_at `{value}` is not an RFC-3339 UTC timestamp")
            }
        }
    }
}

impl Error for ParcelValidationError {}

/// A trackable shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Storage-assigned identifier; `0` until the parcel is inserted.
    pub number: i64,
    /// Owning client identifier. Immutable after creation.
    pub client: i64,
    /// Lifecycle status. Starts as `registered`.
    pub status: ParcelStatus,
    /// Free-text delivery address. Mutable only while `registered`.
    pub address: String,
    /// RFC-3339 UTC creation timestamp. Immutable after creation.
    pub created_at: String,
}

impl Parcel {
    /// Creates a not-yet-persisted parcel in `Registered` status.
    pub fn new(client: i64, address: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Checks the record before any SQL write.
    ///
    /// The address is deliberately unchecked: it is free text.
    pub fn validate(&self) -> Result<(), ParcelValidationError> {
        if self.client <= 0 {
            return Err(ParcelValidationError::NonPositiveClient(self.client));
        }
        if !CREATED_AT_SHAPE.is_match(&self.created_at) {
            return Err(ParcelValidationError::MalformedCreatedAt(
                self.created_at.clone(),
            ));
        }
        Ok(())
    }
}
