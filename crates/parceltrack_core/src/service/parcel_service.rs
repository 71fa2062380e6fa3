//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for callers of the parcel store.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - New parcels are registered here, at the call site; the repository never
//!   infers a status.
//! - Service APIs never bypass repository validation or gating contracts.

use crate::model::parcel::{Parcel, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};

/// Use-case service wrapper for parcel store operations.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for a client.
    ///
    /// # Contract
    /// - The stored status is always `ParcelStatus::Registered`.
    /// - Returns the storage-assigned parcel number.
    pub fn register_parcel(
        &self,
        client: i64,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> RepoResult<i64> {
        let parcel = Parcel::new(client, address, created_at);
        self.repo.add(&parcel)
    }

    /// Inserts a caller-built parcel record.
    pub fn add_parcel(&self, parcel: &Parcel) -> RepoResult<i64> {
        self.repo.add(parcel)
    }

    /// Gets one parcel by number.
    pub fn get_parcel(&self, number: i64) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    /// Lists all parcels of one client.
    pub fn parcels_for_client(&self, client: i64) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Changes a parcel address; dropped silently once the parcel left
    /// `registered`.
    pub fn set_address(&self, number: i64, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address)
    }

    /// Overwrites a parcel status.
    pub fn set_status(&self, number: i64, status: ParcelStatus) -> RepoResult<()> {
        self.repo.set_status(number, status)
    }

    /// Deletes a parcel; dropped silently once the parcel left `registered`.
    pub fn delete_parcel(&self, number: i64) -> RepoResult<()> {
        self.repo.delete(number)
    }
}
