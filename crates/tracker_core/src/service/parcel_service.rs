//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide stable lifecycle entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass the repository gating contracts.
//! - Status transitions issued here use the known lifecycle tokens;
//!   callers with out-of-set tokens go through the repository directly.

use crate::model::parcel::{Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};
use chrono::{SecondsFormat, Utc};

/// Use-case wrapper for the parcel lifecycle.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client` and returns its store-assigned
    /// number.
    ///
    /// # Contract
    /// - Status starts as `registered`.
    /// - `created_at` is the current UTC time in RFC 3339 format.
    pub fn register(&self, client: i64, address: impl Into<String>) -> RepoResult<ParcelNumber> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let parcel = Parcel::new(client, address, created_at);
        self.repo.add(&parcel)
    }

    /// Fetches one parcel by its number.
    pub fn track(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    /// Fetches every parcel owned by `client`.
    pub fn parcels_for_client(&self, client: i64) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Marks a parcel as handed to the carrier.
    pub fn mark_sent(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.set_status(number, ParcelStatus::Sent.as_str())
    }

    /// Marks a parcel as received by the client.
    pub fn mark_delivered(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo
            .set_status(number, ParcelStatus::Delivered.as_str())
    }

    /// Changes the delivery address; rejected once the parcel left the
    /// registered state.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address)
    }

    /// Removes a parcel while it is still registered; a no-op afterwards.
    pub fn remove(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.delete(number)
    }
}
