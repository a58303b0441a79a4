//! Parcel domain model.
//!
//! # Responsibility
//! - Define the shipment record shared by repository and service layers.
//! - Provide the status gate helper used by conditional mutations.
//!
//! # Invariants
//! - `number` is assigned exactly once, by the store, at insertion time.
//! - Status text is compared case-insensitively; the repository never
//!   validates it against the known token set.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned parcel identifier (SQLite rowid, always positive).
pub type ParcelNumber = i64;

/// Known lifecycle tokens for the tracker application.
///
/// The repository treats status as opaque text; this enum exists for callers
/// that want typed transitions instead of raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Initial state; the only one permitting address change or deletion.
    Registered,
    /// Handed to the carrier.
    Sent,
    /// Received by the client.
    Delivered,
}

impl ParcelStatus {
    /// Returns the canonical lowercase token stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "registered" => Ok(Self::Registered),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            _ => Err(UnknownStatusError {
                token: value.to_string(),
            }),
        }
    }
}

/// Raised when a status token is outside the known lifecycle set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusError {
    pub token: String,
}

impl Display for UnknownStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown parcel status `{}`; expected registered|sent|delivered",
            self.token
        )
    }
}

impl std::error::Error for UnknownStatusError {}

/// Canonical shipment record mapped to one `parcel` table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Store-assigned primary key. Zero until the parcel is persisted.
    pub number: ParcelNumber,
    /// Owning customer identifier. Set at creation, never mutated here.
    pub client: i64,
    /// Opaque status text; compared case-insensitively by gated operations.
    pub status: String,
    /// Free-form delivery address; mutable only while registered.
    pub address: String,
    /// RFC 3339 UTC timestamp text. Set at creation, immutable.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unpersisted parcel in the `registered` state.
    ///
    /// # Contract
    /// - `number` stays zero until `add` assigns the real identifier.
    pub fn new(
        client: i64,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered.as_str().to_string(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Returns whether this parcel is still in its initial state.
    ///
    /// Single source of truth for the gate on address change and deletion.
    pub fn is_registered(&self) -> bool {
        self.status
            .eq_ignore_ascii_case(ParcelStatus::Registered.as_str())
    }
}
