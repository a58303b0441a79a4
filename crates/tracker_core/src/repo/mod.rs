//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the parcel data-access contract.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Gated writes (address change, deletion) only touch parcels whose
//!   persisted status is `registered`, compared case-insensitively.
//! - Absence of a row on `get` surfaces the engine's own no-rows signal,
//!   never a translated application error.

pub mod parcel_repo;
