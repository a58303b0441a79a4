//! Domain model for tracked shipments.
//!
//! # Responsibility
//! - Define the canonical parcel record persisted by the repository layer.
//! - Name the status tokens the tracker application works with.
//!
//! # Invariants
//! - Every persisted parcel is identified by a store-assigned `number`.
//! - `registered` is the only status that permits address changes or deletion.

pub mod parcel;
