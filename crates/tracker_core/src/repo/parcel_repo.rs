//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map `Parcel` values to and from rows of the `parcel` table.
//! - Enforce the registered-state gate on address changes and deletion.
//!
//! # Invariants
//! - `number` is assigned by the store, exactly once, at insertion time.
//! - Gated SQL is additionally scoped by `status = 'registered'` so a
//!   concurrent status change between read and write cannot mutate a
//!   parcel that already left its initial state.
//!
//! # Contract quirks (kept deliberately)
//! - `set_address` on a non-registered parcel fails with `AddressLocked`;
//!   `delete` on the same condition is a silent skip returning `Ok(())`.
//!   The asymmetry exists because callers do not handle a rejected-delete
//!   error path. Revisit only together with those callers.

use crate::db::DbError;
use crate::model::parcel::{Parcel, ParcelNumber};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

// Column order must match the `Parcel` field order on read.
const PARCEL_SELECT_SQL: &str =
    "SELECT number, client, status, address, created_at FROM parcel";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error taxonomy for parcel persistence operations.
///
/// Storage failures and the no-rows condition travel inside `Db` untranslated;
/// use [`RepoError::is_not_found`] to tell them apart.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying storage failure, including the engine's no-rows signal.
    Db(DbError),
    /// Address mutation attempted on a parcel that left the registered state.
    AddressLocked {
        number: ParcelNumber,
        status: String,
    },
    /// Owner scan failed mid-iteration; `read` holds the rows decoded so far.
    ScanInterrupted { read: Vec<Parcel>, source: DbError },
}

impl RepoError {
    /// Returns whether this error is the storage engine's no-rows condition.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Db(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::AddressLocked { number, status } => write!(
                f,
                "unable to change address for parcel number={number} with status={status}"
            ),
            Self::ScanInterrupted { read, source } => write!(
                f,
                "parcel scan interrupted after {} rows: {source}",
                read.len()
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::AddressLocked { .. } => None,
            Self::ScanInterrupted { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for parcel persistence.
pub trait ParcelRepository {
    /// Inserts a new row; the input `number` is ignored and the identifier
    /// assigned by the store is returned.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Fetches exactly one parcel; absence surfaces the no-rows signal.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Fetches every parcel owned by `client`, in unspecified order.
    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>>;
    /// Unconditionally overwrites the status column; updating a missing
    /// identifier is a zero-row success.
    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()>;
    /// Updates the address, only while the parcel is still registered.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Deletes the row, only while the parcel is still registered;
    /// otherwise a silent skip.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel repository over an injected connection handle.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;

        let parcel = stmt.query_row(params![number], parse_parcel_row)?;
        Ok(parcel)
    }

    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE client = ?1;"))?;

        let mut rows = stmt.query(params![client])?;
        let mut parcels = Vec::new();

        // A failure mid-scan keeps the rows decoded so far inside the error.
        loop {
            match rows.next() {
                Ok(Some(row)) => match parse_parcel_row(row) {
                    Ok(parcel) => parcels.push(parcel),
                    Err(source) => {
                        return Err(RepoError::ScanInterrupted {
                            read: parcels,
                            source: source.into(),
                        })
                    }
                },
                Ok(None) => break,
                Err(source) => {
                    return Err(RepoError::ScanInterrupted {
                        read: parcels,
                        source: source.into(),
                    })
                }
            }
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2;",
            params![status, number],
        )?;

        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let parcel = self.get(number)?;
        if !parcel.is_registered() {
            return Err(RepoError::AddressLocked {
                number,
                status: parcel.status,
            });
        }

        let changed = self.conn.execute(
            "UPDATE parcel SET address = ?1
             WHERE number = ?2 AND status = 'registered' COLLATE NOCASE;",
            params![address, number],
        )?;

        if changed == 0 {
            // Lost a race with a concurrent status change; report the state
            // the row actually has now.
            let current = self.get(number)?;
            return Err(RepoError::AddressLocked {
                number,
                status: current.status,
            });
        }

        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let parcel = self.get(number)?;
        if !parcel.is_registered() {
            debug!(
                "event=parcel_delete_skipped module=repo number={number} status={}",
                parcel.status
            );
            return Ok(());
        }

        // A concurrent status change making this a zero-row delete falls
        // under the same silent-skip contract.
        self.conn.execute(
            "DELETE FROM parcel WHERE number = ?1 AND status = 'registered' COLLATE NOCASE;",
            params![number],
        )?;

        Ok(())
    }
}

fn parse_parcel_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get(0)?,
        client: row.get(1)?,
        status: row.get(2)?,
        address: row.get(3)?,
        created_at: row.get(4)?,
    })
}
