//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tracker_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tracker_core::db::open_db_in_memory;
use tracker_core::{ParcelService, SqliteParcelRepository};

fn main() {
    println!("tracker_core version={}", tracker_core::core_version());

    // Smoke-check the full stack against a throwaway in-memory store.
    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("tracker_core smoke failed: {err}");
            std::process::exit(1);
        }
    };

    let service = ParcelService::new(SqliteParcelRepository::new(&conn));
    match service.register(1, "smoke test address") {
        Ok(number) => println!("tracker_core smoke parcel number={number}"),
        Err(err) => {
            eprintln!("tracker_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}
