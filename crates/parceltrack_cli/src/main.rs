//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `parceltrack_core` linkage and
//!   schema bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use parceltrack_core::db::migrations::latest_version;
use parceltrack_core::db::open_db_in_memory;

fn main() {
    println!("parceltrack_core version={}", parceltrack_core::core_version());

    match open_db_in_memory() {
        Ok(_conn) => println!("parceltrack_core schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("parceltrack_core db bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
