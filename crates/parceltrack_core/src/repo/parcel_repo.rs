//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `parcels` table.
//! - Encode the lifecycle-gating rule so callers cannot bypass it.
//!
//! # Invariants
//! - Write paths call `Parcel::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `set_address` and `delete` gate on `registered` inside the statement
//!   itself; a failed gate (wrong status or absent row) is a silent no-op,
//!   never an error.

use crate::db::DbError;
use crate::db::migrations::latest_version;
use crate::model::parcel::{Parcel, ParcelStatus, ParcelValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcels";

const PARCEL_COLUMNS: [&str; 5] = ["number", "client", "status", "address", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for parcel persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ParcelValidationError),
    Db(DbError),
    NotFound(i64),
    InvalidData(String),
    /// The connection has not been migrated to the schema this binary needs.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::InvalidData(message) => write!(f, "invalid persisted parcel data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{column}` in table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParcelValidationError> for RepoError {
    fn from(value: ParcelValidationError) -> Self {
        Self::Validation(value)
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

/// Repository interface for parcel CRUD operations.
pub trait ParcelRepository {
    /// Inserts a new parcel and returns its storage-assigned number.
    fn add(&self, parcel: &Parcel) -> RepoResult<i64>;
    /// Gets one parcel by number.
    fn get(&self, number: i64) -> RepoResult<Parcel>;
    /// Lists all parcels of one client, in no guaranteed order.
    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>>;
    /// Changes the address while the parcel is still `registered`.
    fn set_address(&self, number: i64, address: &str) -> RepoResult<()>;
    /// Overwrites the status without transition checks.
    fn set_status(&self, number: i64, status: ParcelStatus) -> RepoResult<()>;
    /// Removes the parcel while it is still `registered`.
    fn delete(&self, number: i64) -> RepoResult<()>;
}

/// SQLite-backed parcel repository.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<i64> {
        parcel.validate()?;

        self.conn.execute(
            "INSERT INTO parcels (client, status, address, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_db_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: i64) -> RepoResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;

        let mut rows = stmt.query([number])?;
        match rows.next()? {
            Some(row) => parse_parcel_row(row),
            None => Err(RepoError::NotFound(number)),
        }
    }

    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE client = ?1;"))?;

        let mut rows = stmt.query([client])?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_address(&self, number: i64, address: &str) -> RepoResult<()> {
        // The status predicate lives in the statement: check and write are one
        // atomic step. Zero changed rows (wrong status or absent row) is not
        // an error.
        self.conn.execute(
            "UPDATE parcels
             SET address = ?2
             WHERE number = ?1
               AND status = ?3;",
            params![number, address, ParcelStatus::Registered.as_db_str()],
        )?;

        Ok(())
    }

    fn set_status(&self, number: i64, status: ParcelStatus) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE parcels
             SET status = ?2
             WHERE number = ?1;",
            params![number, status.as_db_str()],
        )?;

        Ok(())
    }

    fn delete(&self, number: i64) -> RepoResult<()> {
        // Same atomic conditional shape as `set_address`: a parcel past
        // `registered` stays in the table.
        self.conn.execute(
            "DELETE FROM parcels
             WHERE number = ?1
               AND status = ?2;",
            params![number, ParcelStatus::Registered.as_db_str()],
        )?;

        Ok(())
    }
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    let status_text: String = row.get("status")?;
    let status = ParcelStatus::parse_db_str(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in parcels.status"))
    })?;

    let parcel = Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    };
    parcel.validate()?;
    Ok(parcel)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(|err| RepoError::Db(DbError::Sqlite(err)))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "parcels")? {
        return Err(RepoError::MissingRequiredTable("parcels"));
    }

    for column in PARCEL_COLUMNS {
        if !table_has_column(conn, "parcels", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "parcels",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
