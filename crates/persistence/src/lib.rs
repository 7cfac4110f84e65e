// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the Rota scheduling system.
//!
//! Reads and writes are free functions over `&rusqlite::Connection`,
//! so the same accessors work standalone and inside an open
//! transaction. Every mutating API operation runs its loads, guards,
//! and writes inside one `BEGIN IMMEDIATE` transaction obtained from
//! [`Persistence::begin_immediate`]; the write lock taken up front is
//! what serializes concurrent check-then-act sequences (two racing
//! releases of the same shift, two overlapping shift writes).

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::info;

mod error;
pub mod mutations;
pub mod queries;
mod rows;
mod schema;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use rows::{SessionUserRow, UserRow};
pub use schema::{initialize_schema, verify_foreign_key_enforcement};

/// An open database with the schema initialized.
pub struct Persistence {
    conn: Connection,
}

impl Persistence {
    /// Opens an in-memory database, used by tests and ephemeral
    /// tooling.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the
    /// schema cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (creating if necessary) a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the
    /// schema cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        info!(path = %path.as_ref().display(), "Opened database");
        Ok(Self { conn })
    }

    /// Starts a `BEGIN IMMEDIATE` transaction, taking the write lock
    /// before the first read so check-then-act sequences serialize.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>, PersistenceError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Returns the underlying connection for read-only access.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
