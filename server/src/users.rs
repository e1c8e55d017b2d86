//! Email registry backed by the `users` table.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::db::{DbConn, DbPool, StorageError};
use crate::models::NewUser;
use crate::schema::users;

/// Records the emails of people who signed up.
///
/// Uniqueness is enforced by the table's primary key; no extra locking.
#[derive(Clone)]
pub struct UserRegistry {
    pool: DbPool,
}

impl UserRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn, StorageError> {
        Ok(self.pool.get()?)
    }

    /// Insert `email`. Returns `false` if it was already registered.
    ///
    /// The email is stored as given; callers decide what counts as valid.
    pub fn register(&self, email: &str) -> Result<bool, StorageError> {
        let mut conn = self.conn()?;

        match diesel::insert_into(users::table)
            .values(&NewUser { email })
            .execute(&mut conn)
        {
            Ok(_) => Ok(true),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Total number of registered emails.
    pub fn count(&self) -> Result<i64, StorageError> {
        let mut conn = self.conn()?;
        Ok(users::table.count().get_result(&mut conn)?)
    }
}
