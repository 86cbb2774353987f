// Fleet
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction to manipulate users.

use crate::model::{HashedPassword, User, UserId, Username};
#[cfg(feature = "postgres")]
use fleet_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use fleet_core::db::sqlite;
use fleet_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Builds a `User` from the raw column values of a row in the `users` table.
fn build_user(id: String, username: String, password_hash: String) -> DbResult<User> {
    Ok(User::new(UserId::parse(&id)?, Username::new(username)?, HashedPassword::new(password_hash)))
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;
        let password_hash: String =
            row.try_get("password_hash").map_err(postgres::map_sqlx_error)?;
        build_user(id, username, password_hash)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(sqlite::map_sqlx_error)?;
        build_user(id, username, password_hash)
    }
}

/// Stores a new `user`.  Fails with `AlreadyExists` if the username is already taken.
pub async fn create_user(ex: &mut Executor, user: &User) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3)";
            let done = sqlx::query(query_str)
                .bind(user.id().to_string())
                .bind(user.username().as_str())
                .bind(user.password_hash().as_str())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO users (id, username, password_hash) VALUES (?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(user.id().to_string())
                .bind(user.username().as_str())
                .bind(user.password_hash().as_str())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(())
}

/// Gets the user named `username` whose password hash matches `password_hash`.
///
/// Fails with `NotFound` if there is no such user or if the hash does not match, without
/// distinguishing between the two cases.
pub async fn get_user_by_credentials(
    ex: &mut Executor,
    username: &Username,
    password_hash: &HashedPassword,
) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, username, password_hash FROM users
                WHERE username = $1 AND password_hash = $2";
            let raw_user = sqlx::query(query_str)
                .bind(username.as_str())
                .bind(password_hash.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, username, password_hash FROM users
                WHERE username = ? AND password_hash = ?";
            let raw_user = sqlx::query(query_str)
                .bind(username.as_str())
                .bind(password_hash.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets information about an existing user named `username`.
#[cfg(any(test, feature = "testutils"))]
pub async fn get_user_by_username(ex: &mut Executor, username: &Username) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, username, password_hash FROM users WHERE username = $1";
            let raw_user = sqlx::query(query_str)
                .bind(username.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, username, password_hash FROM users WHERE username = ?";
            let raw_user = sqlx::query(query_str)
                .bind(username.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
