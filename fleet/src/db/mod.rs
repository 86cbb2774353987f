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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Entities are stored one table per kind and routes are linked to other entities through one
//! junction table per linkable kind.  All operations are generic over the kind and the queries
//! they issue are built from the table descriptions in `Table` and `Linkable`.

use crate::model::{Entity, EntityId, Kind};
#[cfg(feature = "postgres")]
use fleet_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use fleet_core::db::sqlite;
use fleet_core::db::{DbResult, Executor};
use sqlx::query::Query;
use sqlx::{Database, Encode, Row, Type};
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::Date;

mod entities;
pub(crate) use entities::*;
mod links;
pub(crate) use links::*;
mod tables;

#[cfg(test)]
mod tests;

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

/// A value to bind to a query parameter.
#[derive(Debug)]
pub(crate) enum SqlValue {
    /// A calendar date.
    Date(Date),

    /// A floating point number.
    Real(f64),

    /// A string.
    Text(String),
}

/// Typed access to the columns of a result row, regardless of the backend that produced it.
pub(crate) trait Columns {
    /// Gets the date stored in the column `name`.
    fn date(&self, name: &str) -> DbResult<Date>;

    /// Gets the floating point number stored in the column `name`.
    fn real(&self, name: &str) -> DbResult<f64>;

    /// Gets the string stored in the column `name`.
    fn text(&self, name: &str) -> DbResult<String>;
}

#[cfg(feature = "postgres")]
impl Columns for PgRow {
    fn date(&self, name: &str) -> DbResult<Date> {
        self.try_get(name).map_err(postgres::map_sqlx_error)
    }

    fn real(&self, name: &str) -> DbResult<f64> {
        self.try_get(name).map_err(postgres::map_sqlx_error)
    }

    fn text(&self, name: &str) -> DbResult<String> {
        self.try_get(name).map_err(postgres::map_sqlx_error)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl Columns for SqliteRow {
    fn date(&self, name: &str) -> DbResult<Date> {
        self.try_get(name).map_err(sqlite::map_sqlx_error)
    }

    fn real(&self, name: &str) -> DbResult<f64> {
        self.try_get(name).map_err(sqlite::map_sqlx_error)
    }

    fn text(&self, name: &str) -> DbResult<String> {
        self.try_get(name).map_err(sqlite::map_sqlx_error)
    }
}

/// Description of the table that stores the entities of a kind.
pub(crate) trait Table: Kind {
    /// Name of the table.
    const TABLE: &'static str;

    /// Name of the column that holds the natural key.
    const KEY_COLUMN: &'static str;

    /// Names of the columns that hold the details, in the same order as `values` returns them.
    /// The `id` column is implicit.
    const COLUMNS: &'static [&'static str];

    /// Returns the values of the details to bind to the `COLUMNS`.
    fn values(&self) -> Vec<SqlValue>;

    /// Builds the details from the `COLUMNS` of a result `row`.
    fn decode(row: &dyn Columns) -> DbResult<Self>;
}

/// Description of the junction table that links routes to the entities of a kind.
pub(crate) trait Linkable: Table {
    /// Name of the junction table.
    const LINK_TABLE: &'static str;

    /// Name of the column in the junction table that references the entity.  The column that
    /// references the route is always `route_id`.
    const LINK_COLUMN: &'static str;
}

/// Returns the comma-separated list of all columns of `K`, each prefixed by `qualifier`.
fn select_list<K: Table>(qualifier: &str) -> String {
    let mut columns = vec![format!("{}id", qualifier)];
    columns.extend(K::COLUMNS.iter().map(|c| format!("{}{}", qualifier, c)));
    columns.join(", ")
}

/// Binds all `values`, in order, to the parameters of `query`.
fn bind_values<'q, DB>(
    mut query: Query<'q, DB, <DB as Database>::Arguments<'q>>,
    values: Vec<SqlValue>,
) -> Query<'q, DB, <DB as Database>::Arguments<'q>>
where
    DB: Database,
    Date: Encode<'q, DB> + Type<DB>,
    f64: Encode<'q, DB> + Type<DB>,
    String: Encode<'q, DB> + Type<DB>,
{
    for value in values {
        query = match value {
            SqlValue::Date(d) => query.bind(d),
            SqlValue::Real(r) => query.bind(r),
            SqlValue::Text(s) => query.bind(s),
        };
    }
    query
}

/// Builds an entity of kind `K` from a result `row` that has the `id` and all `COLUMNS`.
fn decode_entity<K: Table>(row: &dyn Columns) -> DbResult<Entity<K>> {
    let id = K::Id::new(row.text("id")?)?;
    Ok(Entity::new(id, K::decode(row)?))
}

/// Runs the statement `sql` with `values` bound to its parameters and returns the number of
/// affected rows.
async fn execute(ex: &mut Executor, sql: &str, values: Vec<SqlValue>) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = bind_values(sqlx::query(sql), values)
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = bind_values(sqlx::query(sql), values)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Runs the query `sql` with `values` bound to its parameters and returns the single entity it
/// yields.  Fails with `NotFound` if the query returns no rows.
async fn fetch_one<K: Table>(
    ex: &mut Executor,
    sql: &str,
    values: Vec<SqlValue>,
) -> DbResult<Entity<K>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let row = bind_values(sqlx::query(sql), values)
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            decode_entity(&row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let row = bind_values(sqlx::query(sql), values)
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            decode_entity(&row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Runs the query `sql` with `values` bound to its parameters and returns all the entities it
/// yields, in the order the query returns them.
async fn fetch_all<K: Table>(
    ex: &mut Executor,
    sql: &str,
    values: Vec<SqlValue>,
) -> DbResult<Vec<Entity<K>>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let rows = bind_values(sqlx::query(sql), values)
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.iter().map(|row| decode_entity(row)).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let rows = bind_values(sqlx::query(sql), values)
                .fetch_all(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.iter().map(|row| decode_entity(row)).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
