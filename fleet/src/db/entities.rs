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

//! Operations on the tables that store entities.

use crate::db::{SqlValue, Table, execute, fetch_all, fetch_one, select_list};
use crate::model::{Entity, EntityId};
use fleet_core::db::{DbError, DbResult, Executor};

/// Gets the entity of kind `K` identified by `id`.
pub(crate) async fn get_by_id<K: Table>(ex: &mut Executor, id: &K::Id) -> DbResult<Entity<K>> {
    let query_str = format!("SELECT {} FROM {} WHERE id = $1", select_list::<K>(""), K::TABLE);
    fetch_one(ex, &query_str, vec![SqlValue::Text(id.as_str().to_owned())]).await
}

/// Gets the entity of kind `K` whose natural key is `key`.
pub(crate) async fn get_by_key<K: Table>(ex: &mut Executor, key: &str) -> DbResult<Entity<K>> {
    let query_str = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_list::<K>(""),
        K::TABLE,
        K::KEY_COLUMN
    );
    fetch_one(ex, &query_str, vec![SqlValue::Text(key.to_owned())]).await
}

/// Gets all entities of kind `K` sorted by their natural key.
pub(crate) async fn list<K: Table>(ex: &mut Executor) -> DbResult<Vec<Entity<K>>> {
    let query_str = format!(
        "SELECT {} FROM {} ORDER BY {}, id",
        select_list::<K>(""),
        K::TABLE,
        K::KEY_COLUMN
    );
    fetch_all(ex, &query_str, vec![]).await
}

/// Stores a new `entity`.
///
/// Fails with `AlreadyExists` if the identifier or the natural key of the entity are already in
/// use by another entity of the same kind.
pub(crate) async fn insert<K: Table>(ex: &mut Executor, entity: &Entity<K>) -> DbResult<()> {
    let params =
        (1..=K::COLUMNS.len() + 1).map(|i| format!("${}", i)).collect::<Vec<String>>().join(", ");
    let query_str =
        format!("INSERT INTO {} ({}) VALUES ({})", K::TABLE, select_list::<K>(""), params);

    let mut values = vec![SqlValue::Text(entity.id().as_str().to_owned())];
    values.extend(entity.details().values());
    let rows_affected = execute(ex, &query_str, values).await?;
    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(())
}

/// Replaces the details of an existing `entity`.
///
/// Fails with `NotFound` if there is no entity with the given identifier and with
/// `AlreadyExists` if the new natural key is in use by another entity of the same kind.
pub(crate) async fn update<K: Table>(ex: &mut Executor, entity: &Entity<K>) -> DbResult<()> {
    let assignments = K::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", c, i + 2))
        .collect::<Vec<String>>()
        .join(", ");
    let query_str = format!("UPDATE {} SET {} WHERE id = $1", K::TABLE, assignments);

    let mut values = vec![SqlValue::Text(entity.id().as_str().to_owned())];
    values.extend(entity.details().values());
    match execute(ex, &query_str, values).await? {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Deletes the entity of kind `K` identified by `id`, along with all of its links to routes.
///
/// Fails with `NotFound` if there is no such entity.
pub(crate) async fn delete<K: Table>(ex: &mut Executor, id: &K::Id) -> DbResult<()> {
    let query_str = format!("DELETE FROM {} WHERE id = $1", K::TABLE);
    match execute(ex, &query_str, vec![SqlValue::Text(id.as_str().to_owned())]).await? {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
