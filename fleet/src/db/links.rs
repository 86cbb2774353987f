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

//! Operations on the junction tables that link routes to other entities.

use crate::db::{Linkable, SqlValue, execute, fetch_all, get_by_id, select_list};
use crate::model::{Entity, EntityId, Route, RouteId};
use fleet_core::db::{DbError, DbResult, Executor};

/// Links the route `route_id` to the entity `other_id` of kind `K`.
///
/// Fails with `NotFound` if the route does not exist and with `AlreadyExists` if the link is
/// already present.  A missing `other_id` is caught by the schema and also reported as
/// `NotFound`, but callers should check for it first to know which of the two entities is
/// missing.
pub(crate) async fn assign_link<K: Linkable>(
    ex: &mut Executor,
    route_id: &RouteId,
    other_id: &K::Id,
) -> DbResult<()> {
    get_by_id::<Route>(ex, route_id).await?;

    let query_str =
        format!("INSERT INTO {} (route_id, {}) VALUES ($1, $2)", K::LINK_TABLE, K::LINK_COLUMN);
    let values = vec![
        SqlValue::Text(route_id.as_str().to_owned()),
        SqlValue::Text(other_id.as_str().to_owned()),
    ];
    let rows_affected = execute(ex, &query_str, values).await?;
    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(())
}

/// Removes the link between the route `route_id` and the entity `other_id` of kind `K`.
///
/// Fails with `NotFound` if the route does not exist.  Removing a link that is not present is
/// not an error.
pub(crate) async fn unassign_link<K: Linkable>(
    ex: &mut Executor,
    route_id: &RouteId,
    other_id: &K::Id,
) -> DbResult<()> {
    get_by_id::<Route>(ex, route_id).await?;

    let query_str =
        format!("DELETE FROM {} WHERE route_id = $1 AND {} = $2", K::LINK_TABLE, K::LINK_COLUMN);
    let values = vec![
        SqlValue::Text(route_id.as_str().to_owned()),
        SqlValue::Text(other_id.as_str().to_owned()),
    ];
    execute(ex, &query_str, values).await?;
    Ok(())
}

/// Gets all entities of kind `K` linked to the route `route_id`, sorted by their natural key.
///
/// Fails with `NotFound` if the route does not exist.
pub(crate) async fn list_linked<K: Linkable>(
    ex: &mut Executor,
    route_id: &RouteId,
) -> DbResult<Vec<Entity<K>>> {
    get_by_id::<Route>(ex, route_id).await?;

    let query_str = format!(
        "SELECT {columns} FROM {table} t
            JOIN {link_table} l ON l.{link_column} = t.id
            WHERE l.route_id = $1
            ORDER BY t.{key}, t.id",
        columns = select_list::<K>("t."),
        table = K::TABLE,
        link_table = K::LINK_TABLE,
        link_column = K::LINK_COLUMN,
        key = K::KEY_COLUMN,
    );
    fetch_all(ex, &query_str, vec![SqlValue::Text(route_id.as_str().to_owned())]).await
}
