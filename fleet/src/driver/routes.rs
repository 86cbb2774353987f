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

//! Extends the driver with the operations that link routes to drivers, buses and bus stops.

use crate::db::{self, Linkable};
use crate::driver::{FleetDriver, kind_error};
use crate::model::{Entity, Route, RouteId};
use fleet_core::db::{DbError, Executor};
use fleet_core::driver::{DriverError, DriverResult};
use log::info;

/// Ensures that both the route `route_id` and the entity `other_id` of kind `K` exist, reporting
/// which of the two is missing.
async fn check_link_ends<K: Linkable>(
    ex: &mut Executor,
    route_id: &RouteId,
    other_id: &K::Id,
) -> DriverResult<()> {
    db::get_by_id::<Route>(ex, route_id).await.map_err(kind_error::<Route>)?;
    db::get_by_id::<K>(ex, other_id).await.map_err(kind_error::<K>)?;
    Ok(())
}

impl FleetDriver {
    /// Assigns the entity `other_id` of kind `K` to the route `route_id`.
    pub(crate) async fn assign<K: Linkable>(
        self,
        route_id: &RouteId,
        other_id: &K::Id,
    ) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        check_link_ends::<K>(tx.ex(), route_id, other_id).await?;
        match db::assign_link::<K>(tx.ex(), route_id, other_id).await {
            Ok(()) => (),
            Err(DbError::AlreadyExists) => {
                return Err(DriverError::AlreadyExists(format!(
                    "{} already assigned to route",
                    K::NAME
                )));
            }
            Err(e) => return Err(kind_error::<Route>(e)),
        }
        tx.commit().await?;

        info!("Assigned {} {} to route {}", K::NAME, other_id, route_id);
        Ok(())
    }

    /// Removes the entity `other_id` of kind `K` from the route `route_id`.
    ///
    /// Both the route and the entity must exist, but they need not be linked.
    pub(crate) async fn unassign<K: Linkable>(
        self,
        route_id: &RouteId,
        other_id: &K::Id,
    ) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        check_link_ends::<K>(tx.ex(), route_id, other_id).await?;
        db::unassign_link::<K>(tx.ex(), route_id, other_id)
            .await
            .map_err(kind_error::<Route>)?;
        tx.commit().await?;

        info!("Unassigned {} {} from route {}", K::NAME, other_id, route_id);
        Ok(())
    }

    /// Gets all entities of kind `K` assigned to the route `route_id`.
    ///
    /// A route without any entities of this kind is reported as a `NotFound` error instead of
    /// an empty list.
    pub(crate) async fn list_assigned<K: Linkable>(
        self,
        route_id: &RouteId,
    ) -> DriverResult<Vec<Entity<K>>> {
        let mut ex = self.db.ex().await?;
        let entities = db::list_linked::<K>(&mut ex, route_id).await.map_err(kind_error::<Route>)?;
        if entities.is_empty() {
            return Err(DriverError::NotFound(format!("{} not found", K::PLURAL)));
        }
        Ok(entities)
    }
}
