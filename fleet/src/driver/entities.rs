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

//! Extends the driver with the operations that manage entities of any kind.

use crate::db::{self, Table};
use crate::driver::{FleetDriver, kind_error};
use crate::model::{Entity, EntityId};
use fleet_core::db::DbError;
use fleet_core::driver::{DriverError, DriverResult};
use log::info;

impl FleetDriver {
    /// Gets the entity of kind `K` identified by `id`.
    pub(crate) async fn get<K: Table>(self, id: &K::Id) -> DriverResult<Entity<K>> {
        let mut ex = self.db.ex().await?;
        db::get_by_id::<K>(&mut ex, id).await.map_err(kind_error::<K>)
    }

    /// Gets the entity of kind `K` whose natural key is `key`.
    pub(crate) async fn get_by_key<K: Table>(self, key: &str) -> DriverResult<Entity<K>> {
        let mut ex = self.db.ex().await?;
        db::get_by_key::<K>(&mut ex, key).await.map_err(kind_error::<K>)
    }

    /// Gets all entities of kind `K`.  Returns an empty list if there are none.
    pub(crate) async fn list<K: Table>(self) -> DriverResult<Vec<Entity<K>>> {
        let mut ex = self.db.ex().await?;
        Ok(db::list::<K>(&mut ex).await?)
    }

    /// Creates a new entity of kind `K` with the given `details`.
    ///
    /// The entity is assigned the caller-supplied `id` if any, or a freshly-generated one
    /// otherwise.  Fails if another entity already uses the same identifier or natural key.
    pub(crate) async fn add<K: Table>(
        self,
        id: Option<K::Id>,
        details: K,
    ) -> DriverResult<Entity<K>> {
        details.validate()?;
        let entity = Entity::new(id.unwrap_or_else(K::Id::generate), details);

        let mut tx = self.db.begin().await?;

        match db::get_by_key::<K>(tx.ex(), entity.details().natural_key()).await {
            Ok(_) => return Err(DriverError::AlreadyExists(format!("{} already exists", K::NAME))),
            Err(DbError::NotFound) => (),
            Err(e) => return Err(e.into()),
        }
        db::insert(tx.ex(), &entity).await.map_err(kind_error::<K>)?;

        tx.commit().await?;
        info!("Created {} {} with id {}", K::NAME, entity.details().natural_key(), entity.id());
        Ok(entity)
    }

    /// Replaces all details of the existing entity of kind `K` identified by `id`.
    pub(crate) async fn update<K: Table>(self, id: K::Id, details: K) -> DriverResult<Entity<K>> {
        details.validate()?;
        let entity = Entity::new(id, details);

        let mut tx = self.db.begin().await?;
        db::update(tx.ex(), &entity).await.map_err(kind_error::<K>)?;
        tx.commit().await?;

        info!("Updated {} with id {}", K::NAME, entity.id());
        Ok(entity)
    }

    /// Deletes the entity of kind `K` identified by `id`.
    ///
    /// Any links between the entity and routes are deleted as well.
    pub(crate) async fn delete<K: Table>(self, id: &K::Id) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete::<K>(tx.ex(), id).await.map_err(kind_error::<K>)?;
        tx.commit().await?;

        info!("Deleted {} with id {}", K::NAME, id);
        Ok(())
    }
}
