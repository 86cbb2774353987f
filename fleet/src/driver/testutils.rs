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

//! Test utilities for the business layer.

use crate::db::{self, Table};
use crate::driver::FleetDriver;
use crate::model::{Bus, Driver, Entity};
use fleet_core::db::{Db, DbError, Executor};
use std::sync::Arc;
use time::macros::date;

/// Creates the details of a bus with the given `register_number`.
pub(crate) fn bus(register_number: &str) -> Bus {
    Bus::new(
        "Volvo".to_owned(),
        "7900".to_owned(),
        register_number.to_owned(),
        date!(2018 - 05 - 17),
        date!(2023 - 01 - 09),
    )
}

/// Creates the details of a driver with the given `passport_series`.
pub(crate) fn driver(passport_series: &str) -> Driver {
    Driver::new(
        "Anna".to_owned(),
        "Smirnova".to_owned(),
        "Sergeevna".to_owned(),
        date!(1985 - 07 - 14),
        passport_series.to_owned(),
        "112-233-445 95".to_owned(),
        "77 12 345678".to_owned(),
    )
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: FleetDriver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(fleet_core::db::sqlite::testutils::setup().await);
        Self::setup_with(db).await
    }

    /// Initializes the driver on top of an already-connected `db`, creating the schema in it.
    pub(crate) async fn setup_with(db: Arc<dyn Db + Send + Sync>) -> Self {
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = FleetDriver::new(db.clone());
        Self { db, driver }
    }

    /// Gets the database backing the driver.
    pub(crate) fn db(&self) -> Arc<dyn Db + Send + Sync> {
        self.db.clone()
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> FleetDriver {
        self.driver.clone()
    }

    /// Stores an entity with the given `id` and `details` by directly modifying the database.
    pub(crate) async fn put<K: Table>(&self, id: &'static str, details: K) -> Entity<K>
    where
        K::Id: From<&'static str>,
    {
        let entity = Entity::new(K::Id::from(id), details);
        db::insert(&mut self.ex().await, &entity).await.unwrap();
        entity
    }

    /// Gets the entity of kind `K` identified by `id` by directly querying the database.
    pub(crate) async fn get<K: Table>(&self, id: &K::Id) -> Option<Entity<K>> {
        match db::get_by_id::<K>(&mut self.ex().await, id).await {
            Ok(entity) => Some(entity),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }
}
