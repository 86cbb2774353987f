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

//! Business logic for the fleet.

use crate::model::Kind;
use fleet_core::db::{Db, DbError};
use fleet_core::driver::DriverError;
use std::sync::Arc;

mod entities;
mod routes;
#[cfg(test)]
pub(crate) mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct FleetDriver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl FleetDriver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

/// Converts a database error `e` raised while operating on an entity of kind `K` into a driver
/// error whose message names the kind.
fn kind_error<K: Kind>(e: DbError) -> DriverError {
    match e {
        DbError::AlreadyExists => DriverError::AlreadyExists(format!("{} already exists", K::NAME)),
        DbError::NotFound => DriverError::NotFound(format!("{} not found", K::NAME)),
        e => e.into(),
    }
}
