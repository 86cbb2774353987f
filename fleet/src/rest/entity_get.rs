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

//! API to get an entity by its identifier.

use crate::driver::FleetDriver;
use crate::model::Entity;
use crate::rest::Collection;
use axum::Json;
use axum::extract::{Path, State};
use fleet_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler<K: Collection>(
    State(driver): State<FleetDriver>,
    Path(id): Path<K::Id>,
    _: EmptyBody,
) -> Result<Json<Entity<K>>, RestError> {
    let entity = driver.get::<K>(&id).await?;
    Ok(Json(entity))
}
