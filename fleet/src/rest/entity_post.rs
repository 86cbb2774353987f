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

//! API to create a new entity.

use crate::driver::FleetDriver;
use crate::model::{Entity, Kind};
use crate::rest::Collection;
use axum::Json;
use axum::extract::State;
use fleet_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to create an entity.
///
/// This is the same as an `Entity` except that the identifier is optional.
#[derive(Deserialize, Serialize)]
#[serde(bound = "")]
pub(crate) struct EntityRequest<K: Kind> {
    /// Identifier to assign to the new entity.  A random one is generated if missing.
    #[serde(default)]
    id: Option<K::Id>,

    /// All other fields of the new entity.
    #[serde(flatten)]
    details: K,
}

/// POST handler for this API.
pub(crate) async fn handler<K: Collection>(
    State(driver): State<FleetDriver>,
    Json(request): Json<EntityRequest<K>>,
) -> Result<Json<Entity<K>>, RestError> {
    let entity = driver.add(request.id, request.details).await?;
    Ok(Json(entity))
}
