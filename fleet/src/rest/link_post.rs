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

//! API to assign an entity to a route.

use crate::db::Linkable;
use crate::driver::FleetDriver;
use crate::model::RouteId;
use crate::rest::Collection;
use axum::extract::{Path, State};
use fleet_core::rest::{EmptyBody, RestError};

/// POST handler for this API.
pub(crate) async fn handler<K: Collection + Linkable>(
    State(driver): State<FleetDriver>,
    Path((route_id, other_id)): Path<(RouteId, K::Id)>,
    _: EmptyBody,
) -> Result<(), RestError> {
    driver.assign::<K>(&route_id, &other_id).await?;
    Ok(())
}
