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

//! The `Route` entity kind.

use crate::model::{Kind, RouteId};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// A bus route, identified by its public number.
///
/// Drivers, buses and bus stops are assigned to routes separately from the route itself.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Route {
    /// Number of the route as shown to passengers, which need not be numeric.
    number: String,
}

impl Kind for Route {
    type Id = RouteId;
    const NAME: &'static str = "Route";
    const PLURAL: &'static str = "Routes";
    const KEY_NAME: &'static str = "number";

    fn natural_key(&self) -> &str {
        &self.number
    }
}
