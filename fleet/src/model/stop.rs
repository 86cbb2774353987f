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

//! The `BusStop` entity kind.

use crate::model::{BusStopId, Kind, validate_key};
use derive_getters::Getters;
use derive_more::Constructor;
use fleet_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// A bus stop, identified by its name.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct BusStop {
    /// Latitude in degrees.
    latitude: f64,

    /// Longitude in degrees.
    longitude: f64,

    /// Name of the stop as shown to passengers.
    name: String,
}

impl Kind for BusStop {
    type Id = BusStopId;
    const NAME: &'static str = "Bus stop";
    const PLURAL: &'static str = "Bus stops";
    const KEY_NAME: &'static str = "name";

    fn natural_key(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> ModelResult<()> {
        validate_key(self)?;
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ModelError(format!("Latitude {} out of range", self.latitude)));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ModelError(format!("Longitude {} out of range", self.longitude)));
        }
        Ok(())
    }
}
