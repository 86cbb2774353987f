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

//! The `Bus` entity kind.

use crate::model::{BusId, Kind, iso_date};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use time::Date;

/// A bus in the fleet, identified by its register number.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Bus {
    /// Manufacturer of the bus.
    brand: String,

    /// Model name given by the manufacturer.
    model: String,

    /// Registration plate of the bus.
    register_number: String,

    /// Date when the bus was assembled.
    #[serde(with = "iso_date")]
    assembly_date: Date,

    /// Date when the bus was last repaired.
    #[serde(with = "iso_date")]
    last_repair_date: Date,
}

impl Kind for Bus {
    type Id = BusId;
    const NAME: &'static str = "Bus";
    const PLURAL: &'static str = "Buses";
    const KEY_NAME: &'static str = "register number";

    fn natural_key(&self) -> &str {
        &self.register_number
    }
}
