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

//! The `Driver` entity kind.

use crate::model::{DriverId, Kind, iso_date};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use time::Date;

/// A bus driver, identified by the series of their passport.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Driver {
    /// Given name.
    name: String,

    /// Family name.
    surname: String,

    /// Patronymic name.  May be empty.
    patronymic: String,

    /// Date of birth.
    #[serde(with = "iso_date")]
    birth_date: Date,

    /// Series and number of the passport.
    passport_series: String,

    /// Social insurance number.
    snils: String,

    /// Series and number of the driving license.
    license_series: String,
}

impl Kind for Driver {
    type Id = DriverId;
    const NAME: &'static str = "Driver";
    const PLURAL: &'static str = "Drivers";
    const KEY_NAME: &'static str = "passport series";

    fn natural_key(&self) -> &str {
        &self.passport_series
    }
}
