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

//! Table descriptions for every entity kind.

use crate::db::{Columns, Linkable, SqlValue, Table};
use crate::model::{Bus, BusStop, Driver, Route};
use fleet_core::db::DbResult;

impl Table for Bus {
    const TABLE: &'static str = "buses";
    const KEY_COLUMN: &'static str = "register_number";
    const COLUMNS: &'static [&'static str] =
        &["brand", "model", "register_number", "assembly_date", "last_repair_date"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.brand().clone()),
            SqlValue::Text(self.model().clone()),
            SqlValue::Text(self.register_number().clone()),
            SqlValue::Date(*self.assembly_date()),
            SqlValue::Date(*self.last_repair_date()),
        ]
    }

    fn decode(row: &dyn Columns) -> DbResult<Self> {
        Ok(Bus::new(
            row.text("brand")?,
            row.text("model")?,
            row.text("register_number")?,
            row.date("assembly_date")?,
            row.date("last_repair_date")?,
        ))
    }
}

impl Linkable for Bus {
    const LINK_TABLE: &'static str = "routes_buses";
    const LINK_COLUMN: &'static str = "bus_id";
}

impl Table for Driver {
    const TABLE: &'static str = "drivers";
    const KEY_COLUMN: &'static str = "passport_series";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "surname",
        "patronymic",
        "birth_date",
        "passport_series",
        "snils",
        "license_series",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.name().clone()),
            SqlValue::Text(self.surname().clone()),
            SqlValue::Text(self.patronymic().clone()),
            SqlValue::Date(*self.birth_date()),
            SqlValue::Text(self.passport_series().clone()),
            SqlValue::Text(self.snils().clone()),
            SqlValue::Text(self.license_series().clone()),
        ]
    }

    fn decode(row: &dyn Columns) -> DbResult<Self> {
        Ok(Driver::new(
            row.text("name")?,
            row.text("surname")?,
            row.text("patronymic")?,
            row.date("birth_date")?,
            row.text("passport_series")?,
            row.text("snils")?,
            row.text("license_series")?,
        ))
    }
}

impl Linkable for Driver {
    const LINK_TABLE: &'static str = "routes_drivers";
    const LINK_COLUMN: &'static str = "driver_id";
}

impl Table for BusStop {
    const TABLE: &'static str = "bus_stops";
    const KEY_COLUMN: &'static str = "name";
    const COLUMNS: &'static [&'static str] = &["latitude", "longitude", "name"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Real(*self.latitude()),
            SqlValue::Real(*self.longitude()),
            SqlValue::Text(self.name().clone()),
        ]
    }

    fn decode(row: &dyn Columns) -> DbResult<Self> {
        Ok(BusStop::new(row.real("latitude")?, row.real("longitude")?, row.text("name")?))
    }
}

impl Linkable for BusStop {
    const LINK_TABLE: &'static str = "routes_bus_stops";
    const LINK_COLUMN: &'static str = "bus_stop_id";
}

impl Table for Route {
    const TABLE: &'static str = "routes";
    const KEY_COLUMN: &'static str = "number";
    const COLUMNS: &'static [&'static str] = &["number"];

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::Text(self.number().clone())]
    }

    fn decode(row: &dyn Columns) -> DbResult<Self> {
        Ok(Route::new(row.text("number")?))
    }
}
