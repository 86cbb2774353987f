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

//! Entry point to the fleet service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use fleet_authn::driver::AuthnOptions;
use fleet_core::db::Db;
use fleet_core::db::postgres::{PostgresDb, PostgresOptions};
use fleet_core::env::get_optional_var;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

/// Default address to listen on when `FLEET_BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: (Ipv4Addr, u16) = (Ipv4Addr::LOCALHOST, 8080);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let bind_addr = get_optional_var::<SocketAddr>("FLEET", "BIND_ADDR")?
        .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR));
    let authn_opts = AuthnOptions::from_env("AUTHN")?;

    let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
    let db = Arc::new(PostgresDb::connect(db_opts)?);
    {
        let mut ex = db.ex().await?;
        fleet_authn::db::init_schema(&mut ex).await?;
        fleet::db::init_schema(&mut ex).await?;
    }

    let result = fleet::serve(bind_addr, db.clone(), authn_opts).await;
    db.close().await;
    result
}
