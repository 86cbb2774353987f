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

//! Entry point to the REST server.

use crate::db::{Linkable, Table};
use crate::driver::FleetDriver;
use crate::model::{Bus, BusStop, Driver, Route};
use axum::Router;
use axum::middleware::from_fn_with_state;
use fleet_authn::driver::AuthnDriver;
use fleet_authn::rest::require_bearer_auth;
use tower_http::cors::CorsLayer;

mod entities_get;
mod entity_delete;
mod entity_get;
mod entity_get_by_key;
mod entity_post;
mod entity_put;
mod link_delete;
mod link_post;
mod links_get;
#[cfg(test)]
mod testutils;

/// Location of an entity kind in the REST namespace.
pub(crate) trait Collection: Table {
    /// Path segment under which the entities of this kind live.
    const PATH: &'static str;

    /// Path segment to look entities up by their natural key.
    const KEY_PATH: &'static str;
}

impl Collection for Bus {
    const PATH: &'static str = "buses";
    const KEY_PATH: &'static str = "number";
}

impl Collection for Driver {
    const PATH: &'static str = "drivers";
    const KEY_PATH: &'static str = "series";
}

impl Collection for BusStop {
    const PATH: &'static str = "stops";
    const KEY_PATH: &'static str = "name";
}

impl Collection for Route {
    const PATH: &'static str = "routes";
    const KEY_PATH: &'static str = "number";
}

/// Creates the router for the CRUD APIs of the entities of kind `K`.
///
/// Read-only APIs are public.  APIs that modify the entities require a bearer token validated by
/// `authn`.
fn entity_router<K: Collection>(driver: FleetDriver, authn: AuthnDriver) -> Router {
    use axum::routing::{get, post, put};

    let base = format!("/{}", K::PATH);

    let public = Router::new()
        .route(&format!("{}/id/:id", base), get(entity_get::handler::<K>))
        .route(&format!("{}/{}/:key", base, K::KEY_PATH), get(entity_get_by_key::handler::<K>))
        .route(&base, get(entities_get::handler::<K>))
        .route(&format!("{}/", base), get(entities_get::handler::<K>));

    let protected = Router::new()
        .route(&base, post(entity_post::handler::<K>))
        .route(&format!("{}/", base), post(entity_post::handler::<K>))
        .route(
            &format!("{}/:id", base),
            put(entity_put::handler::<K>).delete(entity_delete::handler::<K>),
        )
        .route_layer(from_fn_with_state(authn, require_bearer_auth));

    public.merge(protected).with_state(driver)
}

/// Creates the router for the APIs that assign entities of kind `K` to routes.
fn link_router<K: Collection + Linkable>(driver: FleetDriver, authn: AuthnDriver) -> Router {
    use axum::routing::{get, post};

    let base = format!("/{}/:id/{}", Route::PATH, K::PATH);

    let public = Router::new().route(&base, get(links_get::handler::<K>));

    let protected = Router::new()
        .route(
            &format!("{}/:other_id", base),
            post(link_post::handler::<K>).delete(link_delete::handler::<K>),
        )
        .route_layer(from_fn_with_state(authn, require_bearer_auth));

    public.merge(protected).with_state(driver)
}

/// Creates the router for the application.
pub(crate) fn app(driver: FleetDriver, authn: AuthnDriver) -> Router {
    let api = Router::new()
        .merge(fleet_authn::rest::app(authn.clone()))
        .merge(entity_router::<Bus>(driver.clone(), authn.clone()))
        .merge(entity_router::<Driver>(driver.clone(), authn.clone()))
        .merge(entity_router::<BusStop>(driver.clone(), authn.clone()))
        .merge(entity_router::<Route>(driver.clone(), authn.clone()))
        .merge(link_router::<Driver>(driver.clone(), authn.clone()))
        .merge(link_router::<Bus>(driver.clone(), authn.clone()))
        .merge(link_router::<BusStop>(driver, authn));

    Router::new().nest("/api", api).layer(CorsLayer::very_permissive())
}
