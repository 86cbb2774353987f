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

//! Test utilities for the REST API.

use crate::db::Table;
use crate::driver::testutils::TestContext as DriverTestContext;
use crate::model::Entity;
use crate::rest::app;
use axum::Router;
use fleet_authn::driver::testutils::TestContext as AuthnTestContext;
use fleet_authn::model::{AccessToken, Username};
use fleet_core::clocks::testutils::SettableClock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// State of a running test.
pub(crate) struct TestContext {
    /// Driver-level test state for the fleet.
    inner: DriverTestContext,

    /// Driver-level test state for authentication, sharing the database with `inner`.
    authn: AuthnTestContext,

    /// Counter to generate unique usernames for the tokens handed out by `token`.
    users: AtomicUsize,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes the REST app on top of an in-memory database.
    pub(crate) async fn setup() -> Self {
        let inner = DriverTestContext::setup().await;
        let authn = AuthnTestContext::setup_with(inner.db()).await;
        let app = app(inner.driver(), authn.driver());
        Self { inner, authn, users: AtomicUsize::new(0), app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets the clock that drives token issuance and expiration.
    pub(crate) fn clock(&self) -> &SettableClock {
        self.authn.clock()
    }

    /// Creates a new user and returns a valid access token for it.
    pub(crate) async fn token(&self) -> AccessToken {
        let n = self.users.fetch_add(1, Ordering::SeqCst);
        let username = Username::new(format!("user{}", n)).unwrap();
        let (_id, token) = self.authn.do_test_login(username).await;
        token
    }

    /// Stores an entity with the given `id` and `details` by directly modifying the database.
    pub(crate) async fn put<K: Table>(&self, id: &'static str, details: K) -> Entity<K>
    where
        K::Id: From<&'static str>,
    {
        self.inner.put(id, details).await
    }

    /// Gets the entity of kind `K` identified by `id` by directly querying the database.
    pub(crate) async fn get<K: Table>(&self, id: &K::Id) -> Option<Entity<K>> {
        self.inner.get(id).await
    }

    /// Gets a copy of the fleet driver.
    pub(crate) fn driver(&self) -> crate::driver::FleetDriver {
        self.inner.driver()
    }
}
