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

//! Test utilities for the REST interface.

use crate::db;
use crate::driver::AuthnDriver;
use crate::driver::testutils::TestContext as DriverTestContext;
use crate::model::{AccessToken, UserId, Username};
use crate::rest::app;
use axum::Router;
use fleet_core::clocks::testutils::SettableClock;
use fleet_core::db::DbError;

/// State of a running test.
pub(crate) struct TestContext {
    /// Driver-level test state, which owns the database and the clock.
    inner: DriverTestContext,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes the REST app on top of an in-memory database.
    pub(crate) async fn setup() -> Self {
        let inner = DriverTestContext::setup().await;
        let app = app(inner.driver());
        Self { inner, app }
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Gets the clock that drives token issuance and expiration.
    pub(crate) fn clock(&self) -> &SettableClock {
        self.inner.clock()
    }

    /// Gets a copy of the driver backing the app.
    pub(crate) fn driver(&self) -> AuthnDriver {
        self.inner.driver()
    }

    /// Creates and logs a user in.
    pub(crate) async fn do_test_login(&self, username: Username) -> (UserId, AccessToken) {
        self.inner.do_test_login(username).await
    }

    /// Looks up the identifier of the user with `username` by directly querying the backing
    /// database.
    pub(crate) async fn user_id(&self, username: &Username) -> Option<UserId> {
        match db::get_user_by_username(&mut self.inner.ex().await, username).await {
            Ok(user) => Some(user.id()),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }
}
