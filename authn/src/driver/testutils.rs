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

//! Utilities to help testing services that integrate with the `authn` features.

use crate::db;
use crate::driver::{AuthnDriver, AuthnOptions};
use crate::model::{AccessToken, Password, UserId, Username};
use fleet_core::clocks::testutils::SettableClock;
use fleet_core::db::Db;
#[cfg(test)]
use fleet_core::db::Executor;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

/// Password salt used by the test driver.
pub const TEST_SALT: &str = "test-salt";

/// Token signing key used by the test driver.
pub const TEST_SIGNING_KEY: &str = "test-signing-key";

/// Password assigned to users created via `TestContext::do_test_login`.
pub const TEST_PASSWORD: &str = "test0password";

/// Returns the authentication options used by the test driver.
pub fn test_options() -> AuthnOptions {
    AuthnOptions {
        password_salt: TEST_SALT.to_owned(),
        signing_key: TEST_SIGNING_KEY.to_owned(),
        token_ttl: Duration::from_secs(12 * 60 * 60),
    }
}

/// State of a running test.
pub struct TestContext {
    /// The clock used by the driver to issue and validate tokens.
    pub(crate) clock: Arc<SettableClock>,

    /// The driver to handle authentication flows.
    driver: AuthnDriver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a settable clock.
    #[cfg(test)]
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(fleet_core::db::sqlite::testutils::setup().await);
        Self::setup_with(db).await
    }

    /// Initializes the test context on top of an already-connected `db`, creating the schema of
    /// the users table in it.
    pub async fn setup_with(db: Arc<dyn Db + Send + Sync>) -> Self {
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let clock = Arc::new(SettableClock::new(now));
        let driver = AuthnDriver::new(db, clock.clone(), test_options());
        TestContext { clock, driver }
    }

    /// Gets the clock that drives token issuance and expiration.
    pub fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Gets a copy of the driver in this test context.
    pub fn driver(&self) -> AuthnDriver {
        self.driver.clone()
    }

    /// Gets a direct executor against the database.
    #[cfg(test)]
    pub(crate) async fn ex(&self) -> Executor {
        self.driver.db.ex().await.unwrap()
    }

    /// Syntactic sugar to create and log a user in for testing purposes.
    pub async fn do_test_login(&self, username: Username) -> (UserId, AccessToken) {
        let password = Password::from(TEST_PASSWORD);
        let id = self.driver().signup(username.clone(), password).await.unwrap();
        let token = self.driver().login(username, Password::from(TEST_PASSWORD)).await.unwrap();
        (id, token)
    }
}
