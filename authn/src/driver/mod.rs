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

//! Business logic for user authentication.

use crate::model::UserId;
use derivative::Derivative;
use fleet_core::clocks::Clock;
use fleet_core::db::Db;
use fleet_core::env::{get_optional_var, get_required_var};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

mod login;
mod signup;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
mod validate;

/// Default value for the `TOKEN_TTL` setting when not specified.
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Configuration options for the authentication driver.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct AuthnOptions {
    /// Salt to mix into every password before hashing it.
    #[derivative(Debug = "ignore")]
    pub password_salt: String,

    /// Secret key to sign and verify access tokens with.
    #[derivative(Debug = "ignore")]
    pub signing_key: String,

    /// How long access tokens remain valid after they are issued.
    pub token_ttl: Duration,
}

impl AuthnOptions {
    /// Creates a new set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_PASSWORD_SALT`, `<prefix>_SIGNING_KEY` and
    /// `<prefix>_TOKEN_TTL`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            password_salt: get_required_var::<String>(prefix, "PASSWORD_SALT")?,
            signing_key: get_required_var::<String>(prefix, "SIGNING_KEY")?,
            token_ttl: get_optional_var::<Duration>(prefix, "TOKEN_TTL")?
                .unwrap_or(DEFAULT_TOKEN_TTL),
        })
    }
}

/// Claims embedded in the access tokens we issue.
#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    /// Identifier of the user the token was issued to.
    user_id: UserId,

    /// Issue time as seconds since the Unix epoch.
    iat: i64,

    /// Expiration time as seconds since the Unix epoch.
    exp: i64,
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct AuthnDriver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Options for the authentication driver.
    opts: Arc<AuthnOptions>,
}

impl AuthnDriver {
    /// Creates a new driver backed by the given dependencies.
    pub fn new(
        db: Arc<dyn Db + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
        opts: AuthnOptions,
    ) -> Self {
        Self { db, clock, opts: Arc::from(opts) }
    }
}
