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

//! Extends the driver with the `validate` method.

use crate::driver::{AuthnDriver, Claims};
use crate::model::{AccessToken, UserId};
use fleet_core::driver::{DriverError, DriverResult};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

impl AuthnDriver {
    /// Verifies that `token` was issued by us and has not expired yet, and returns the identifier
    /// of the user it was issued to.
    ///
    /// Unlike other operations, this does not consume the driver because it does not touch the
    /// database.
    pub fn validate(&self, token: &AccessToken) -> DriverResult<UserId> {
        // Expiration is checked below against our own clock instead of the system time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<Claims>(
            token.as_str(),
            &DecodingKey::from_secret(self.opts.signing_key.as_bytes()),
            &validation,
        )
        .map_err(|e| DriverError::Unauthorized(format!("Invalid token: {}", e)))?;

        if self.clock.now_utc().unix_timestamp() >= data.claims.exp {
            return Err(DriverError::Unauthorized("Token expired".to_owned()));
        }

        Ok(data.claims.user_id)
    }
}
