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

//! Extends the driver with the `login` method.

use crate::db;
use crate::driver::{AuthnDriver, Claims};
use crate::model::{AccessToken, Password, Username};
use fleet_core::db::DbError;
use fleet_core::driver::{DriverError, DriverResult};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::{info, warn};

impl AuthnDriver {
    /// Authenticates `username` with `password` and issues a new access token for them.
    ///
    /// The token is valid for the configured TTL counting from the current time.
    pub async fn login(self, username: Username, password: Password) -> DriverResult<AccessToken> {
        let password_hash = password.hash(&self.opts.password_salt);

        let user =
            match db::get_user_by_credentials(&mut self.db.ex().await?, &username, &password_hash)
                .await
            {
                Ok(user) => user,
                Err(DbError::NotFound) => {
                    warn!("Rejected sign in attempt for {}", username.as_str());
                    let message = "Invalid username or password".to_owned();
                    return Err(DriverError::Unauthorized(message));
                }
                Err(e) => return Err(e.into()),
            };

        let now = self.clock.now_utc();
        let exp = time::Duration::try_from(self.opts.token_ttl)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                DriverError::BackendError(format!(
                    "Token TTL {:?} is too large",
                    self.opts.token_ttl
                ))
            })?;
        let claims =
            Claims { user_id: user.id(), iat: now.unix_timestamp(), exp: exp.unix_timestamp() };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.opts.signing_key.as_bytes()),
        )
        .map_err(|e| DriverError::BackendError(format!("Cannot sign access token: {}", e)))?;

        info!("User {} signed in", username.as_str());
        Ok(AccessToken::new(token)?)
    }
}
