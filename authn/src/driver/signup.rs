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

//! Extends the driver with the `signup` method.

use crate::db;
use crate::driver::AuthnDriver;
use crate::model::{Password, User, UserId, Username};
use fleet_core::db::DbError;
use fleet_core::driver::{DriverError, DriverResult};
use log::info;

impl AuthnDriver {
    /// Creates a new account for `username` with `password` and returns its identifier.
    pub async fn signup(self, username: Username, password: Password) -> DriverResult<UserId> {
        let mut tx = self.db.begin().await?;

        let password_hash = password.hash(&self.opts.password_salt);
        let user = User::new(UserId::generate(), username, password_hash);

        match db::create_user(tx.ex(), &user).await {
            Ok(()) => (),
            Err(DbError::AlreadyExists) => {
                return Err(DriverError::AlreadyExists(format!(
                    "User {} already exists",
                    user.username().as_str()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        info!("Created user {} with id {}", user.username().as_str(), user.id());
        Ok(user.id())
    }
}
