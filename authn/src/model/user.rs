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

//! The `User` and `UserId` data types.

use crate::model::{HashedPassword, Username};
use fleet_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a user, assigned at sign up time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its textual representation.
    pub fn parse(s: &str) -> ModelResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ModelError(format!("Invalid user id '{}': {}", s, e)))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Representation of a user's information.
#[derive(Debug, PartialEq)]
pub struct User {
    /// Unique identifier of the user.
    id: UserId,

    /// Name of the user, unique across all users.
    username: Username,

    /// Salted hash of the user's password.
    password_hash: HashedPassword,
}

impl User {
    /// Creates a new user with the given fields.
    pub fn new(id: UserId, username: Username, password_hash: HashedPassword) -> Self {
        Self { id, username, password_hash }
    }

    /// Gets the user's identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Gets the user's username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Gets the user's password as a hash.
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}
