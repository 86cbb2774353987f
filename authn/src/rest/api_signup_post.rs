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

//! API to create a new user account.

use crate::driver::AuthnDriver;
use crate::model::{Password, UserId, Username};
use axum::Json;
use axum::extract::State;
use fleet_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to create an account.
#[derive(Deserialize, Serialize)]
pub struct SignupRequest {
    /// Desired username.
    pub username: Username,

    /// Desired password.
    pub password: Password,
}

/// Message returned by the server after creating an account.
#[derive(Debug, Deserialize, Serialize)]
pub struct SignupResponse {
    /// Identifier assigned to the new user.
    pub id: UserId,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<AuthnDriver>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, RestError> {
    let id = driver.signup(request.username, request.password).await?;
    Ok(Json(SignupResponse { id }))
}
