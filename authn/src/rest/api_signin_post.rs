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

//! API to obtain an access token for an existing user.

use crate::driver::AuthnDriver;
use crate::model::{AccessToken, Password, Username};
use axum::Json;
use axum::extract::State;
use fleet_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to sign in.
#[derive(Deserialize, Serialize)]
pub struct SigninRequest {
    /// Name of the user signing in.
    pub username: Username,

    /// Password of the user signing in.
    pub password: Password,
}

/// Message returned by the server after a successful sign in.
#[derive(Debug, Deserialize, Serialize)]
pub struct SigninResponse {
    /// Bearer token to present on requests to protected APIs.
    pub token: AccessToken,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<AuthnDriver>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, RestError> {
    let token = driver.login(request.username, request.password).await?;
    Ok(Json(SigninResponse { token }))
}
