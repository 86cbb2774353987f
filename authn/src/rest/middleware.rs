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

//! Middleware to protect routes behind bearer token authentication.

use crate::driver::AuthnDriver;
use crate::rest::httputils::get_bearer_auth;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use fleet_core::rest::RestError;
use log::warn;

/// Rejects requests that do not carry a valid bearer token.
///
/// On success, the `UserId` of the caller is stored in the request extensions so that handlers
/// can extract it with `Extension<UserId>`.
pub async fn require_bearer_auth(
    State(driver): State<AuthnDriver>,
    mut request: Request,
    next: Next,
) -> Result<Response, RestError> {
    let user_id = get_bearer_auth(request.headers())
        .and_then(|token| driver.validate(&token).map_err(RestError::from))
        .inspect_err(|e| warn!("Rejecting {} {}: {}", request.method(), request.uri(), e))?;
    request.extensions_mut().insert(user_id);
    Ok(next.run(request).await)
}
