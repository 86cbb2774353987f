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

//! REST interface for the authentication service.

use crate::driver::AuthnDriver;
use axum::Router;

mod api_signin_post;
mod api_signup_post;
mod httputils;
mod middleware;
#[cfg(test)]
mod testutils;

pub use api_signin_post::{SigninRequest, SigninResponse};
pub use api_signup_post::{SignupRequest, SignupResponse};
pub use httputils::get_bearer_auth;
pub use middleware::require_bearer_auth;

/// Creates the router for the authentication endpoints.
///
/// The `driver` is a configured instance of the `AuthnDriver` to handle accounts.  Services
/// should merge the returned router into their own and protect their APIs with the
/// `require_bearer_auth` middleware backed by the same driver.
pub fn app(driver: AuthnDriver) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/auth/sign-up", post(api_signup_post::handler))
        .route("/auth/sign-in", post(api_signin_post::handler))
        .with_state(driver)
}
