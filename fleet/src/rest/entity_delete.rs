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

//! API to delete an entity.

use crate::driver::FleetDriver;
use crate::rest::Collection;
use axum::extract::{Path, State};
use fleet_core::rest::{EmptyBody, RestError};

/// DELETE handler for this API.
pub(crate) async fn handler<K: Collection>(
    State(driver): State<FleetDriver>,
    Path(id): Path<K::Id>,
    _: EmptyBody,
) -> Result<(), RestError> {
    driver.delete::<K>(&id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::driver::testutils::driver;
    use crate::model::{Driver, DriverId, Route, RouteId};
    use crate::rest::testutils::*;
    use axum::http;
    use fleet_core::rest::testutils::OneShotBuilder;

    fn route(path: &str, id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/{}/{}", path, id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let token = context.token().await;
        context.put("d1", driver("1111")).await;
        let driver2 = context.put("d2", driver("2222")).await;

        OneShotBuilder::new(context.app(), route("drivers", "d1"))
            .with_bearer_auth(token.as_str())
            .send_empty()
            .await
            .expect_empty()
            .await;

        assert_eq!(None, context.get::<Driver>(&DriverId::from("d1")).await);
        assert_eq!(Some(driver2), context.get::<Driver>(&DriverId::from("d2")).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;
        let token = context.token().await;
        context.put("r1", Route::new("1".to_owned())).await;

        OneShotBuilder::new(context.app(), route("routes", "r2"))
            .with_bearer_auth(token.as_str())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Route not found")
            .await;

        assert!(context.get::<Route>(&RouteId::from("r1")).await.is_some());
    }

    #[tokio::test]
    async fn test_payload_must_be_empty() {
        let context = TestContext::setup().await;
        let token = context.token().await;
        context.put("r1", Route::new("1".to_owned())).await;

        OneShotBuilder::new(context.app(), route("routes", "r1"))
            .with_bearer_auth(token.as_str())
            .send_text("should not be here")
            .await
            .expect_status(http::StatusCode::PAYLOAD_TOO_LARGE)
            .expect_error("should be empty")
            .await;

        assert!(context.get::<Route>(&RouteId::from("r1")).await.is_some());
    }
}
