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

//! API to list all entities of a kind.

use crate::driver::FleetDriver;
use crate::model::Entity;
use crate::rest::Collection;
use axum::Json;
use axum::extract::State;
use fleet_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler<K: Collection>(
    State(driver): State<FleetDriver>,
    _: EmptyBody,
) -> Result<Json<Vec<Entity<K>>>, RestError> {
    let entities = driver.list::<K>().await?;
    Ok(Json(entities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::bus;
    use crate::model::{Bus, Route};
    use crate::rest::testutils::*;
    use axum::http;
    use fleet_core::rest::testutils::OneShotBuilder;
    use fleet_core::test_payload_must_be_empty;

    fn route(path: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/api/{}", path))
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route("buses/"))
            .send_empty()
            .await
            .expect_json::<Vec<Entity<Bus>>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_sorted_by_natural_key() {
        let context = TestContext::setup().await;
        let bus2 = context.put("b2", bus("XYZ789")).await;
        let bus1 = context.put("b1", bus("ABC123")).await;
        context.put("r1", Route::new("1".to_owned())).await;

        for path in ["buses", "buses/"] {
            let response = OneShotBuilder::new(context.app(), route(path))
                .send_empty()
                .await
                .expect_json::<Vec<Entity<Bus>>>()
                .await;
            assert_eq!(vec![bus1.clone(), bus2.clone()], response);
        }
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("routes/"));
}
