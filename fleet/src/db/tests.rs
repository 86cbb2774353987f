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

//! Common tests for any database implementation.

use crate::db::*;
use crate::driver::testutils::{bus, driver};
use crate::model::{Bus, BusId, BusStop, BusStopId, Driver, Route, RouteId};
use fleet_core::db::{Db, DbError};

/// Stores an entity with the given `id` and `details` and returns it.
async fn put<K: Table>(db: &dyn Db, id: &'static str, details: K) -> Entity<K>
where
    K::Id: From<&'static str>,
{
    let entity = Entity::new(K::Id::from(id), details);
    insert(&mut db.ex().await.unwrap(), &entity).await.unwrap();
    entity
}

async fn test_entities_insert_and_get(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let bus1 = put(db.as_ref(), "bus-1", bus("ABC123")).await;
    let bus2 = put(db.as_ref(), "bus-2", bus("XYZ789")).await;

    assert_eq!(bus1, get_by_id::<Bus>(&mut db.ex().await.unwrap(), bus1.id()).await.unwrap());
    assert_eq!(bus2, get_by_id::<Bus>(&mut db.ex().await.unwrap(), bus2.id()).await.unwrap());
    assert_eq!(bus1, get_by_key::<Bus>(&mut db.ex().await.unwrap(), "ABC123").await.unwrap());

    db.close().await;
}

async fn test_entities_all_kinds_round_trip(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let driver1 = put(db.as_ref(), "d", driver("4510 123456")).await;
    let stop1 = put(db.as_ref(), "s", BusStop::new(55.7558, -37.6173, "Central".to_owned())).await;
    let route1 = put(db.as_ref(), "r", Route::new("42A".to_owned())).await;

    assert_eq!(
        driver1,
        get_by_id::<Driver>(&mut db.ex().await.unwrap(), driver1.id()).await.unwrap()
    );
    assert_eq!(
        stop1,
        get_by_id::<BusStop>(&mut db.ex().await.unwrap(), stop1.id()).await.unwrap()
    );
    assert_eq!(route1, get_by_key::<Route>(&mut db.ex().await.unwrap(), "42A").await.unwrap());

    db.close().await;
}

async fn test_entities_not_found(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    put(db.as_ref(), "bus-1", bus("ABC123")).await;

    assert_eq!(
        DbError::NotFound,
        get_by_id::<Bus>(&mut db.ex().await.unwrap(), &BusId::from("bus-2")).await.unwrap_err()
    );
    assert_eq!(
        DbError::NotFound,
        get_by_key::<Bus>(&mut db.ex().await.unwrap(), "abc123").await.unwrap_err()
    );
    assert_eq!(
        DbError::NotFound,
        get_by_id::<Route>(&mut db.ex().await.unwrap(), &RouteId::from("bus-1")).await.unwrap_err()
    );

    db.close().await;
}

async fn test_entities_insert_duplicate(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    put(db.as_ref(), "bus-1", bus("ABC123")).await;

    let same_key = Entity::new(BusId::from("bus-2"), bus("ABC123"));
    assert_eq!(
        DbError::AlreadyExists,
        insert(&mut db.ex().await.unwrap(), &same_key).await.unwrap_err()
    );

    let same_id = Entity::new(BusId::from("bus-1"), bus("XYZ789"));
    assert_eq!(
        DbError::AlreadyExists,
        insert(&mut db.ex().await.unwrap(), &same_id).await.unwrap_err()
    );

    assert_eq!(1, list::<Bus>(&mut db.ex().await.unwrap()).await.unwrap().len());

    db.close().await;
}

async fn test_entities_list(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    assert!(list::<Route>(&mut db.ex().await.unwrap()).await.unwrap().is_empty());

    let route2 = put(db.as_ref(), "r2", Route::new("20".to_owned())).await;
    let route3 = put(db.as_ref(), "r3", Route::new("3".to_owned())).await;
    let route1 = put(db.as_ref(), "r1", Route::new("1".to_owned())).await;

    assert_eq!(
        vec![route1, route2, route3],
        list::<Route>(&mut db.ex().await.unwrap()).await.unwrap()
    );
    assert!(list::<Bus>(&mut db.ex().await.unwrap()).await.unwrap().is_empty());

    db.close().await;
}

async fn test_entities_update(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    put(db.as_ref(), "bus-1", bus("ABC123")).await;
    let bus2 = put(db.as_ref(), "bus-2", bus("XYZ789")).await;

    let modified = Entity::new(BusId::from("bus-1"), bus("NEW000"));
    update(&mut db.ex().await.unwrap(), &modified).await.unwrap();
    assert_eq!(
        modified,
        get_by_id::<Bus>(&mut db.ex().await.unwrap(), &BusId::from("bus-1")).await.unwrap()
    );
    assert_eq!(
        DbError::NotFound,
        get_by_key::<Bus>(&mut db.ex().await.unwrap(), "ABC123").await.unwrap_err()
    );

    let conflict = Entity::new(BusId::from("bus-1"), bus("XYZ789"));
    assert_eq!(
        DbError::AlreadyExists,
        update(&mut db.ex().await.unwrap(), &conflict).await.unwrap_err()
    );
    assert_eq!(bus2, get_by_key::<Bus>(&mut db.ex().await.unwrap(), "XYZ789").await.unwrap());

    let missing = Entity::new(BusId::from("bus-3"), bus("QQQ111"));
    assert_eq!(
        DbError::NotFound,
        update(&mut db.ex().await.unwrap(), &missing).await.unwrap_err()
    );

    db.close().await;
}

async fn test_entities_delete(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let stop1 = put(db.as_ref(), "s1", BusStop::new(1.0, 2.0, "First".to_owned())).await;
    let stop2 = put(db.as_ref(), "s2", BusStop::new(3.0, 4.0, "Second".to_owned())).await;

    delete::<BusStop>(&mut db.ex().await.unwrap(), stop1.id()).await.unwrap();
    assert_eq!(
        DbError::NotFound,
        get_by_id::<BusStop>(&mut db.ex().await.unwrap(), stop1.id()).await.unwrap_err()
    );
    assert_eq!(
        DbError::NotFound,
        delete::<BusStop>(&mut db.ex().await.unwrap(), stop1.id()).await.unwrap_err()
    );
    assert_eq!(vec![stop2], list::<BusStop>(&mut db.ex().await.unwrap()).await.unwrap());

    db.close().await;
}

async fn test_entities_abort_insert(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    {
        let mut tx = db.begin().await.unwrap();
        insert(tx.ex(), &Entity::new(RouteId::from("r"), Route::new("1".to_owned())))
            .await
            .unwrap();
    }

    assert!(list::<Route>(&mut db.ex().await.unwrap()).await.unwrap().is_empty());

    db.close().await;
}

async fn test_entities_long_text(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let template = bus("unused");
    let details = Bus::new(
        "B".repeat(300),
        "M".repeat(1000),
        "R".repeat(300),
        *template.assembly_date(),
        *template.last_repair_date(),
    );
    let bus1 = put(db.as_ref(), "bus-1", details).await;
    let stop1 = put(db.as_ref(), "stop-1", BusStop::new(0.0, 0.0, "S".repeat(4096))).await;

    assert_eq!(bus1, get_by_id::<Bus>(&mut db.ex().await.unwrap(), bus1.id()).await.unwrap());
    assert_eq!(
        bus1,
        get_by_key::<Bus>(&mut db.ex().await.unwrap(), &"R".repeat(300)).await.unwrap()
    );
    assert_eq!(
        stop1,
        get_by_id::<BusStop>(&mut db.ex().await.unwrap(), stop1.id()).await.unwrap()
    );

    db.close().await;
}

async fn test_links_assign_and_list(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let route1 = put(db.as_ref(), "r1", Route::new("1".to_owned())).await;
    let route2 = put(db.as_ref(), "r2", Route::new("2".to_owned())).await;
    let driver1 = put(db.as_ref(), "d1", driver("2222")).await;
    let driver2 = put(db.as_ref(), "d2", driver("1111")).await;
    let bus1 = put(db.as_ref(), "b1", bus("ABC123")).await;

    assert!(
        list_linked::<Driver>(&mut db.ex().await.unwrap(), route1.id()).await.unwrap().is_empty()
    );

    for driver in [&driver1, &driver2] {
        assign_link::<Driver>(&mut db.ex().await.unwrap(), route1.id(), driver.id())
            .await
            .unwrap();
    }
    assign_link::<Driver>(&mut db.ex().await.unwrap(), route2.id(), driver1.id()).await.unwrap();
    assign_link::<Bus>(&mut db.ex().await.unwrap(), route2.id(), bus1.id()).await.unwrap();

    assert_eq!(
        vec![driver2.clone(), driver1.clone()],
        list_linked::<Driver>(&mut db.ex().await.unwrap(), route1.id()).await.unwrap()
    );
    assert_eq!(
        vec![driver1],
        list_linked::<Driver>(&mut db.ex().await.unwrap(), route2.id()).await.unwrap()
    );
    assert_eq!(
        vec![bus1],
        list_linked::<Bus>(&mut db.ex().await.unwrap(), route2.id()).await.unwrap()
    );
    assert!(
        list_linked::<BusStop>(&mut db.ex().await.unwrap(), route2.id()).await.unwrap().is_empty()
    );

    db.close().await;
}

async fn test_links_assign_errors(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let route = put(db.as_ref(), "r", Route::new("1".to_owned())).await;
    let stop = put(db.as_ref(), "s", BusStop::new(0.0, 0.0, "Stop".to_owned())).await;

    assign_link::<BusStop>(&mut db.ex().await.unwrap(), route.id(), stop.id()).await.unwrap();
    assert_eq!(
        DbError::AlreadyExists,
        assign_link::<BusStop>(&mut db.ex().await.unwrap(), route.id(), stop.id())
            .await
            .unwrap_err()
    );

    assert_eq!(
        DbError::NotFound,
        assign_link::<BusStop>(&mut db.ex().await.unwrap(), &RouteId::from("x"), stop.id())
            .await
            .unwrap_err()
    );
    assert_eq!(
        DbError::NotFound,
        assign_link::<BusStop>(&mut db.ex().await.unwrap(), route.id(), &BusStopId::from("x"))
            .await
            .unwrap_err()
    );

    assert_eq!(
        vec![stop],
        list_linked::<BusStop>(&mut db.ex().await.unwrap(), route.id()).await.unwrap()
    );

    db.close().await;
}

async fn test_links_unassign(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let route = put(db.as_ref(), "r", Route::new("1".to_owned())).await;
    let bus1 = put(db.as_ref(), "b", bus("ABC123")).await;

    assign_link::<Bus>(&mut db.ex().await.unwrap(), route.id(), bus1.id()).await.unwrap();
    unassign_link::<Bus>(&mut db.ex().await.unwrap(), route.id(), bus1.id()).await.unwrap();
    assert!(list_linked::<Bus>(&mut db.ex().await.unwrap(), route.id()).await.unwrap().is_empty());

    // Removing an absent link is silently accepted.
    unassign_link::<Bus>(&mut db.ex().await.unwrap(), route.id(), bus1.id()).await.unwrap();
    unassign_link::<Bus>(&mut db.ex().await.unwrap(), route.id(), &BusId::from("other"))
        .await
        .unwrap();

    assert_eq!(
        DbError::NotFound,
        unassign_link::<Bus>(&mut db.ex().await.unwrap(), &RouteId::from("x"), bus1.id())
            .await
            .unwrap_err()
    );

    // The entities survive the removal of their links.
    assert_eq!(bus1, get_by_id::<Bus>(&mut db.ex().await.unwrap(), bus1.id()).await.unwrap());
    assign_link::<Bus>(&mut db.ex().await.unwrap(), route.id(), bus1.id()).await.unwrap();

    db.close().await;
}

async fn test_links_list_unknown_route(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    assert_eq!(
        DbError::NotFound,
        list_linked::<Driver>(&mut db.ex().await.unwrap(), &RouteId::from("x")).await.unwrap_err()
    );

    db.close().await;
}

async fn test_links_cascade_on_delete(db: Box<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    let route1 = put(db.as_ref(), "r1", Route::new("1".to_owned())).await;
    let route2 = put(db.as_ref(), "r2", Route::new("2".to_owned())).await;
    let driver1 = put(db.as_ref(), "d1", driver("1111")).await;
    let driver2 = put(db.as_ref(), "d2", driver("2222")).await;
    for route in [&route1, &route2] {
        for driver in [&driver1, &driver2] {
            assign_link::<Driver>(&mut db.ex().await.unwrap(), route.id(), driver.id())
                .await
                .unwrap();
        }
    }

    delete::<Driver>(&mut db.ex().await.unwrap(), driver1.id()).await.unwrap();
    assert_eq!(
        vec![driver2.clone()],
        list_linked::<Driver>(&mut db.ex().await.unwrap(), route2.id()).await.unwrap()
    );

    delete::<Route>(&mut db.ex().await.unwrap(), route1.id()).await.unwrap();
    assert_eq!(vec![driver2], list::<Driver>(&mut db.ex().await.unwrap()).await.unwrap());

    // Recreating the route must not resurrect its old links.
    insert(&mut db.ex().await.unwrap(), &route1).await.unwrap();
    assert!(
        list_linked::<Driver>(&mut db.ex().await.unwrap(), route1.id()).await.unwrap().is_empty()
    );

    db.close().await;
}

/// Instantiates the database tests for the database provided by `setup`.
macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        fleet_core::db::testutils::generate_tests!(
            $( #[$extra], )?
            $setup,
            $crate::db::tests,
            test_entities_insert_and_get,
            test_entities_all_kinds_round_trip,
            test_entities_not_found,
            test_entities_insert_duplicate,
            test_entities_list,
            test_entities_update,
            test_entities_delete,
            test_entities_abort_insert,
            test_entities_long_text,
            test_links_assign_and_list,
            test_links_assign_errors,
            test_links_unassign,
            test_links_list_unknown_route,
            test_links_cascade_on_delete
        );
    }
];

mod sqlite {
    generate_db_tests!(Box::new(fleet_core::db::sqlite::testutils::setup().await));
}

#[cfg(feature = "postgres")]
mod postgres {
    generate_db_tests!(
        Box::new(fleet_core::db::postgres::testutils::setup().await),
        #[ignore = "Requires environment configuration and is expensive"]
    );
}
