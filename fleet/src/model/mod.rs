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

//! Data types for the bus fleet.

use fleet_core::model::{ModelError, ModelResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

mod bus;
pub(crate) use bus::Bus;
mod driver;
pub(crate) use driver::Driver;
mod route;
pub(crate) use route::Route;
mod stop;
pub(crate) use stop::BusStop;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Operations common to the opaque identifiers of all entity kinds.
pub(crate) trait EntityId:
    Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Creates a new identifier from `id`, which must not be blank.
    fn new<S: Into<String>>(id: S) -> ModelResult<Self>;

    /// Creates a new random identifier.
    fn generate() -> Self;

    /// Returns a string view of the identifier.
    fn as_str(&self) -> &str;
}

/// Defines an opaque identifier type named `$name` for the entity `$what`.
macro_rules! entity_id [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("Opaque identifier of a ", $what, ".")]
        #[derive(Clone, Debug, Deserialize, derive_more::Display, Eq, Hash, PartialEq, Serialize)]
        #[serde(try_from = "String", into = "String")]
        pub(crate) struct $name(String);

        impl EntityId for $name {
            fn new<S: Into<String>>(id: S) -> ModelResult<Self> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ModelError(format!("{} id cannot be empty", $what)));
                }
                Ok(Self(id))
            }

            fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(id: String) -> ModelResult<Self> {
                Self::new(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(test)]
        impl From<&'static str> for $name {
            /// Creates a new identifier from a hardcoded string, which must be valid.
            fn from(id: &'static str) -> Self {
                Self::new(id).expect("Hardcoded ids must be valid")
            }
        }
    }
];

entity_id!(BusId, "bus");
entity_id!(BusStopId, "bus stop");
entity_id!(DriverId, "driver");
entity_id!(RouteId, "route");

/// Properties shared by all the entity kinds that the fleet manages.
///
/// A kind holds the details of an entity, which are all of its fields except for its identifier.
/// One of those fields is the natural key of the entity, which must be unique among all entities
/// of the same kind.
pub(crate) trait Kind:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Type of the identifiers for this kind.
    type Id: EntityId;

    /// Human-readable name of the kind, used in error messages.
    const NAME: &'static str;

    /// Plural form of `NAME`.
    const PLURAL: &'static str;

    /// Human-readable name of the natural key.
    const KEY_NAME: &'static str;

    /// Returns the value of the natural key.
    fn natural_key(&self) -> &str;

    /// Checks the consistency of the details before storing them.
    fn validate(&self) -> ModelResult<()> {
        validate_key(self)
    }
}

/// Ensures that the natural key of `details` is not blank.
fn validate_key<K: Kind>(details: &K) -> ModelResult<()> {
    if details.natural_key().trim().is_empty() {
        return Err(ModelError(format!("{} {} cannot be empty", K::NAME, K::KEY_NAME)));
    }
    Ok(())
}

/// A stored entity: its identifier plus the details of its kind.
///
/// Serializes as a single flat object with the `id` next to all other fields.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(bound = "")]
pub(crate) struct Entity<K: Kind> {
    /// Identifier of the entity.
    id: K::Id,

    /// All other fields of the entity.
    #[serde(flatten)]
    details: K,
}

impl<K: Kind> Entity<K> {
    /// Creates a new entity from its parts.
    pub(crate) fn new(id: K::Id, details: K) -> Self {
        Self { id, details }
    }

    /// Returns the identifier of the entity.
    pub(crate) fn id(&self) -> &K::Id {
        &self.id
    }

    /// Returns the details of the entity.
    pub(crate) fn details(&self) -> &K {
        &self.details
    }
}
