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

//! The `Username` data type.

use fleet_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Maximum length of a username as specified in the schema.
const MAX_USERNAME_LENGTH: usize = 64;

/// Represents a correctly-formatted (but maybe non-existent) username.
///
/// Usernames are compared verbatim: `Alice` and `alice` are different users.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a new username from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.is_empty() {
            return Err(ModelError("Username cannot be empty".to_owned()));
        }
        if s.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ModelError("Username is too long".to_owned()));
        }
        if let Some(ch) = s.chars().find(|ch| !(ch.is_ascii_alphanumeric() || ".-_".contains(*ch)))
        {
            return Err(ModelError(format!("Unsupported character '{}' in username '{}'", ch, s)));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Username::new(s)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

#[cfg(any(test, feature = "testutils"))]
impl From<&'static str> for Username {
    /// Creates a new username from a hardcoded string, which must be valid.
    fn from(name: &'static str) -> Self {
        Username::new(name).expect("Hardcoded usernames must be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{Token, assert_de_tokens_error, assert_tokens};

    #[test]
    fn test_username_ok() {
        assert_eq!("simple", Username::new("simple").unwrap().as_str());
        assert_eq!("Dispatcher_7.north-2", Username::new("Dispatcher_7.north-2").unwrap().as_str());
        assert_ne!(Username::from("admin"), Username::from("Admin"));
    }

    #[test]
    fn test_username_error() {
        assert_eq!("Username cannot be empty", Username::new("").unwrap_err().0);
        assert!(Username::new("foo bar").is_err());
        assert!(Username::new("foo@example.com").is_err());
        assert!(Username::new("foo\u{00e9}bar").is_err());
        assert!(Username::new("name1:name2").is_err());

        let mut long_string = "x".repeat(MAX_USERNAME_LENGTH);
        assert!(Username::new(&long_string).is_ok());
        long_string.push('x');
        assert_eq!("Username is too long", Username::new(long_string).unwrap_err().0);
    }

    #[test]
    fn test_username_ser_de_ok() {
        assert_tokens(&Username::from("HelloWorld"), &[Token::Str("HelloWorld")]);
    }

    #[test]
    fn test_username_de_error() {
        assert_de_tokens_error::<Username>(
            &[Token::Str("hello world")],
            "Unsupported character ' ' in username 'hello world'",
        );
    }
}
