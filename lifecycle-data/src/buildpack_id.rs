use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::OnceLock;

/// The ID of a buildpack.
///
/// It MUST only contain numbers, letters, and the characters `.`, `/`, and `-`. It also MUST NOT
/// be `config` or `app`, since those names are reserved for other entries under the layers
/// directory.
///
/// Use [`str::parse`] to construct one from a dynamic string.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct BuildpackId(String);

/// An error returned when a string does not satisfy the [`BuildpackId`] character class.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum BuildpackIdError {
    #[error("invalid buildpack id: {0}")]
    InvalidValue(String),
}

fn buildpack_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(?!(app|config)$)[[:alnum:]./-]+$").expect("buildpack id regex is valid")
    })
}

impl FromStr for BuildpackId {
    type Err = BuildpackIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let is_match = buildpack_id_regex().is_match(value).unwrap_or(false);

        if is_match {
            Ok(Self(String::from(value)))
        } else {
            Err(BuildpackIdError::InvalidValue(String::from(value)))
        }
    }
}

impl TryFrom<String> for BuildpackId {
    type Error = BuildpackIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildpackId> for String {
    fn from(value: BuildpackId) -> Self {
        value.0
    }
}

impl Borrow<String> for BuildpackId {
    fn borrow(&self) -> &String {
        &self.0
    }
}

impl Deref for BuildpackId {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for BuildpackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildpackId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a [`BuildpackId`] to a filesystem-safe directory name by replacing every `/` with `_`.
///
/// No other character is modified, and the mapping is not required to be invertible.
#[must_use]
pub fn escape(id: &BuildpackId) -> String {
    id.0.replace('/', "_")
}
