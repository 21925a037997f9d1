use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Repository visibility on the hosting provider.
///
/// Deliberately carries no `Default`: creating a remote requires the caller
/// to state visibility explicitly, so a repository is never published
/// publicly by omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// The flag form the hosting CLI expects.
    pub fn as_flag(&self) -> &'static str {
        match self {
            Visibility::Public => "--public",
            Visibility::Private => "--private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(SyncError::InvalidInput(format!(
                "invalid visibility '{other}': expected 'public' or 'private'"
            ))),
        }
    }
}

/// Caller-supplied metadata for remote creation.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteOptions {
    pub name: String,
    pub description: Option<String>,
    pub visibility: Visibility,
}

impl RemoteOptions {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            description: None,
            visibility,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_round_trip() {
        assert_eq!("public".parse::<Visibility>().unwrap(), Visibility::Public);
        assert_eq!(
            "private".parse::<Visibility>().unwrap(),
            Visibility::Private
        );
        assert!("internal".parse::<Visibility>().is_err());
    }

    #[test]
    fn visibility_flags() {
        assert_eq!(Visibility::Public.as_flag(), "--public");
        assert_eq!(Visibility::Private.as_flag(), "--private");
    }
}
