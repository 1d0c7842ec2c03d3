use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use blog_common::id::{Id, ParseIdError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Id);

impl UserId {
    pub const fn new(id: Id) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Identity of the authenticated caller, as resolved by the outer layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestingUser {
    pub id: UserId,
}

impl RequestingUser {
    pub const fn new(id: UserId) -> Self {
        Self { id }
    }
}
