//! # Id
//!
//! Sortable identifiers for blogs and users.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use ulid::Ulid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Unexpected};

/// Worker ID generation utilities.
pub mod worker;

/// A sortable 128-bit identifier.
///
/// Rendered as a ULID string. Ids produced by [`worker::WorkerIdGenerator`] sort by
/// creation time first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u128);

/// Errors that can occur when parsing an `Id` from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    /// The string is not a valid ID format.
    #[error("invalid id string")]
    InvalidString,
}

const TIMESTAMP_BITS: i64 = 64;
const WORKER_BITS: i64 = 16;
const SEQUENCE_BITS: i64 = 16;

impl Id {
    /// Creates a new ID from a 128-bit integer.
    #[must_use]
    pub const fn new(id: u128) -> Self {
        Self(id)
    }

    /// Generates a new random sortable ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().0)
    }

    /// Returns the raw 128-bit value.
    #[must_use]
    pub const fn value(self) -> u128 {
        self.0
    }

    /// Creates an ID from worker parts.
    ///
    /// Timestamps before the Unix epoch are stored as zero.
    #[must_use]
    pub fn from_worker_parts(time: OffsetDateTime, worker: u16, sequence: u16) -> Self {
        let timestamp_ms = u128::try_from(time.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
        let worker = u128::from(worker);
        let sequence = u128::from(sequence);

        Self(
            (timestamp_ms & ((1 << TIMESTAMP_BITS) - 1)) << (WORKER_BITS + SEQUENCE_BITS)
                | (worker << SEQUENCE_BITS)
                | sequence,
        )
    }

    /// Decodes the ID into worker parts.
    #[must_use]
    pub fn decode_worker(self) -> (OffsetDateTime, u16, u16) {
        let milliseconds = (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) as i64;
        let timestamp = OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(milliseconds);

        let worker = ((self.0 >> SEQUENCE_BITS) & ((1 << WORKER_BITS) - 1)) as u16;
        let sequence = (self.0 & ((1 << SEQUENCE_BITS) - 1)) as u16;

        (timestamp, worker, sequence)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Ulid(self.0).fmt(f)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_str(s)
            .map(From::from)
            .map_err(|_| ParseIdError::InvalidString)
    }
}

impl From<u128> for Id {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Id> for u128 {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl From<Ulid> for Id {
    fn from(ulid: Ulid) -> Self {
        Self(ulid.into())
    }
}

impl From<Id> for Ulid {
    fn from(id: Id) -> Self {
        Self::from(id.0)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let value = String::deserialize(deserializer)?;
        value
            .parse::<Self>()
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(value.as_str()), &"Id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generated() {
        use std::collections::HashMap;
        const N: usize = 10;

        let ids: HashMap<_, _> = (0..N)
            .map(|_| {
                let id = Id::generate();
                (id.to_string(), id)
            })
            .collect();
        assert_eq!(ids.len(), N);

        for (id_str, id) in ids {
            let decoded: Id = id_str.parse().unwrap();
            assert_eq!(decoded, id);
        }

        assert_eq!("not an id".parse::<Id>(), Err(ParseIdError::InvalidString));
    }

    #[test]
    fn worker_parts() {
        let ts = OffsetDateTime::from_unix_timestamp(42).unwrap() + Duration::milliseconds(1337);

        let id = Id::from_worker_parts(ts, 1, 1);
        assert_eq!(
            id,
            Id(0b1010_1001_0100_1001_0000_0000_0000_0001_0000_0000_0000_0001)
        );
        let (timestamp, worker, sequence) = id.decode_worker();
        assert_eq!(timestamp, ts);
        assert_eq!(worker, 1);
        assert_eq!(sequence, 1);
    }

    #[test]
    fn sorts_by_time() {
        let earlier = OffsetDateTime::from_unix_timestamp(100).unwrap();
        let later = OffsetDateTime::from_unix_timestamp(101).unwrap();
        assert!(Id::from_worker_parts(earlier, 9, 500) < Id::from_worker_parts(later, 1, 0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize() {
        let id = Id::from_worker_parts(OffsetDateTime::from_unix_timestamp(42).unwrap(), 5, 7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        assert_eq!(serde_json::from_str::<Id>(&json).unwrap(), id);
    }
}
