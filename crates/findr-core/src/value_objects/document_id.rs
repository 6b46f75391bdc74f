//! Document ID - 64-bit store-assigned identifier
//!
//! Uses the Snowflake layout so that ids sort in creation order:
//! - Bits 63-22: Timestamp (milliseconds since custom epoch)
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Sequence number (0-4095)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a document in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DocumentId(i64);

impl DocumentId {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the id was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> 12) & 0x3FF) as u16
    }

    pub fn parse(s: &str) -> Result<Self, DocumentIdParseError> {
        s.parse::<i64>()
            .map(DocumentId)
            .map_err(|_| DocumentIdParseError::InvalidFormat(s.to_string()))
    }
}

/// Error when parsing a DocumentId from its string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentIdParseError {
    #[error("invalid document id: {0}")]
    InvalidFormat(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DocumentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DocumentIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::parse(s)
    }
}

// Ids travel as strings inside documents (`statusId` on comments)
impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DocumentIdVisitor;

        impl Visitor<'_> for DocumentIdVisitor {
            type Value = DocumentId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer document id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<DocumentId, E>
            where
                E: de::Error,
            {
                Ok(DocumentId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<DocumentId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(DocumentId)
                    .map_err(|_| de::Error::custom("document id out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<DocumentId, E>
            where
                E: de::Error,
            {
                DocumentId::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(DocumentIdVisitor)
    }
}

/// Lock-free generator for strictly increasing document ids
///
/// When more than 4096 ids are requested within one millisecond the
/// generator borrows from the next millisecond instead of spinning.
pub struct DocumentIdGenerator {
    worker_id: u16,
    last: AtomicI64,
}

impl DocumentIdGenerator {
    /// # Panics
    /// Panics if worker_id >= 1024
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < 1024, "Worker ID must be < 1024");
        Self {
            worker_id,
            last: AtomicI64::new(0),
        }
    }

    pub fn generate(&self) -> DocumentId {
        let floor = ((Self::now_millis() - DocumentId::EPOCH) << 22) | (i64::from(self.worker_id) << 12);
        let mut current = self.last.load(Ordering::Acquire);
        loop {
            let next = if floor > current {
                floor
            } else {
                Self::bump(current, self.worker_id)
            };
            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return DocumentId::new(next),
                Err(actual) => current = actual,
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    /// Next id after `last` that keeps the worker bits intact
    fn bump(last: i64, worker_id: u16) -> i64 {
        let sequence = last & 0xFFF;
        if sequence < 0xFFF {
            last + 1
        } else {
            (((last >> 22) + 1) << 22) | (i64::from(worker_id) << 12)
        }
    }

    #[inline]
    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(DocumentId::EPOCH)
    }
}

impl Default for DocumentIdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
