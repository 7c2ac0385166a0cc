//! Time abstraction and timestamp parsing.
//!
//! [`Clock`] lets the in-memory fake stamp responses with a controlled time
//! in tests. [`lenient`] decodes the timestamp formats the provider emits.

use chrono::{DateTime, Utc};

/// Abstraction over the current time for testability.
///
/// # Example
///
/// ```
/// use postmark::time::{Clock, SystemClock};
///
/// let now = SystemClock.now();
/// assert!(now.timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock using the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Serde helpers for timestamps that may lack a UTC offset.
///
/// Accepts RFC 3339 (`2014-08-01T13:28:10.2735393-04:00`) and the naive
/// form `2014-06-01T12:00:00[.fff]`, which is read as UTC. Serializes as
/// RFC 3339.
pub mod lenient {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    /// Parses a timestamp in either accepted form.
    ///
    /// # Errors
    ///
    /// Returns the RFC 3339 parse error if neither form matches.
    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(value) {
            Ok(ts) => Ok(ts.with_timezone(&Utc)),
            Err(rfc_err) => NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
                .map(|naive| naive.and_utc())
                .map_err(|_| rfc_err),
        }
    }

    /// Serializes a timestamp as RFC 3339.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)] // signature fixed by serde `with`
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    /// Deserializes a timestamp in either accepted form.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string or matches neither form.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
