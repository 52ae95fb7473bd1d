//! Timezone value object
//!
//! Daily summaries are bucketed by the local calendar date of each
//! observation, so the bucketing zone is an explicit, validated value.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A validated IANA timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA timezone name such as "Asia/Kolkata"
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` for names unknown to the
    /// IANA database.
    pub fn try_new(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// UTC
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }

    /// India Standard Time, the zone of the default city set
    #[must_use]
    pub const fn kolkata() -> Self {
        Self(Tz::Asia__Kolkata)
    }

    /// IANA name of the zone
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Underlying `chrono-tz` zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Calendar date of an instant in this zone
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// First instant of `date` in this zone
    ///
    /// `None` only when local midnight does not exist at all.
    #[must_use]
    pub fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        self.0
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::try_new(&name).map_err(serde::de::Error::custom)
    }
}
