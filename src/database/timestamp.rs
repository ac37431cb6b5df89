//! Epoch timestamp columns.
//!
//! Package databases mix two encodings: second-resolution integers (cards,
//! notes, review log) and millisecond-resolution integers (the collection row).
//! Depending on which tool wrote the file the same column may come back as
//! INTEGER, REAL or TEXT, so decoding accepts all three. NULL decodes to the
//! zero epoch. The raw integer is kept as-is so a decode/encode round trip is
//! exact for every `i64`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Database, Decode, Type, TypeInfo, ValueRef};
use std::fmt;

/// Seconds since 1970-01-01 UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochSeconds(i64);

/// Milliseconds since 1970-01-01 UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochSeconds {
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// `None` when the value lies outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl EpochMillis {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<DateTime<Utc>> for EpochSeconds {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp())
    }
}

impl From<DateTime<Utc>> for EpochMillis {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl fmt::Display for EpochSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}s", self.0),
        }
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

fn epoch_compatible(ty: &SqliteTypeInfo) -> bool {
    <i64 as Type<Sqlite>>::compatible(ty)
        || <f64 as Type<Sqlite>>::compatible(ty)
        || <String as Type<Sqlite>>::compatible(ty)
}

fn decode_epoch(value: SqliteValueRef<'_>) -> Result<i64, BoxDynError> {
    if value.is_null() {
        return Ok(0);
    }

    let storage = value.type_info().name().to_string();
    match storage.as_str() {
        "INTEGER" => <i64 as Decode<Sqlite>>::decode(value),
        "REAL" => Ok(<f64 as Decode<Sqlite>>::decode(value)? as i64),
        "TEXT" => {
            let text = <&str as Decode<Sqlite>>::decode(value)?;
            parse_numeric_text(text)
        }
        other => Err(format!("Cannot convert {other} value to an epoch timestamp").into()),
    }
}

fn parse_numeric_text(text: &str) -> Result<i64, BoxDynError> {
    let trimmed = text.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(int);
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => Ok(float as i64),
        _ => Err(format!("Cannot convert text '{text}' to an epoch timestamp").into()),
    }
}

macro_rules! impl_epoch_sqlx {
    ($ty:ident) => {
        impl Type<Sqlite> for $ty {
            fn type_info() -> SqliteTypeInfo {
                <i64 as Type<Sqlite>>::type_info()
            }

            fn compatible(ty: &SqliteTypeInfo) -> bool {
                epoch_compatible(ty)
            }
        }

        impl<'r> Decode<'r, Sqlite> for $ty {
            fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
                decode_epoch(value).map($ty)
            }
        }

        impl<'q> Encode<'q, Sqlite> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
            ) -> Result<IsNull, BoxDynError> {
                <i64 as Encode<'q, Sqlite>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

impl_epoch_sqlx!(EpochSeconds);
impl_epoch_sqlx!(EpochMillis);

#[cfg(test)]
#[path = "tests/timestamp_tests.rs"]
mod tests;
