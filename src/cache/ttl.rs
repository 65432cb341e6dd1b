//! TTL Module
//!
//! Time-to-live values given either as plain seconds or as a duration
//! descriptor `(amount, unit)`, and their normalization to whole seconds.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{CacheError, Result};

// == Time Unit ==
/// Calendar unit of a duration descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    /// Average Gregorian month (146097 / 4800 days)
    Months,
    /// Three average months
    Quarters,
    /// Average Gregorian year (365.2425 days)
    Years,
}

impl TimeUnit {
    /// Length of one unit in whole seconds.
    ///
    /// Milliseconds report 0 here; use [`TimeUnit::to_seconds`] to convert.
    pub const fn seconds_per_unit(self) -> i64 {
        match self {
            TimeUnit::Milliseconds => 0,
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
            TimeUnit::Weeks => 604_800,
            TimeUnit::Months => 2_629_746,
            TimeUnit::Quarters => 7_889_238,
            TimeUnit::Years => 31_556_952,
        }
    }

    /// Converts `amount` of this unit to whole seconds.
    ///
    /// Fractional results truncate toward zero. Returns `None` when the
    /// amount is not finite or the result does not fit in an `i64`.
    pub fn to_seconds(self, amount: f64) -> Option<i64> {
        let secs = match self {
            TimeUnit::Milliseconds => amount / 1_000.0,
            unit => amount * unit.seconds_per_unit() as f64,
        }
        .trunc();

        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if secs.is_finite() && secs >= i64::MIN as f64 && secs < i64::MAX as f64 {
            Some(secs as i64)
        } else {
            None
        }
    }

    /// Canonical (plural) unit name.
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
            TimeUnit::Quarters => "quarters",
            TimeUnit::Years => "years",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = CacheError;

    /// Accepts long names (singular or plural, any case) and the short
    /// forms `ms`, `s`, `m`, `h`, `d`, `w`, `M`, `Q`, `y`. Short forms are
    /// case-sensitive because `m` and `M` differ.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let unit = match name {
            "ms" => TimeUnit::Milliseconds,
            "s" => TimeUnit::Seconds,
            "m" => TimeUnit::Minutes,
            "h" => TimeUnit::Hours,
            "d" => TimeUnit::Days,
            "w" => TimeUnit::Weeks,
            "M" => TimeUnit::Months,
            "Q" => TimeUnit::Quarters,
            "y" => TimeUnit::Years,
            _ => match name.to_ascii_lowercase().as_str() {
                "millisecond" | "milliseconds" => TimeUnit::Milliseconds,
                "second" | "seconds" => TimeUnit::Seconds,
                "minute" | "minutes" => TimeUnit::Minutes,
                "hour" | "hours" => TimeUnit::Hours,
                "day" | "days" => TimeUnit::Days,
                "week" | "weeks" => TimeUnit::Weeks,
                "month" | "months" => TimeUnit::Months,
                "quarter" | "quarters" => TimeUnit::Quarters,
                "year" | "years" => TimeUnit::Years,
                _ => return Err(CacheError::UnknownTimeUnit(name.to_string())),
            },
        };
        Ok(unit)
    }
}

// == Ttl ==
/// A time-to-live as accepted by the cache facade.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawTtl")]
pub enum Ttl {
    /// Already-normalized number of seconds
    Seconds(i64),
    /// Duration descriptor, e.g. `(15.0, Minutes)` or `(1.5, Hours)`
    Duration(f64, TimeUnit),
}

impl Ttl {
    /// Normalizes the TTL to whole seconds.
    ///
    /// Plain seconds pass through unchanged, including zero and negative
    /// values (which produce already-expired entries).
    pub fn as_seconds(&self) -> Result<i64> {
        match *self {
            Ttl::Seconds(secs) => Ok(secs),
            Ttl::Duration(amount, unit) => unit.to_seconds(amount).ok_or_else(|| {
                CacheError::InvalidTtl(format!("{} {} is out of range", amount, unit))
            }),
        }
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ttl::Seconds(secs) => write!(f, "{}s", secs),
            Ttl::Duration(amount, unit) => write!(f, "{} {}", amount, unit),
        }
    }
}

impl TryFrom<(f64, &str)> for Ttl {
    type Error = CacheError;

    fn try_from((amount, unit): (f64, &str)) -> Result<Self> {
        Ok(Ttl::Duration(amount, unit.parse()?))
    }
}

impl FromStr for Ttl {
    type Err = CacheError;

    /// Parses `"900"`, `"15 minutes"`, `"15m"` or `"1.5 hours"`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if let Ok(secs) = text.parse::<i64>() {
            return Ok(Ttl::Seconds(secs));
        }

        let split = text
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let (amount, unit) = text.split_at(split);

        let amount = amount
            .parse::<f64>()
            .map_err(|_| CacheError::InvalidTtl(format!("missing amount in '{}'", text)))?;
        Ok(Ttl::Duration(amount, unit.parse()?))
    }
}

// == Serde Shape ==
/// Accepted serialized forms: `900`, `[15, "minutes"]`, `[1.5, "hours"]`
/// or `"15 minutes"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTtl {
    Seconds(i64),
    Duration(f64, String),
    Text(String),
}

impl TryFrom<RawTtl> for Ttl {
    type Error = CacheError;

    fn try_from(raw: RawTtl) -> Result<Self> {
        match raw {
            RawTtl::Seconds(secs) => Ok(Ttl::Seconds(secs)),
            RawTtl::Duration(amount, unit) => Ttl::try_from((amount, unit.as_str())),
            RawTtl::Text(text) => text.parse(),
        }
    }
}
