//! Calendar-day boundaries for date-range predicates.
//!
//! A date filter matches the whole calendar day its instant falls on. The
//! day is taken in a configurable [`Zone`]; both boundaries are rendered as
//! UTC ISO-8601 strings with millisecond precision.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    SecondsFormat, TimeDelta, TimeZone, Utc,
};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ConditionError, Result};
use crate::op::Op;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Time zone used to decide which calendar day an instant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Zone {
    /// The zone of the host running the assembler.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// Computes the day range containing `instant` in this zone.
    pub fn day_range(self, instant: DateTime<Utc>) -> DayRange {
        match self {
            Zone::Local => DayRange::containing(instant, &Local),
            Zone::Utc => DayRange::containing(instant, &Utc),
            Zone::Fixed(offset) => DayRange::containing(instant, &offset),
        }
    }
}

impl FromStr for Zone {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Zone::Local),
            "utc" | "z" => Ok(Zone::Utc),
            other => parse_offset(other)
                .map(Zone::Fixed)
                .ok_or_else(|| ConditionError::InvalidZone(s.to_string())),
        }
    }
}

impl TryFrom<String> for Zone {
    type Error = ConditionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "local"),
            Zone::Utc => write!(f, "utc"),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "00"),
    };
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
}

/// The boundaries of one calendar day, as absolute instants.
///
/// `gte` is the first millisecond of the day and `lt` the last one
/// (23:59:59.999 local time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayRange {
    pub gte: DateTime<Utc>,
    pub lt: DateTime<Utc>,
}

impl DayRange {
    /// Computes the day containing `instant` as seen from `tz`.
    pub fn containing<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DayRange {
        let date = instant.with_timezone(tz).date_naive();
        DayRange::for_date(date, tz)
    }

    /// Computes the boundaries of `date` in `tz`.
    pub fn for_date<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DayRange {
        let start = date.and_time(NaiveTime::MIN);
        let end = date.and_time(NaiveTime::MIN + TimeDelta::milliseconds(MILLIS_PER_DAY - 1));
        DayRange {
            gte: resolve_local(tz, start),
            lt: resolve_local(tz, end),
        }
    }

    /// Lower bound rendered as an ISO-8601 UTC string.
    pub fn gte_iso(&self) -> String {
        format_instant(self.gte)
    }

    /// Upper bound rendered as an ISO-8601 UTC string.
    pub fn lt_iso(&self) -> String {
        format_instant(self.lt)
    }
}

impl Serialize for DayRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(Op::Gte.as_str(), &self.gte_iso())?;
        map.serialize_entry(Op::Lt.as_str(), &self.lt_iso())?;
        map.end()
    }
}

/// Maps a wall-clock time in `tz` to an absolute instant.
///
/// Ambiguous times (DST fold) take the earlier instant. Times inside a DST
/// gap keep the offset in force before the transition, which moves the
/// wall clock forward by the length of the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix();
            let utc = local - TimeDelta::seconds(i64::from(before.local_minus_utc()));
            DateTime::from_naive_utc_and_offset(utc, Utc)
        }
    }
}

/// Renders an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a user-supplied instant.
///
/// Accepts RFC 3339 (`2024-01-15T10:00:00Z`), a bare date (`2024-01-15`,
/// taken as UTC midnight) or a date-time without offset (taken as local).
pub fn parse_instant(name: &str, value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(resolve_local(&Local, naive));
        }
    }
    Err(ConditionError::invalid(
        name,
        format!("'{value}' is not a valid date or RFC 3339 timestamp"),
    ))
}
