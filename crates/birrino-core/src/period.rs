//! Trailing reporting windows for consumption statistics.
//!
//! Every window ends at the caller-supplied "now"; only the start varies by
//! period. Week, month and year are rolling offsets (last 7/30/365 days),
//! NOT calendar-aligned periods, and must stay that way. Evening and day
//! anchor the start to a wall-clock time in `now`'s timezone, which is why
//! "now" carries its zone instead of the bucketer reading an ambient one.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, LocalResult, Months, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

use crate::consumption::ConsumedUnits;

/// Named reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Evening,
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// All periods, in display order.
    pub const ALL: [Self; 5] = [
        Self::Evening,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Evening => "evening",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evening" => Ok(Self::Evening),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(UnknownPeriod(s.to_string())),
        }
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown period strings.
///
/// Callers that want the original permissive behavior map this to
/// [`TimeWindow::instant`], a zero-width window at "now".
#[derive(Debug, Clone)]
pub struct UnknownPeriod(String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown period: {}", self.0)
    }
}

impl std::error::Error for UnknownPeriod {}

/// A reporting interval, inclusive on BOTH ends.
///
/// All window filtering in the tracker uses `start <= t <= end`; keep any
/// new comparison consistent with that.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> TimeWindow<Tz> {
    /// A zero-width window at `now`, containing exactly that instant.
    pub fn instant(now: DateTime<Tz>) -> Self {
        Self {
            start: now.clone(),
            end: now,
        }
    }

    /// Whether the window contains `timestamp`, inclusive on both ends.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        let start = self.start.clone().with_timezone(&Utc);
        let end = self.end.clone().with_timezone(&Utc);
        timestamp >= start && timestamp <= end
    }
}

/// Computes the window for `period` ending at `now`.
///
/// The timezone used for wall-clock anchoring (midnight, 18:00) is the one
/// carried by `now`; there is no ambient timezone read. The end of the
/// window always equals `now`.
pub fn date_range<Tz: TimeZone>(period: Period, now: DateTime<Tz>) -> TimeWindow<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();

    let start = match period {
        Period::Evening => {
            // Evening runs from 18:00; before 18:00 it is still the
            // previous day's evening.
            let date = if now.hour() < 18 {
                today - Duration::days(1)
            } else {
                today
            };
            resolve_local(&tz, date.and_time(evening_start()))
        }
        Period::Day => resolve_local(&tz, today.and_time(NaiveTime::MIN)),
        Period::Week => resolve_local(&tz, (today - Duration::days(6)).and_time(NaiveTime::MIN)),
        Period::Month => resolve_local(&tz, (today - Duration::days(29)).and_time(NaiveTime::MIN)),
        Period::Year => {
            // One calendar year back; Feb 29 clamps to Feb 28.
            let date = today.checked_sub_months(Months::new(12)).unwrap_or(today);
            resolve_local(&tz, date.and_time(NaiveTime::MIN))
        }
    };

    TimeWindow { start, end: now }
}

/// Sums the stored units of every event whose timestamp falls in `window`.
///
/// Only the precomputed `units` field is read; units are never recomputed
/// from a drink's current definition.
pub fn sum_units_in<Tz: TimeZone, E: ConsumedUnits>(window: &TimeWindow<Tz>, events: &[E]) -> f64 {
    events
        .iter()
        .filter(|event| window.contains(event.timestamp()))
        .map(ConsumedUnits::units)
        .sum()
}

fn evening_start() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap()
}

/// Maps a wall-clock time to an instant in `tz`.
/// Handles DST ambiguity (fall-back) by picking the earlier time; a
/// spring-forward gap rolls forward one hour, which is guaranteed to exist.
fn resolve_local<Tz: TimeZone>(tz: &Tz, wall: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => match tz.from_local_datetime(&(wall + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            // Unreachable for real timezones; interpret as UTC rather than panic.
            LocalResult::None => tz.from_utc_datetime(&wall),
        },
    }
}
