use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Day of the week, Sunday = 0, the calendar convention used across the
/// system. Ordered Sunday-first so map iteration follows the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_index(date.weekday().num_days_from_sunday())
    }

    pub fn from_index(index: u32) -> Self {
        match index % 7 {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        };
        write!(f, "{}", name)
    }
}

/// Recurring open working window for one professional on one weekday.
/// Wall-clock times at minute granularity, clinic-local, no timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyInterval {
    pub weekday: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl WeeklyInterval {
    /// A window with start >= end never produces slots.
    pub fn is_well_formed(&self) -> bool {
        self.start_time < self.end_time
    }
}

/// Recurring sub-interval during which no slot may start nor overlap.
/// Not required to be nested inside a working window; a break outside
/// all windows simply has no effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Break {
    pub weekday: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Read-only registry snapshot of a professional. The engine never
/// mutates it; schedule, breaks and duration are owned by the clinic
/// management side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub schedule: Vec<WeeklyInterval>,
    #[serde(default)]
    pub breaks: Vec<Break>,
    pub consultation_minutes: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    /// Cancelled bookings never block a slot from being re-booked.
    pub fn blocks_slot(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Pending)
    }
}

/// Booking snapshot read from the external booking store. `[start, end)`
/// is taken as the occupied interval as-is; the engine does not enforce
/// end = start + consultation duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub patient_name: String,
    pub professional_id: String,
    #[serde(with = "minute_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "minute_datetime")]
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

impl Booking {
    /// "HH:MM" label of the time cell this booking starts in.
    pub fn start_cell(&self) -> String {
        self.start.time().format("%H:%M").to_string()
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.start.date() == date
    }

    pub fn starts_at(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.start.date() == date && self.start.time() == time
    }
}

/// Weekday-keyed sorted unique "HH:MM" start-times. Rebuilt on every
/// query, never cached.
pub type AvailabilityMap = BTreeMap<Weekday, Vec<String>>;

/// Deterministic layout assignment for one booking inside a shared time
/// cell: index 0..total-1 in stable input order, each an equal share of
/// the cell width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub booking_id: String,
    pub index: usize,
    pub total: usize,
}

impl Placement {
    pub fn width_share(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            1.0 / self.total as f64
        }
    }

    pub fn offset_share(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.index as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResolution {
    pub occupied: bool,
    pub placements: Vec<Placement>,
}

/// Serde adapter for "HH:MM" wall-clock times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for "YYYY-MM-DDTHH:MM" booking timestamps.
pub mod minute_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M";

    pub fn serialize<S>(datetime: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&datetime.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}
