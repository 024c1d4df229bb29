use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::{AvailabilityMap, Booking, Break, Professional, Weekday, WeeklyInterval};
use crate::services::slots::slot_sequence;

/// Expand a recurring schedule into a weekday-keyed map of sorted unique
/// start-times.
///
/// Breaks are partitioned per interval weekday before generation.
/// Several intervals on the same weekday union their slots under one
/// key. Malformed windows (start >= end) are skipped without affecting
/// the other weekdays; they are a registry configuration problem, not a
/// reason to abort.
pub fn build_availability(
    intervals: &[WeeklyInterval],
    duration_minutes: i64,
    breaks: &[Break],
) -> AvailabilityMap {
    let mut by_day: BTreeMap<Weekday, BTreeSet<String>> = BTreeMap::new();

    for interval in intervals {
        if !interval.is_well_formed() {
            continue;
        }

        let day_breaks: Vec<Break> = breaks
            .iter()
            .filter(|b| b.weekday == interval.weekday)
            .cloned()
            .collect();

        by_day
            .entry(interval.weekday)
            .or_default()
            .extend(slot_sequence(interval, duration_minutes, &day_breaks));
    }

    by_day
        .into_iter()
        .map(|(day, times)| (day, times.into_iter().collect()))
        .collect()
}

pub fn professional_availability(professional: &Professional) -> AvailabilityMap {
    build_availability(
        &professional.schedule,
        professional.consultation_minutes,
        &professional.breaks,
    )
}

/// Per-weekday set union of several availability maps.
pub fn merge_availability<I>(maps: I) -> AvailabilityMap
where
    I: IntoIterator<Item = AvailabilityMap>,
{
    let mut merged: BTreeMap<Weekday, BTreeSet<String>> = BTreeMap::new();

    for map in maps {
        for (day, times) in map {
            merged.entry(day).or_default().extend(times);
        }
    }

    merged
        .into_iter()
        .map(|(day, times)| (day, times.into_iter().collect()))
        .collect()
}

/// Times offered by at least one active professional of the set. A
/// union, never an intersection: booking by specialty offers every time
/// some professional can take.
pub fn specialty_availability(professionals: &[Professional]) -> AvailabilityMap {
    merge_availability(
        professionals
            .iter()
            .filter(|p| p.active)
            .map(professional_availability),
    )
}

/// Bookable start-times for one professional on a concrete date: the
/// date's weekday availability minus cells already taken by one of that
/// professional's non-cancelled bookings on the date.
pub fn bookable_slots(
    professional: &Professional,
    date: NaiveDate,
    bookings: &[Booking],
) -> Vec<String> {
    let weekday = Weekday::from_date(date);
    let availability = professional_availability(professional);

    let Some(times) = availability.get(&weekday) else {
        return Vec::new();
    };

    times
        .iter()
        .filter(|time| {
            !bookings.iter().any(|booking| {
                booking.professional_id == professional.id
                    && booking.status.blocks_slot()
                    && booking.is_on(date)
                    && booking.start_cell() == time.as_str()
            })
        })
        .cloned()
        .collect()
}
