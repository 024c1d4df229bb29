use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::{Booking, Placement, SlotResolution};

/// Exact start-time occupancy for booking purposes: confirmed and
/// pending bookings block the cell, cancelled ones never do.
pub fn is_slot_occupied(date: NaiveDate, start: NaiveTime, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .any(|b| b.status.blocks_slot() && b.starts_at(date, start))
}

/// Resolve one nominal time cell: whether it is occupied, and a
/// deterministic placement for every booking sharing it.
///
/// Placements cover all statuses (a cancelled booking still renders in
/// the cell); only non-cancelled ones count towards occupancy. Indices
/// follow the stable input order, so re-resolving the same list
/// reproduces the same assignment.
pub fn resolve(date: NaiveDate, start: NaiveTime, bookings: &[Booking]) -> SlotResolution {
    let sharing: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.starts_at(date, start))
        .collect();

    SlotResolution {
        occupied: sharing.iter().any(|b| b.status.blocks_slot()),
        placements: assign(&sharing),
    }
}

/// Cell-keyed placements for every booking of one calendar date, in the
/// shape an agenda grid consumes.
pub fn day_placements(date: NaiveDate, bookings: &[Booking]) -> BTreeMap<String, Vec<Placement>> {
    let mut cells: BTreeMap<String, Vec<&Booking>> = BTreeMap::new();

    for booking in bookings.iter().filter(|b| b.is_on(date)) {
        cells.entry(booking.start_cell()).or_default().push(booking);
    }

    cells
        .into_iter()
        .map(|(cell, group)| (cell, assign(&group)))
        .collect()
}

fn assign(bookings: &[&Booking]) -> Vec<Placement> {
    let total = bookings.len();
    bookings
        .iter()
        .enumerate()
        .map(|(index, booking)| Placement {
            booking_id: booking.id.clone(),
            index,
            total,
        })
        .collect()
}
