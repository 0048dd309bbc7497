//! Grid-aligned slot scan over a single working day.
//!
//! Candidate starts sit at `work_start + k * duration`. A conflicting booking
//! rejects the grid point; the scan does not shift to the end of the booking.

use crate::booking::BusyInterval;

/// All grid start minutes whose slot fits entirely inside the working window.
pub fn grid_starts(work_start: u32, work_end: u32, duration: u32) -> impl Iterator<Item = u32> {
    let count = if duration == 0 || work_end < work_start.saturating_add(duration) {
        0
    } else {
        (work_end - work_start - duration) / duration + 1
    };
    (0..count).map(move |k| work_start + k * duration)
}

/// Grid starts that overlap no busy interval and begin at or after `not_before`.
pub fn free_starts<'a>(
    work_start: u32,
    work_end: u32,
    duration: u32,
    busy: &'a [BusyInterval],
    not_before: u32,
) -> impl Iterator<Item = u32> + 'a {
    grid_starts(work_start, work_end, duration)
        .filter(move |&start| start >= not_before)
        .filter(move |&start| {
            let slot = BusyInterval::new(start, start.saturating_add(duration));
            !busy.iter().any(|b| slot.overlaps(b))
        })
}
