use chrono::{NaiveTime, Timelike};

use crate::models::{Break, WeeklyInterval};

/// Lazy, finite, restartable sequence of bookable "HH:MM" start-times
/// for one weekday working window.
///
/// The cursor starts at the window open and advances one consultation
/// duration per step, emitting while it is still before the window
/// close. A trailing slot may therefore END after the window closes;
/// this mirrors the behavior availability consumers already depend on
/// and is deliberately kept rather than tightened to
/// `start + duration <= end`.
#[derive(Debug, Clone)]
pub struct SlotSequence {
    cursor: i64,
    end: i64,
    stride: i64,
    breaks: Vec<(i64, i64)>,
}

/// Build the slot sequence for `interval`. `breaks` must already be
/// filtered to the interval's weekday by the caller.
///
/// A non-positive duration or an inverted window produces an empty
/// sequence; the cursor walk can never loop.
pub fn slot_sequence(
    interval: &WeeklyInterval,
    duration_minutes: i64,
    breaks: &[Break],
) -> SlotSequence {
    let start = minutes_from_midnight(interval.start_time);
    let end = minutes_from_midnight(interval.end_time);

    if duration_minutes <= 0 || start >= end {
        return SlotSequence {
            cursor: 0,
            end: 0,
            stride: 1,
            breaks: Vec::new(),
        };
    }

    SlotSequence {
        cursor: start,
        end,
        stride: duration_minutes,
        breaks: breaks
            .iter()
            .map(|b| {
                (
                    minutes_from_midnight(b.start_time),
                    minutes_from_midnight(b.end_time),
                )
            })
            .collect(),
    }
}

impl Iterator for SlotSequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.cursor < self.end {
            let candidate = self.cursor;
            self.cursor += self.stride;
            if !self.is_blocked(candidate) {
                return Some(format_minutes(candidate));
            }
        }
        None
    }
}

impl SlotSequence {
    /// A candidate is excluded when it starts inside a break, ends
    /// inside one, or fully contains one. The three cases are distinct:
    /// a break longer than the slot trips only the first two, a break
    /// shorter than the slot only the third, so all three are tested
    /// explicitly.
    fn is_blocked(&self, candidate: i64) -> bool {
        let candidate_end = candidate + self.stride;
        self.breaks.iter().any(|&(break_start, break_end)| {
            (candidate >= break_start && candidate < break_end)
                || (candidate_end > break_start && candidate_end <= break_end)
                || (candidate < break_start && candidate_end > break_end)
        })
    }
}

// All cursor arithmetic happens in minutes since midnight: NaiveTime
// addition wraps at 24:00, which both corrupts the stop condition and
// can jump the [end, 24:00) band forever for large strides.
fn minutes_from_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

fn format_minutes(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
